//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `chat_session`, `feed`) so individual
//! components depend on small focused models. The structs are plain data
//! with pure transition methods; pages hold them in `RwSignal`s and the
//! network layer mutates them through `update`. Keeping the transitions
//! free of browser types lets the sibling test modules run natively.

pub mod auth;
pub mod chat_session;
pub mod feed;
