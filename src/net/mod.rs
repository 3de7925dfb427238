//! Network layer: REST helpers, wire types, and the realtime chat client.

pub mod api;
pub mod chat;
pub mod error;
pub mod stomp;
pub mod types;
