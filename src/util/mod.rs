//! Small utilities shared across pages.

pub mod session_store;
