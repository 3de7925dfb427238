//! Endpoint configuration.
//!
//! Both URLs can be overridden at build time so staging and production
//! bundles point at their own backends.

/// REST API base URL.
pub const BASE_URL: &str = match option_env!("CONTACTO_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:8080",
};

/// WebSocket endpoint for the chat message bus.
pub const CHAT_URL: &str = match option_env!("CONTACTO_CHAT_URL") {
    Some(url) => url,
    None => "ws://localhost:8080/ws/chat",
};
