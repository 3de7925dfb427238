//! Client-side error taxonomy.
//!
//! Every fallible network or session operation collapses into one of these
//! four cases; pages render the `Display` text directly in error banners.

/// Errors surfaced by the network layer and session managers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// No stored token or user id; the operation was aborted before any
    /// network activity.
    #[error("No authentication found. Please log in.")]
    AuthMissing,

    /// A fetch was rejected or returned a non-2xx status.
    #[error("Network request failed: {0}")]
    Network(String),

    /// A response or inbound frame body could not be decoded.
    #[error("Malformed server response: {0}")]
    Parse(String),

    /// The realtime transport dropped; history stays visible but sending
    /// is disabled until the room is reopened.
    #[error("Lost connection to the chat server")]
    ConnectionLost,
}
