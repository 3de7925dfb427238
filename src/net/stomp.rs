//! Minimal STOMP 1.2 frame codec for the chat message bus.
//!
//! The chat backend speaks STOMP over a plain WebSocket: the client sends
//! `CONNECT`, `SUBSCRIBE`, `SEND`, `UNSUBSCRIBE`, and `DISCONNECT` frames
//! and receives `CONNECTED`, `MESSAGE`, and `ERROR` frames. Only the subset
//! the chat rooms need is implemented; header values we produce never
//! contain newlines or colons, so no header escaping is performed.

#[cfg(test)]
#[path = "stomp_test.rs"]
mod stomp_test;

use crate::net::error::ClientError;

/// A single STOMP frame: command line, headers, optional body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StompFrame {
    pub command: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl StompFrame {
    /// Build a frame with no body.
    pub fn new(command: &str, headers: &[(&str, &str)]) -> Self {
        Self::with_body(command, headers, String::new())
    }

    /// Build a frame with a body.
    pub fn with_body(command: &str, headers: &[(&str, &str)], body: String) -> Self {
        Self {
            command: command.to_owned(),
            headers: headers
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            body,
        }
    }

    /// First header value with the given name, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Serialize to the wire form: command, headers, blank line, body, NUL.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(self.command.len() + self.body.len() + 64);
        out.push_str(&self.command);
        out.push('\n');
        for (k, v) in &self.headers {
            out.push_str(k);
            out.push(':');
            out.push_str(v);
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.body);
        out.push('\0');
        out
    }

    /// Parse a frame from its wire form.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Parse` when the command line or a header line
    /// is malformed. Heartbeat frames (bare EOL) parse as an empty command
    /// and should be ignored by the caller.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        let raw = raw.strip_suffix('\0').unwrap_or(raw);
        // The blank line separating headers from body may be CRLF-framed.
        let (head, body) = raw
            .split_once("\r\n\r\n")
            .or_else(|| raw.split_once("\n\n"))
            .map_or((raw, ""), |(head, body)| (head, body));

        let mut lines = head.lines();
        let command = lines
            .next()
            .ok_or_else(|| ClientError::Parse("empty frame".to_owned()))?
            .trim_end_matches('\r')
            .to_owned();

        let mut headers = Vec::new();
        for line in lines {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                break;
            }
            let (k, v) = line
                .split_once(':')
                .ok_or_else(|| ClientError::Parse(format!("bad header line: {line}")))?;
            headers.push((k.to_owned(), v.to_owned()));
        }

        Ok(Self {
            command,
            headers,
            body: body.to_owned(),
        })
    }
}

/// `CONNECT` frame carrying the identity the gateway expects.
pub fn connect(user_id: i64, access_token: &str) -> StompFrame {
    let user_id = user_id.to_string();
    StompFrame::new(
        "CONNECT",
        &[
            ("accept-version", "1.2"),
            ("userId", user_id.as_str()),
            ("accessToken", access_token),
        ],
    )
}

/// `SUBSCRIBE` to a room's broadcast topic.
pub fn subscribe_room(subscription_id: &str, room_id: i64) -> StompFrame {
    let destination = format!("/topic/{room_id}");
    StompFrame::new(
        "SUBSCRIBE",
        &[("id", subscription_id), ("destination", destination.as_str())],
    )
}

/// `SUBSCRIBE` to the per-user translation queue.
///
/// `message_ids` is the comma-joined id list of all foreign (non-mine)
/// messages currently in the session; the server translates exactly these.
pub fn subscribe_translation(
    subscription_id: &str,
    user_id: i64,
    target_language: &str,
    message_ids: &str,
) -> StompFrame {
    let destination = format!("/queue/translate/{user_id}");
    StompFrame::new(
        "SUBSCRIBE",
        &[
            ("id", subscription_id),
            ("destination", destination.as_str()),
            ("targetLanguage", target_language),
            ("messageIds", message_ids),
        ],
    )
}

/// `UNSUBSCRIBE` a previous subscription by id.
pub fn unsubscribe(subscription_id: &str) -> StompFrame {
    StompFrame::new("UNSUBSCRIBE", &[("id", subscription_id)])
}

/// `SEND` a chat message to the room's application destination.
pub fn send_chat(room_id: i64, access_token: &str, body: String) -> StompFrame {
    let destination = format!("/app/chat.send/{room_id}");
    StompFrame::with_body(
        "SEND",
        &[
            ("destination", destination.as_str()),
            ("Authorization", access_token),
            ("content-type", "application/json"),
        ],
        body,
    )
}

/// `DISCONNECT` frame closing the session cleanly.
pub fn disconnect() -> StompFrame {
    StompFrame::new("DISCONNECT", &[])
}
