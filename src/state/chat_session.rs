#[cfg(test)]
#[path = "chat_session_test.rs"]
mod chat_session_test;

use crate::net::types::{ChatHistory, TranslatedMessage, WireMessage};

/// Realtime transport status for an open chat room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Delivery status of a message in local history.
///
/// Locally originated messages start `Pending` and are reconciled to `Sent`
/// when the server echoes them back, or marked `Failed` when the publish
/// could not be handed to the transport. Backlog and foreign messages are
/// always `Sent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    Pending,
    Sent,
    Failed,
}

/// Target language for the translation subscription.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TargetLanguage {
    Ko,
    #[default]
    En,
    Jap,
    Ch,
}

impl TargetLanguage {
    /// All selectable languages, in menu order.
    pub const ALL: [Self; 4] = [Self::Ko, Self::En, Self::Jap, Self::Ch];

    /// Wire code the translation service expects.
    pub fn code(self) -> &'static str {
        match self {
            Self::Ko => "KO",
            Self::En => "EN",
            Self::Jap => "JAP",
            Self::Ch => "CH",
        }
    }
}

/// A chat message in local history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: i64,
    pub content: String,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub chat_room_id: i64,
    pub created_at: String,
    pub is_mine: bool,
    pub translated_content: Option<String>,
    pub delivery: Delivery,
}

impl ChatMessage {
    fn from_wire(wire: WireMessage, my_id: i64) -> Self {
        let is_mine = wire.sender_id == my_id;
        Self {
            id: wire.id,
            content: wire.content,
            sender_id: wire.sender_id,
            recipient_id: wire.recipient_id,
            chat_room_id: wire.chat_room_id,
            created_at: wire.created_at,
            is_mine,
            translated_content: None,
            delivery: Delivery::Sent,
        }
    }
}

/// State for one open chat room: transport status, message history, and the
/// translation subscription.
///
/// All methods are pure transitions; the STOMP transport in `net::chat`
/// drives them and owns the actual connection.
#[derive(Clone, Debug)]
pub struct ChatSessionState {
    pub room_id: i64,
    pub connection_status: ConnectionStatus,
    pub messages: Vec<ChatMessage>,
    /// Counterpart participant, learned from the backlog response.
    pub participant_id: Option<i64>,
    pub translation_enabled: bool,
    pub target_language: TargetLanguage,
    /// Bumped on every translation (re)subscription; frames carrying a
    /// stale epoch are ignored so a superseded subscription can never
    /// mutate history after a language switch.
    pub translation_epoch: u64,
    pub loading: bool,
    pub error: Option<String>,
    next_local_id: i64,
}

impl ChatSessionState {
    /// Fresh session for a room, loading and disconnected.
    pub fn new(room_id: i64) -> Self {
        Self {
            room_id,
            connection_status: ConnectionStatus::Disconnected,
            messages: Vec::new(),
            participant_id: None,
            translation_enabled: false,
            target_language: TargetLanguage::default(),
            translation_epoch: 0,
            loading: true,
            error: None,
            next_local_id: -1,
        }
    }

    /// Replace history with the fetched backlog, tagging `is_mine` by
    /// comparing each sender against the signed-in user.
    pub fn load_backlog(&mut self, history: ChatHistory, my_id: i64) {
        self.participant_id = history.participants.first().copied();
        self.messages = history
            .messages
            .into_iter()
            .map(|wire| ChatMessage::from_wire(wire, my_id))
            .collect();
        self.loading = false;
    }

    /// Apply a live broadcast frame.
    ///
    /// Foreign messages append to history; echoes of the local user's own
    /// messages reconcile the oldest matching `Pending` copy instead of
    /// appending a duplicate.
    pub fn apply_inbound(&mut self, wire: WireMessage, my_id: i64) {
        if wire.sender_id == my_id {
            self.reconcile_echo(&wire);
        } else {
            self.messages.push(ChatMessage::from_wire(wire, my_id));
        }
    }

    fn reconcile_echo(&mut self, wire: &WireMessage) {
        let pending = self
            .messages
            .iter_mut()
            .find(|m| m.is_mine && m.delivery == Delivery::Pending && m.content == wire.content);
        if let Some(message) = pending {
            message.id = wire.id;
            message.created_at = wire.created_at.clone();
            message.delivery = Delivery::Sent;
        }
        // No pending copy: stale echo of an already reconciled send. Drop.
    }

    /// Stage an outgoing message: append an optimistic `Pending` copy with a
    /// provisional (negative) id and return the wire form to publish.
    ///
    /// Returns `None` unless the transport is connected, the counterpart is
    /// known, and the content is non-blank; callers treat that as a no-op.
    pub fn stage_outgoing(
        &mut self,
        content: &str,
        my_id: i64,
        created_at: String,
    ) -> Option<WireMessage> {
        let content = content.trim();
        if content.is_empty() || self.connection_status != ConnectionStatus::Connected {
            return None;
        }
        let recipient_id = self.participant_id?;

        let provisional_id = self.next_local_id;
        self.next_local_id -= 1;

        let wire = WireMessage {
            id: provisional_id,
            content: content.to_owned(),
            sender_id: my_id,
            recipient_id,
            chat_room_id: self.room_id,
            created_at,
        };
        let mut message = ChatMessage::from_wire(wire.clone(), my_id);
        message.delivery = Delivery::Pending;
        self.messages.push(message);
        Some(wire)
    }

    /// Mark a staged message as failed after the transport refused it.
    pub fn mark_send_failed(&mut self, provisional_id: i64) {
        if let Some(message) = self.messages.iter_mut().find(|m| m.id == provisional_id) {
            message.delivery = Delivery::Failed;
        }
    }

    /// Comma-joined ids of all foreign messages, the set the translation
    /// subscription asks the server to translate.
    pub fn foreign_message_ids(&self) -> String {
        self.messages
            .iter()
            .filter(|m| !m.is_mine)
            .map(|m| m.id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Turn translation on. Returns the epoch for the new subscription.
    pub fn enable_translation(&mut self) -> u64 {
        self.translation_enabled = true;
        self.bump_epoch()
    }

    /// Turn translation off. Bumps the epoch so in-flight frames from the
    /// old subscription are discarded.
    pub fn disable_translation(&mut self) {
        self.translation_enabled = false;
        self.bump_epoch();
    }

    /// Switch the target language. When translation is active, returns the
    /// epoch for the replacement subscription; otherwise only the language
    /// preference changes.
    pub fn set_language(&mut self, language: TargetLanguage) -> Option<u64> {
        self.target_language = language;
        self.translation_enabled.then(|| self.bump_epoch())
    }

    fn bump_epoch(&mut self) -> u64 {
        self.translation_epoch += 1;
        self.translation_epoch
    }

    /// Merge translated copies delivered for `epoch` into history by id.
    ///
    /// Frames from a stale epoch (or arriving after translation was turned
    /// off) are ignored wholesale; unmatched ids are ignored individually.
    pub fn apply_translations(&mut self, epoch: u64, translations: &[TranslatedMessage]) {
        if !self.translation_enabled || epoch != self.translation_epoch {
            return;
        }
        for translated in translations {
            if let Some(message) = self.messages.iter_mut().find(|m| m.id == translated.id) {
                message.translated_content = Some(translated.message.clone());
            }
        }
    }
}
