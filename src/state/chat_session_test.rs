use super::*;

const ME: i64 = 10;
const OTHER: i64 = 20;

fn wire(id: i64, sender_id: i64, content: &str) -> WireMessage {
    WireMessage {
        id,
        content: content.to_owned(),
        sender_id,
        recipient_id: if sender_id == ME { OTHER } else { ME },
        chat_room_id: 7,
        created_at: "2026-08-29T10:00:00Z".to_owned(),
    }
}

fn connected_session() -> ChatSessionState {
    let mut session = ChatSessionState::new(7);
    session.load_backlog(
        ChatHistory {
            participants: vec![OTHER],
            messages: vec![],
        },
        ME,
    );
    session.connection_status = ConnectionStatus::Connected;
    session
}

// =============================================================
// Backlog
// =============================================================

#[test]
fn new_session_is_loading_and_disconnected() {
    let session = ChatSessionState::new(7);
    assert!(session.loading);
    assert_eq!(session.connection_status, ConnectionStatus::Disconnected);
    assert!(session.messages.is_empty());
    assert_eq!(session.participant_id, None);
}

#[test]
fn load_backlog_tags_is_mine_by_sender() {
    let mut session = ChatSessionState::new(7);
    session.load_backlog(
        ChatHistory {
            participants: vec![OTHER],
            messages: vec![wire(1, ME, "mine"), wire(2, OTHER, "theirs")],
        },
        ME,
    );

    assert!(!session.loading);
    assert_eq!(session.participant_id, Some(OTHER));
    assert_eq!(session.messages.len(), 2);
    assert!(session.messages[0].is_mine);
    assert!(!session.messages[1].is_mine);
    assert_eq!(session.messages[1].delivery, Delivery::Sent);
}

// =============================================================
// Inbound frames
// =============================================================

#[test]
fn foreign_frames_append_in_arrival_order() {
    let mut session = connected_session();
    session.apply_inbound(wire(1, OTHER, "a"), ME);
    session.apply_inbound(wire(2, OTHER, "b"), ME);

    let contents: Vec<_> = session.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(contents, ["a", "b"]);
    assert!(session.messages.iter().all(|m| !m.is_mine));
}

#[test]
fn history_grows_by_backlog_plus_foreign_frames_only() {
    // Spec scenario: empty backlog, one foreign frame while signed in as me.
    let mut session = ChatSessionState::new(7);
    session.load_backlog(ChatHistory::default(), ME);
    session.apply_inbound(wire(1, OTHER, "hi"), ME);

    assert_eq!(session.messages.len(), 1);
    assert!(!session.messages[0].is_mine);
    assert_eq!(session.messages[0].content, "hi");
}

#[test]
fn own_echo_without_pending_copy_is_dropped() {
    let mut session = connected_session();
    session.apply_inbound(wire(1, ME, "hello"), ME);
    assert!(session.messages.is_empty());
}

// =============================================================
// Optimistic send
// =============================================================

#[test]
fn stage_outgoing_appends_pending_copy() {
    let mut session = connected_session();
    let staged = session
        .stage_outgoing("hello", ME, "2026-08-29T10:01:00Z".to_owned())
        .expect("staged");

    assert!(staged.id < 0);
    assert_eq!(staged.recipient_id, OTHER);
    assert_eq!(staged.chat_room_id, 7);

    assert_eq!(session.messages.len(), 1);
    let local = &session.messages[0];
    assert!(local.is_mine);
    assert_eq!(local.delivery, Delivery::Pending);
    assert_eq!(local.id, staged.id);
}

#[test]
fn stage_outgoing_assigns_distinct_provisional_ids() {
    let mut session = connected_session();
    let a = session.stage_outgoing("a", ME, String::new()).expect("a");
    let b = session.stage_outgoing("b", ME, String::new()).expect("b");
    assert_ne!(a.id, b.id);
}

#[test]
fn stage_outgoing_requires_connection() {
    let mut session = connected_session();
    session.connection_status = ConnectionStatus::Disconnected;
    assert!(session.stage_outgoing("hi", ME, String::new()).is_none());
    assert!(session.messages.is_empty());
}

#[test]
fn stage_outgoing_requires_participant() {
    let mut session = ChatSessionState::new(7);
    session.connection_status = ConnectionStatus::Connected;
    assert!(session.stage_outgoing("hi", ME, String::new()).is_none());
}

#[test]
fn stage_outgoing_rejects_blank_content() {
    let mut session = connected_session();
    assert!(session.stage_outgoing("   ", ME, String::new()).is_none());
}

#[test]
fn echo_reconciles_pending_copy_instead_of_appending() {
    let mut session = connected_session();
    let staged = session.stage_outgoing("hello", ME, String::new()).expect("staged");

    session.apply_inbound(wire(99, ME, "hello"), ME);

    assert_eq!(session.messages.len(), 1);
    let local = &session.messages[0];
    assert_eq!(local.id, 99);
    assert_eq!(local.delivery, Delivery::Sent);
    assert_ne!(local.id, staged.id);
}

#[test]
fn echo_reconciles_oldest_matching_pending_first() {
    let mut session = connected_session();
    session.stage_outgoing("same", ME, String::new()).expect("first");
    session.stage_outgoing("same", ME, String::new()).expect("second");

    session.apply_inbound(wire(50, ME, "same"), ME);

    assert_eq!(session.messages[0].delivery, Delivery::Sent);
    assert_eq!(session.messages[0].id, 50);
    assert_eq!(session.messages[1].delivery, Delivery::Pending);
}

#[test]
fn mark_send_failed_flags_the_staged_copy() {
    let mut session = connected_session();
    let staged = session.stage_outgoing("hi", ME, String::new()).expect("staged");
    session.mark_send_failed(staged.id);
    assert_eq!(session.messages[0].delivery, Delivery::Failed);
}

// =============================================================
// Translation
// =============================================================

#[test]
fn foreign_message_ids_excludes_own_messages() {
    let mut session = connected_session();
    session.apply_inbound(wire(1, OTHER, "a"), ME);
    session.stage_outgoing("mine", ME, String::new());
    session.apply_inbound(wire(3, OTHER, "b"), ME);

    assert_eq!(session.foreign_message_ids(), "1,3");
}

#[test]
fn enable_translation_bumps_epoch() {
    let mut session = connected_session();
    let epoch = session.enable_translation();
    assert!(session.translation_enabled);
    assert_eq!(epoch, session.translation_epoch);
    assert_eq!(epoch, 1);
}

#[test]
fn translations_merge_by_id() {
    let mut session = connected_session();
    session.apply_inbound(wire(1, OTHER, "annyeong"), ME);
    let epoch = session.enable_translation();

    session.apply_translations(
        epoch,
        &[TranslatedMessage {
            id: 1,
            message: "hello".to_owned(),
        }],
    );

    assert_eq!(
        session.messages[0].translated_content.as_deref(),
        Some("hello")
    );
}

#[test]
fn translations_with_unmatched_ids_are_ignored() {
    let mut session = connected_session();
    session.apply_inbound(wire(1, OTHER, "a"), ME);
    let epoch = session.enable_translation();

    session.apply_translations(
        epoch,
        &[TranslatedMessage {
            id: 404,
            message: "ghost".to_owned(),
        }],
    );

    assert_eq!(session.messages[0].translated_content, None);
}

#[test]
fn stale_epoch_translations_do_not_mutate_state() {
    let mut session = connected_session();
    session.apply_inbound(wire(1, OTHER, "a"), ME);

    let old_epoch = session.enable_translation();
    let new_epoch = session.set_language(TargetLanguage::Jap).expect("resubscribe");
    assert_ne!(old_epoch, new_epoch);

    // A frame from the superseded EN subscription arrives late.
    session.apply_translations(
        old_epoch,
        &[TranslatedMessage {
            id: 1,
            message: "stale".to_owned(),
        }],
    );
    assert_eq!(session.messages[0].translated_content, None);

    // The current subscription still works.
    session.apply_translations(
        new_epoch,
        &[TranslatedMessage {
            id: 1,
            message: "fresh".to_owned(),
        }],
    );
    assert_eq!(
        session.messages[0].translated_content.as_deref(),
        Some("fresh")
    );
}

#[test]
fn translations_after_disable_are_ignored() {
    let mut session = connected_session();
    session.apply_inbound(wire(1, OTHER, "a"), ME);
    let epoch = session.enable_translation();
    session.disable_translation();

    session.apply_translations(
        epoch,
        &[TranslatedMessage {
            id: 1,
            message: "late".to_owned(),
        }],
    );
    assert_eq!(session.messages[0].translated_content, None);
}

#[test]
fn set_language_without_translation_only_updates_preference() {
    let mut session = connected_session();
    assert_eq!(session.set_language(TargetLanguage::Ko), None);
    assert_eq!(session.target_language, TargetLanguage::Ko);
    assert_eq!(session.translation_epoch, 0);
}

#[test]
fn language_codes_match_wire_values() {
    assert_eq!(TargetLanguage::Ko.code(), "KO");
    assert_eq!(TargetLanguage::En.code(), "EN");
    assert_eq!(TargetLanguage::Jap.code(), "JAP");
    assert_eq!(TargetLanguage::Ch.code(), "CH");
}
