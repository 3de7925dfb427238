use super::*;

use std::future::Future;
use std::task::{Context, Waker};

use leptos::prelude::*;

fn identity() -> Identity {
    Identity {
        user_id: 10,
        access_token: "token".to_owned(),
        refresh_token: "refresh".to_owned(),
    }
}

// Without a browser the backlog fetch resolves immediately (with an
// error), so one poll drives `open_room` to completion.
fn poll_to_completion(fut: impl Future<Output = ()>) {
    let mut fut = Box::pin(fut);
    let mut cx = Context::from_waker(Waker::noop());
    assert!(fut.as_mut().poll(&mut cx).is_ready());
}

#[test]
fn open_room_reports_backlog_failure() {
    let session = RwSignal::new(ChatSessionState::new(1));
    let conn = RwSignal::new(ChatConnection::default());
    let alive = Arc::new(AtomicBool::new(true));

    poll_to_completion(open_room(1, identity(), alive, session, conn));

    let state = session.get_untracked();
    assert!(!state.loading);
    assert_eq!(state.error, Some("Failed to load messages".to_owned()));
}

#[test]
fn cancelled_open_task_leaves_session_untouched() {
    let session = RwSignal::new(ChatSessionState::new(1));
    let conn = RwSignal::new(ChatConnection::default());
    let alive = Arc::new(AtomicBool::new(true));
    let task = open_room(1, identity(), alive.clone(), session, conn);

    // The view moved on to another room before the fetch resolved.
    alive.store(false, Ordering::SeqCst);
    session.set(ChatSessionState::new(2));

    poll_to_completion(task);

    let state = session.get_untracked();
    assert_eq!(state.room_id, 2);
    assert!(state.loading);
    assert_eq!(state.error, None);
}
