use super::*;
use crate::net::types::LikeStatus;

fn candidate(id: i64, images: &[&str]) -> Portfolio {
    Portfolio {
        portfolio_id: id,
        user_id: id + 100,
        username: Some(format!("user-{id}")),
        portfolio_image_url: images.iter().map(|s| (*s).to_owned()).collect(),
    }
}

fn feed_with(candidates: Vec<Portfolio>) -> FeedState {
    let mut feed = FeedState::default();
    feed.finish_load(candidates, 1);
    feed
}

// =============================================================
// Advancing
// =============================================================

#[test]
fn advance_steps_through_images_then_pops() {
    // Spec scenario: [{id:1, images:[a,b]}, {id:2, images:[c]}], two
    // advances -> current candidate 2, image index 0.
    let mut feed = feed_with(vec![candidate(1, &["a", "b"]), candidate(2, &["c"])]);

    assert_eq!(feed.advance(), Advance::NextImage);
    assert_eq!(feed.current_image_index, 1);
    assert_eq!(feed.current().map(|p| p.portfolio_id), Some(1));

    assert_eq!(feed.advance(), Advance::NextCandidate);
    assert_eq!(feed.current().map(|p| p.portfolio_id), Some(2));
    assert_eq!(feed.current_image_index, 0);
}

#[test]
fn advance_on_last_candidate_empties_queue_exactly_once() {
    let images = ["a", "b", "c"];
    let mut feed = feed_with(vec![candidate(1, &images)]);

    // imageCount advances: all but the last step through images, the last
    // empties the queue. Never underflows.
    assert_eq!(feed.advance(), Advance::NextImage);
    assert_eq!(feed.advance(), Advance::NextImage);
    assert_eq!(feed.advance(), Advance::QueueEmpty);
    assert!(feed.queue.is_empty());

    assert_eq!(feed.advance(), Advance::NoOp);
    assert!(feed.queue.is_empty());
    assert_eq!(feed.current_image_index, 0);
}

#[test]
fn current_image_follows_index() {
    let mut feed = feed_with(vec![candidate(1, &["a", "b"])]);
    assert_eq!(feed.current_image(), Some("a"));
    feed.advance();
    assert_eq!(feed.current_image(), Some("b"));
}

#[test]
fn current_image_none_when_queue_empty() {
    let feed = FeedState::default();
    assert_eq!(feed.current(), None);
    assert_eq!(feed.current_image(), None);
}

// =============================================================
// Refill
// =============================================================

#[test]
fn needs_refill_at_low_water_mark() {
    let mut feed = feed_with(vec![candidate(1, &["a"]), candidate(2, &["b"])]);
    assert!(!feed.needs_refill());

    feed.advance();
    assert_eq!(feed.queue.len(), 1);
    assert!(feed.needs_refill());
}

#[test]
fn needs_refill_suppressed_while_loading() {
    let mut feed = FeedState::default();
    assert!(feed.begin_load());
    assert!(!feed.needs_refill());
}

#[test]
fn begin_load_guards_concurrent_fetches() {
    let mut feed = FeedState::default();
    assert!(feed.begin_load());
    assert!(!feed.begin_load());

    feed.finish_load(vec![candidate(1, &["a"])], 1);
    assert!(!feed.loading);
    assert!(feed.begin_load());
}

#[test]
fn finish_load_appends_and_tracks_next_page() {
    let mut feed = feed_with(vec![candidate(1, &["a"])]);
    feed.finish_load(vec![candidate(2, &["b"])], 2);
    assert_eq!(feed.queue.len(), 2);
    assert_eq!(feed.next_page, 2);
    // Head unchanged by a refill.
    assert_eq!(feed.current().map(|p| p.portfolio_id), Some(1));
}

#[test]
fn absorb_page_probes_past_empty_pages_then_stops() {
    let mut feed = FeedState::default();
    assert!(feed.begin_load());

    // Empty pages advance the probe, up to the bound.
    let mut page = 0;
    for _ in 0..EMPTY_PAGE_PROBES {
        let next = feed.absorb_page(vec![], page);
        assert_eq!(next, Some(page + 1));
        assert!(feed.loading);
        page += 1;
    }

    // One more empty page settles the load with nothing appended.
    assert_eq!(feed.absorb_page(vec![], page), None);
    assert!(!feed.loading);
    assert!(feed.queue.is_empty());
}

#[test]
fn absorb_page_with_candidates_settles_the_load() {
    let mut feed = FeedState::default();
    assert!(feed.begin_load());

    assert_eq!(feed.absorb_page(vec![], 0), Some(1));
    assert_eq!(feed.absorb_page(vec![candidate(1, &["a"])], 1), None);
    assert!(!feed.loading);
    assert_eq!(feed.queue.len(), 1);
    assert_eq!(feed.next_page, 2);
}

#[test]
fn probe_budget_resets_per_load() {
    let mut feed = FeedState::default();
    assert!(feed.begin_load());
    for page in 0..=EMPTY_PAGE_PROBES {
        feed.absorb_page(vec![], page);
    }
    assert!(!feed.loading);

    // A fresh load gets the full probe budget again.
    assert!(feed.begin_load());
    assert_eq!(feed.absorb_page(vec![], 6), Some(7));
}

#[test]
fn fail_load_sets_error_and_clears_loading() {
    let mut feed = FeedState::default();
    feed.begin_load();
    feed.fail_load("Failed to load portfolios".to_owned());
    assert!(!feed.loading);
    assert_eq!(feed.error.as_deref(), Some("Failed to load portfolios"));
}

// =============================================================
// Decisions
// =============================================================

#[test]
fn record_decision_surfaces_only_mutual_matches() {
    let mut feed = feed_with(vec![candidate(1, &["a"])]);

    feed.record_decision(MatchResult {
        matched: false,
        chat_room_id: None,
        user_portfolios: None,
    });
    assert!(feed.match_result.is_none());

    feed.record_decision(MatchResult {
        matched: true,
        chat_room_id: Some(9),
        user_portfolios: None,
    });
    assert_eq!(
        feed.match_result.as_ref().and_then(|m| m.chat_room_id),
        Some(9)
    );
}

#[test]
fn unmatched_decision_still_advances() {
    // Decide always advances regardless of the match outcome; the page
    // calls record_decision then advance.
    let mut feed = feed_with(vec![candidate(1, &["a"]), candidate(2, &["b"])]);
    feed.record_decision(MatchResult {
        matched: false,
        chat_room_id: None,
        user_portfolios: None,
    });
    assert_eq!(feed.advance(), Advance::NextCandidate);
    assert_eq!(feed.current().map(|p| p.portfolio_id), Some(2));
}

#[test]
fn dismiss_match_discards_result() {
    let mut feed = FeedState::default();
    feed.record_decision(MatchResult {
        matched: true,
        chat_room_id: Some(1),
        user_portfolios: None,
    });
    feed.dismiss_match();
    assert!(feed.match_result.is_none());
}

// =============================================================
// Swipe gesture mapping
// =============================================================

#[test]
fn swipe_right_past_threshold_is_dislike() {
    assert_eq!(swipe_decision(150.0), Some(LikeStatus::Dislike));
}

#[test]
fn swipe_left_past_threshold_is_like() {
    assert_eq!(swipe_decision(-150.0), Some(LikeStatus::Like));
}

#[test]
fn sub_threshold_release_is_noop() {
    assert_eq!(swipe_decision(60.0), None);
    assert_eq!(swipe_decision(-99.9), None);
    assert_eq!(swipe_decision(100.0), None);
}
