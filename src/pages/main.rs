//! Main page: the swipe feed.
//!
//! Owns the candidate queue for the lifetime of the view. Queue transitions
//! live in `state::feed`; this page wires them to the portfolio endpoint,
//! the swipe gesture, and the match modal.

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::components::bottom_nav::BottomNav;
use crate::components::match_modal::MatchModal;
use crate::components::swipe_card::SwipeCard;
use crate::net::api;
use crate::net::error::ClientError;
use crate::net::types::{LikeRequest, LikeStatus};
use crate::state::auth::AuthState;
use crate::state::feed::{FeedState, swipe_decision};

/// Fetch one feed page, probing past empty pages before giving up.
///
/// Re-entrant calls are ignored via the feed's loading guard; the probe
/// bookkeeping itself lives in `FeedState::absorb_page`. A run of empty
/// pages is not an error the user sees; it only leaves the queue as it
/// was, logged.
async fn load_page(feed: RwSignal<FeedState>, token: String, start_page: u32) {
    if !feed.try_update(FeedState::begin_load).unwrap_or(false) {
        return;
    }

    let mut page = start_page;
    loop {
        match api::fetch_portfolios(&token, page).await {
            Ok(candidates) => {
                let exhausted = candidates.is_empty();
                match feed.try_update(|f| f.absorb_page(candidates, page)).flatten() {
                    Some(next) => page = next,
                    None => {
                        if exhausted {
                            leptos::logging::log!("no more portfolios past page {start_page}");
                        }
                        return;
                    }
                }
            }
            Err(e) => {
                leptos::logging::warn!("portfolio page {page} failed: {e}");
                feed.update(|f| f.fail_load("Failed to load portfolios".to_owned()));
                return;
            }
        }
    }
}

/// Advance the feed one step and kick off a refill when the queue has
/// drained to the low-water mark. The refill never blocks the advance.
fn advance_feed(feed: RwSignal<FeedState>, token: String) {
    feed.update(|f| {
        f.advance();
    });
    if feed.with_untracked(FeedState::needs_refill) {
        let page = feed.with_untracked(|f| f.next_page);
        leptos::task::spawn_local(load_page(feed, token, page));
    }
}

/// Swipe feed page.
#[component]
pub fn MainPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let feed = RwSignal::new(FeedState::default());

    // Redirect to login if not authenticated.
    let navigate = leptos_router::hooks::use_navigate();
    Effect::new(move || {
        let state = auth.get();
        if !state.loading && state.identity.is_none() {
            navigate("/login", NavigateOptions::default());
        }
    });

    // Initial page load, once the identity is available.
    let initial_load_done = RwSignal::new(false);
    Effect::new(move || {
        let state = auth.get();
        if state.loading || initial_load_done.get_untracked() {
            return;
        }
        let Some(identity) = state.identity else {
            return;
        };
        initial_load_done.set(true);
        leptos::task::spawn_local(load_page(feed, identity.access_token, 0));
    });

    // Post a decision for the current candidate, surface a match, advance.
    let decide = move |status: LikeStatus| {
        let Some(candidate) = feed.with_untracked(|f| f.current().cloned()) else {
            return;
        };
        let Some(identity) = auth.with_untracked(|a| a.identity.clone()) else {
            feed.update(|f| f.error = Some(ClientError::AuthMissing.to_string()));
            return;
        };

        leptos::task::spawn_local(async move {
            let request = LikeRequest {
                liked_user_id: candidate.user_id,
                status,
            };
            match api::post_decision(&identity.access_token, &request).await {
                Ok(result) => {
                    feed.update(|f| f.record_decision(result));
                    advance_feed(feed, identity.access_token);
                }
                Err(e) => {
                    leptos::logging::warn!("decision failed: {e}");
                    feed.update(|f| f.error = Some("Failed to send like/dislike".to_owned()));
                }
            }
        });
    };

    let on_release = Callback::new(move |offset_x: f64| {
        if let Some(status) = swipe_decision(offset_x) {
            decide(status);
        }
    });

    // Tapping the card steps through the candidate's images.
    let on_tap = Callback::new(move |()| {
        let Some(identity) = auth.with_untracked(|a| a.identity.clone()) else {
            return;
        };
        advance_feed(feed, identity.access_token);
    });

    let on_dismiss_match = Callback::new(move |()| {
        feed.update(FeedState::dismiss_match);
    });

    view! {
        <div class="main-page">
            <header class="main-page__header">
                <h1 class="main-page__title">
                    {move || {
                        let owner = feed
                            .get()
                            .current()
                            .and_then(|p| p.username.clone())
                            .unwrap_or_else(|| "Unknown User".to_owned());
                        format!("Profile by {owner}")
                    }}
                </h1>
            </header>

            <main class="main-page__stage">
                {move || {
                    let state = feed.get();
                    if let Some(error) = state.error.clone() {
                        return view! { <div class="main-page__notice">{error}</div> }.into_any();
                    }
                    if state.loading && state.queue.is_empty() {
                        return view! { <div class="main-page__notice">"Loading..."</div> }
                            .into_any();
                    }
                    let Some(current) = state.current().cloned() else {
                        return view! {
                            <div class="main-page__notice">"No portfolios available"</div>
                        }
                            .into_any();
                    };

                    view! {
                        <SwipeCard
                            portfolio=current
                            image_index=state.current_image_index
                            on_release=on_release
                            on_tap=on_tap
                        />

                        <div class="main-page__actions">
                            <button
                                class="main-page__action main-page__action--dislike"
                                on:click=move |_| decide(LikeStatus::Dislike)
                            >
                                "X"
                            </button>
                            <button
                                class="main-page__action main-page__action--like"
                                on:click=move |_| decide(LikeStatus::Like)
                            >
                                "O"
                            </button>
                        </div>
                    }
                        .into_any()
                }}
            </main>

            {move || {
                feed.get()
                    .match_result
                    .map(|result| {
                        view! { <MatchModal result=result on_close=on_dismiss_match/> }
                    })
            }}

            <BottomNav current_path="/"/>
        </div>
    }
}
