//! Swipe card showing the current candidate's active portfolio image.

use leptos::prelude::*;

use crate::net::types::Portfolio;

/// Full-bleed card for the candidate at the head of the feed queue.
///
/// Tracks a horizontal pointer drag and reports the release offset through
/// `on_release`; the page decides whether the drag crossed the decision
/// threshold. Also renders the `current/total` image position badge.
#[component]
pub fn SwipeCard(
    portfolio: Portfolio,
    image_index: usize,
    on_release: Callback<f64>,
    on_tap: Callback<()>,
) -> impl IntoView {
    let drag_start = RwSignal::new(None::<f64>);

    let image_url = portfolio
        .portfolio_image_url
        .get(image_index)
        .cloned()
        .unwrap_or_else(|| "/placeholder.svg".to_owned());
    let image_count = portfolio.portfolio_image_url.len();
    let alt = format!("Portfolio {}", portfolio.portfolio_id);

    let on_pointer_down = move |ev: leptos::ev::PointerEvent| {
        drag_start.set(Some(f64::from(ev.client_x())));
    };

    let on_pointer_up = move |ev: leptos::ev::PointerEvent| {
        let Some(start) = drag_start.get_untracked() else {
            return;
        };
        drag_start.set(None);
        let offset = f64::from(ev.client_x()) - start;
        // A release without horizontal travel is a tap on the image.
        if offset == 0.0 {
            on_tap.run(());
        } else {
            on_release.run(offset);
        }
    };

    let on_pointer_cancel = move |_ev: leptos::ev::PointerEvent| {
        drag_start.set(None);
    };

    view! {
        <div
            class="swipe-card"
            on:pointerdown=on_pointer_down
            on:pointerup=on_pointer_up
            on:pointercancel=on_pointer_cancel
        >
            <img class="swipe-card__image" src=image_url alt=alt draggable="false"/>

            <div class="swipe-card__position">
                <span>{format!("{}/{image_count}", image_index + 1)}</span>
            </div>
        </div>
    }
}
