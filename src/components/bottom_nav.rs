//! Bottom tab navigation between the feed, chat list, and profile.

use leptos::prelude::*;

/// Fixed bottom navigation bar. `current_path` highlights the active tab.
#[component]
pub fn BottomNav(current_path: &'static str) -> impl IntoView {
    let tab_class = move |path: &str| {
        if path == current_path {
            "bottom-nav__tab bottom-nav__tab--active"
        } else {
            "bottom-nav__tab"
        }
    };

    view! {
        <nav class="bottom-nav">
            <a class=tab_class("/") href="/">
                "Feed"
            </a>
            <a class=tab_class("/chat") href="/chat">
                "Messages"
            </a>
            <a class=tab_class("/profile") href="/profile">
                "Profile"
            </a>
        </nav>
    }
}
