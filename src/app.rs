//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::{
    chat_list::ChatListPage, chat_room::ChatRoomPage, login::LoginPage, main::MainPage,
    profile::ProfilePage,
};
use crate::state::auth::AuthState;
use crate::util::session_store::{BrowserStore, SessionStore};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the shared auth context and sets up client-side routing.
/// Page-local state (feed, chat session) lives in the pages themselves
/// because its lifetime is tied to the mounted view.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState {
        identity: None,
        loading: true,
    });
    provide_context(auth);

    // Restore the persisted identity once the browser environment exists.
    Effect::new(move || {
        let identity = BrowserStore.identity().ok();
        auth.update(|a| {
            a.identity = identity;
            a.loading = false;
        });
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/contacto.css"/>
        <Title text="Contacto"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("") view=MainPage/>
                <Route path=StaticSegment("chat") view=ChatListPage/>
                <Route path=(StaticSegment("chat"), ParamSegment("id")) view=ChatRoomPage/>
                <Route path=StaticSegment("profile") view=ProfilePage/>
            </Routes>
        </Router>
    }
}
