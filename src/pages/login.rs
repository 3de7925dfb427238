//! Login page with an email/password sign-in form.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::api;
use crate::net::types::SignInRequest;
use crate::state::auth::AuthState;
use crate::util::session_store::{BrowserStore, Identity, SessionStore};

/// Login page. Posts credentials, persists the issued identity, and
/// navigates to the feed.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let navigate = use_navigate();

    let submit = Callback::new(move |()| {
        if pending.get_untracked() {
            return;
        }
        let credentials = SignInRequest {
            email: email.get_untracked().trim().to_owned(),
            password: password.get_untracked(),
        };
        if credentials.email.is_empty() || credentials.password.is_empty() {
            error.set(Some("Enter your email and password.".to_owned()));
            return;
        }

        pending.set(true);
        error.set(None);
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match api::sign_in(&credentials).await {
                Ok(resp) => {
                    let identity = Identity {
                        user_id: resp.user_id,
                        access_token: resp.access_token,
                        refresh_token: resp.refresh_token,
                    };
                    BrowserStore.store_identity(&identity);
                    auth.update(|a| {
                        a.identity = Some(identity);
                        a.loading = false;
                    });
                    navigate("/", NavigateOptions::default());
                }
                Err(e) => {
                    pending.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    });

    view! {
        <div class="login-page">
            <h1 class="login-page__title">"Contacto"</h1>
            <p class="login-page__tagline">"Find people to create with"</p>

            <div class="login-page__form">
                <input
                    class="login-page__input"
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="login-page__input"
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            submit.run(());
                        }
                    }
                />

                {move || {
                    error
                        .get()
                        .map(|msg| view! { <p class="login-page__error">{msg}</p> })
                }}

                <button
                    class="btn btn--primary login-page__submit"
                    disabled=move || pending.get()
                    on:click=move |_| submit.run(())
                >
                    {move || if pending.get() { "Signing in..." } else { "Sign In" }}
                </button>
            </div>
        </div>
    }
}
