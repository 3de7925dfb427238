//! Profile page for the signed-in user.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::bottom_nav::BottomNav;
use crate::net::api;
use crate::net::error::ClientError;
use crate::net::types::{UserProfile, purpose_label};
use crate::state::auth::AuthState;
use crate::util::session_store::{BrowserStore, SessionStore};

/// Profile page: portfolio images, talents and purposes of the signed-in
/// user, plus sign-out.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    // Redirect to login if not authenticated.
    {
        let navigate = use_navigate();
        Effect::new(move || {
            let state = auth.get();
            if !state.loading && state.identity.is_none() {
                navigate("/login", NavigateOptions::default());
            }
        });
    }

    let profile = LocalResource::new(move || {
        let token = auth
            .get()
            .identity
            .map(|i| i.access_token)
            .ok_or(ClientError::AuthMissing);
        async move { api::fetch_my_profile(&token?).await }
    });

    let navigate = use_navigate();
    let sign_out = move |_| {
        BrowserStore.clear_identity();
        auth.update(|state| state.identity = None);
        navigate("/login", NavigateOptions::default());
    };

    view! {
        <div class="profile-page">
            <header class="profile-page__header">
                <h1>"Profile"</h1>
                <button class="profile-page__sign-out" on:click=sign_out>
                    "Sign out"
                </button>
            </header>

            <Suspense fallback=move || {
                view! { <div class="profile-page__notice">"Loading..."</div> }
            }>
                {move || {
                    profile
                        .get()
                        .map(|result| match result {
                            Ok(user) => profile_body(&user).into_any(),
                            Err(e) => {
                                view! {
                                    <div class="profile-page__notice profile-page__notice--error">
                                        {e.to_string()}
                                    </div>
                                }
                                    .into_any()
                            }
                        })
                }}
            </Suspense>

            <BottomNav current_path="/profile"/>
        </div>
    }
}

fn profile_body(user: &UserProfile) -> impl IntoView {
    let images = user
        .user_portfolio
        .as_ref()
        .map(|p| p.portfolio_images.clone())
        .unwrap_or_default();
    let talents = user
        .user_talents
        .iter()
        .map(|t| t.talent_type.clone())
        .collect::<Vec<_>>();
    let purposes = user
        .user_purposes
        .iter()
        .map(|&p| purpose_label(p))
        .collect::<Vec<_>>();

    let username = user.username.clone();
    let description = user.description.clone();
    let instagram_id = user.instagram_id.clone();
    let web_url = user.web_url.clone();

    view! {
        <div class="profile-page__body">
            <div class="profile-page__images">
                {images
                    .into_iter()
                    .map(|url| {
                        view! { <img class="profile-page__image" src=url alt="portfolio"/> }
                    })
                    .collect::<Vec<_>>()}
            </div>

            <h2 class="profile-page__username">{username}</h2>

            {description
                .map(|text| view! { <p class="profile-page__description">{text}</p> })}

            <div class="profile-page__links">
                {instagram_id
                    .map(|id| {
                        let href = format!("https://instagram.com/{id}");
                        view! {
                            <a class="profile-page__link" href=href target="_blank">
                                {format!("@{id}")}
                            </a>
                        }
                    })}
                {web_url
                    .map(|url| {
                        view! {
                            <a class="profile-page__link" href=url.clone() target="_blank">
                                {url.clone()}
                            </a>
                        }
                    })}
            </div>

            <div class="profile-page__section">
                <h3>"Talents"</h3>
                <div class="profile-page__tags">
                    {talents
                        .into_iter()
                        .map(|talent| view! { <span class="profile-page__tag">{talent}</span> })
                        .collect::<Vec<_>>()}
                </div>
            </div>

            <div class="profile-page__section">
                <h3>"Purposes"</h3>
                <div class="profile-page__tags">
                    {purposes
                        .into_iter()
                        .map(|purpose| view! { <span class="profile-page__tag">{purpose}</span> })
                        .collect::<Vec<_>>()}
                </div>
            </div>
        </div>
    }
}
