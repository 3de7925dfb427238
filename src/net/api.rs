//! REST helpers for the Contacto backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`. Server-side (SSR):
//! stubs returning `ClientError::Network`, since these endpoints are only
//! meaningful in the browser.
//!
//! Authenticated requests carry the raw access token in the `Authorization`
//! header; the backend uses no scheme prefix.

#![allow(clippy::unused_async)]

use crate::config;
use crate::net::error::ClientError;
use crate::net::types::{
    ChatHistory, ChatRoomSummary, LikeRequest, MatchResult, Portfolio, SignInRequest,
    SignInResponse, UserProfile,
};

/// Portfolio page size the feed requests.
pub const PORTFOLIO_PAGE_SIZE: u32 = 3;

#[cfg(feature = "hydrate")]
async fn get_json<T: serde::de::DeserializeOwned>(
    path: &str,
    token: &str,
) -> Result<T, ClientError> {
    let url = format!("{}{path}", config::BASE_URL);
    let resp = gloo_net::http::Request::get(&url)
        .header("Authorization", token)
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;
    if resp.status() == 401 {
        return Err(ClientError::Network(
            "Authentication expired. Please log in again.".to_owned(),
        ));
    }
    if !resp.ok() {
        return Err(ClientError::Network(format!(
            "{path} returned {}",
            resp.status()
        )));
    }
    resp.json::<T>()
        .await
        .map_err(|e| ClientError::Parse(e.to_string()))
}

/// Sign in with email/password credentials.
///
/// # Errors
///
/// `Network` on a rejected request or bad credentials, `Parse` on a
/// malformed response.
pub async fn sign_in(credentials: &SignInRequest) -> Result<SignInResponse, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("{}/api/v1/users/signin", config::BASE_URL);
        let resp = gloo_net::http::Request::post(&url)
            .json(credentials)
            .map_err(|e| ClientError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(ClientError::Network(format!(
                "sign in failed with status {}",
                resp.status()
            )));
        }
        resp.json::<SignInResponse>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = credentials;
        Err(ClientError::Network("not available on server".to_owned()))
    }
}

/// Fetch one page of swipe-feed candidates.
pub async fn fetch_portfolios(token: &str, page: u32) -> Result<Vec<Portfolio>, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        get_json(
            &format!("/api/v1/users/portfolios?page={page}&size={PORTFOLIO_PAGE_SIZE}"),
            token,
        )
        .await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, page);
        Err(ClientError::Network("not available on server".to_owned()))
    }
}

/// Post a like/dislike decision for a candidate.
pub async fn post_decision(token: &str, request: &LikeRequest) -> Result<MatchResult, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("{}/api/v1/users/likes", config::BASE_URL);
        let resp = gloo_net::http::Request::post(&url)
            .header("Authorization", token)
            .json(request)
            .map_err(|e| ClientError::Parse(e.to_string()))?
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(ClientError::Network(format!(
                "likes returned {}",
                resp.status()
            )));
        }
        resp.json::<MatchResult>()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, request);
        Err(ClientError::Network("not available on server".to_owned()))
    }
}

/// Fetch one page of the signed-in user's chat rooms.
pub async fn fetch_chat_rooms(
    token: &str,
    page: u32,
    size: u32,
) -> Result<Vec<ChatRoomSummary>, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        get_json(
            &format!("/api/v1/users/me/chatroom?page={page}&size={size}"),
            token,
        )
        .await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, page, size);
        Err(ClientError::Network("not available on server".to_owned()))
    }
}

/// Fetch the participant list and message backlog for a chat room.
pub async fn fetch_chat_history(token: &str, room_id: i64) -> Result<ChatHistory, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        get_json(&format!("/api/v1/users/me/chatroom/{room_id}"), token).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, room_id);
        Err(ClientError::Network("not available on server".to_owned()))
    }
}

/// Fetch the signed-in user's own profile.
pub async fn fetch_my_profile(token: &str) -> Result<UserProfile, ClientError> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/api/v1/users/me", token).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        Err(ClientError::Network("not available on server".to_owned()))
    }
}
