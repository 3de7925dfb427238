//! Wire types for the Contacto REST and chat contracts.
//!
//! Field names follow the backend's camelCase JSON (including the historical
//! `sendedId` spelling for the recipient), so every struct carries explicit
//! serde renames rather than trusting a blanket rename rule.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// A candidate profile shown in the swipe feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(rename = "portfolioId")]
    pub portfolio_id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(rename = "portfolioImageUrl", default)]
    pub portfolio_image_url: Vec<String>,
}

/// Like/dislike decision sent for the current candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LikeStatus {
    #[serde(rename = "LIKE")]
    Like,
    #[serde(rename = "DISLIKE")]
    Dislike,
}

/// Body of `POST /api/v1/users/likes`.
#[derive(Clone, Debug, Serialize)]
pub struct LikeRequest {
    #[serde(rename = "likedUserId")]
    pub liked_user_id: i64,
    pub status: LikeStatus,
}

/// Counterpart portfolio embedded in a match response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPortfolio {
    #[serde(rename = "portfolioId")]
    pub portfolio_id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(rename = "portfolioImages", default)]
    pub portfolio_images: Vec<String>,
}

/// Response to a like/dislike decision. Ephemeral: shown once in the match
/// modal, discarded on dismissal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: bool,
    #[serde(rename = "chatRoomId", default)]
    pub chat_room_id: Option<i64>,
    #[serde(rename = "userPortfolios", default)]
    pub user_portfolios: Option<Vec<MatchPortfolio>>,
}

/// One chat room row in the chat list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRoomSummary {
    pub id: i64,
    pub title: String,
    #[serde(rename = "chatRoomThumbnail", default)]
    pub chat_room_thumbnail: Option<String>,
    #[serde(rename = "unreadMessageCount", default)]
    pub unread_message_count: u32,
    #[serde(rename = "latestMessageContent", default)]
    pub latest_message_content: Option<String>,
}

/// A persisted chat message as the server sends it, both in the backlog
/// response and in live broadcast frames.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub id: i64,
    pub content: String,
    #[serde(rename = "senderId")]
    pub sender_id: i64,
    // Server contract spells the recipient field "sendedId".
    #[serde(rename = "sendedId")]
    pub recipient_id: i64,
    #[serde(rename = "chatRoomId")]
    pub chat_room_id: i64,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Response of `GET /api/v1/users/me/chatroom/{roomId}`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ChatHistory {
    #[serde(default)]
    pub participants: Vec<i64>,
    #[serde(default)]
    pub messages: Vec<WireMessage>,
}

/// One translated copy delivered on the translation queue.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TranslatedMessage {
    pub id: i64,
    pub message: String,
}

/// Body of `POST /api/v1/users/signin`.
#[derive(Clone, Debug, Serialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Response of `POST /api/v1/users/signin`.
#[derive(Clone, Debug, Deserialize)]
pub struct SignInResponse {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// The signed-in user's portfolio block in the profile response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ProfilePortfolio {
    #[serde(rename = "portfolioId")]
    pub portfolio_id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "portfolioImages", default)]
    pub portfolio_images: Vec<String>,
}

/// A talent tag on the signed-in user's profile.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UserTalent {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "talentType")]
    pub talent_type: String,
}

/// Response of `GET /api/v1/users/me`.
#[derive(Clone, Debug, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "instagramId", default)]
    pub instagram_id: Option<String>,
    #[serde(rename = "webUrl", default)]
    pub web_url: Option<String>,
    #[serde(rename = "userPortfolio", default)]
    pub user_portfolio: Option<ProfilePortfolio>,
    #[serde(rename = "userPurposes", default)]
    pub user_purposes: Vec<i64>,
    #[serde(rename = "userTalents", default)]
    pub user_talents: Vec<UserTalent>,
}

/// Human-readable label for a purpose id, per the onboarding purpose list.
pub fn purpose_label(purpose: i64) -> &'static str {
    match purpose {
        0 => "Get Along With U",
        1 => "Collaborate Project",
        2 => "Art Residency",
        3 => "Make New Brand",
        4 => "Group exhibition",
        _ => "Unknown",
    }
}
