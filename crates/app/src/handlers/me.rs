//! **GET /me** echoes the identity of the authenticated caller

use axum::Json;
use chrono::{DateTime, Utc};
use keystone_auth::{AuthClaims, Content};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub subject: String,
    pub audience: Vec<String>,
    pub token_id: Uuid,
    pub expires_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Content::is_empty")]
    pub content: Content,
}

pub async fn me(AuthClaims(claims): AuthClaims) -> Json<MeResponse> {
    Json(MeResponse {
        subject: claims.subject,
        audience: claims.audience,
        token_id: claims.id,
        expires_at: claims.expires_at,
        content: claims.content,
    })
}
