use axum::{
    extract::{Path, State},
    Json,
};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::handlers::common::{require_field, require_message, MessageResponse};
use crate::middlewares::AuthUser;
use crate::models::{ParentComment, Reply, ReplyAuthor, ReplyWithContext};
use crate::repositories::{CommentStore, ReplyStore};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListRepliesRequest {
    #[serde(rename = "commentId")]
    pub comment_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReplyRequest {
    #[serde(rename = "commentId")]
    pub comment_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReplyRequest {
    #[serde(rename = "commentId")]
    pub comment_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReplyResponse {
    pub id: String,
    pub message: String,
    #[serde(rename = "byUser")]
    pub by_user: String,
    #[serde(rename = "toComment")]
    pub to_comment: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl From<Reply> for ReplyResponse {
    fn from(r: Reply) -> Self {
        Self {
            id: r.id.to_hex(),
            message: r.message,
            by_user: r.by_user.to_hex(),
            to_comment: r.to_comment.to_hex(),
            created_at: r.created_at.try_to_rfc3339_string().unwrap_or_default(),
            updated_at: r.updated_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReplyAuthorResponse {
    pub id: String,
    pub username: String,
}

impl From<ReplyAuthor> for ReplyAuthorResponse {
    fn from(a: ReplyAuthor) -> Self {
        Self {
            id: a.id.to_hex(),
            username: a.username,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParentCommentResponse {
    pub id: String,
    pub message: String,
}

impl From<ParentComment> for ParentCommentResponse {
    fn from(c: ParentComment) -> Self {
        Self {
            id: c.id.to_hex(),
            message: c.message,
        }
    }
}

/// Listing element: reply fields plus the joined author and parent comment
#[derive(Debug, Serialize, ToSchema)]
pub struct ReplyWithContextResponse {
    pub id: String,
    pub message: String,
    #[serde(rename = "byUser")]
    pub by_user: String,
    #[serde(rename = "toComment")]
    pub to_comment: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    #[serde(rename = "replyByUser", skip_serializing_if = "Option::is_none")]
    pub reply_by_user: Option<ReplyAuthorResponse>,
    #[serde(rename = "replyToComment", skip_serializing_if = "Option::is_none")]
    pub reply_to_comment: Option<ParentCommentResponse>,
}

impl From<ReplyWithContext> for ReplyWithContextResponse {
    fn from(r: ReplyWithContext) -> Self {
        Self {
            id: r.id.to_hex(),
            message: r.message,
            by_user: r.by_user.to_hex(),
            to_comment: r.to_comment.to_hex(),
            created_at: r.created_at.try_to_rfc3339_string().unwrap_or_default(),
            updated_at: r.updated_at.try_to_rfc3339_string().unwrap_or_default(),
            reply_by_user: r.reply_by_user.map(Into::into),
            reply_to_comment: r.reply_to_comment.map(Into::into),
        }
    }
}

/// `{ message, replies }` listing envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct ReplyListEnvelope {
    pub message: String,
    pub replies: Vec<ReplyWithContextResponse>,
}

/// `{ message, reply }` envelope returned by create
#[derive(Debug, Serialize, ToSchema)]
pub struct ReplyEnvelope {
    pub message: String,
    pub reply: ReplyResponse,
}

/// Narrow reply shape returned by update
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatedReplyResponse {
    pub message: String,
    pub id: String,
}

/// `{ message, reply }` envelope returned by update
#[derive(Debug, Serialize, ToSchema)]
pub struct ReplyUpdateEnvelope {
    pub message: String,
    pub reply: UpdatedReplyResponse,
}

// ============ Handlers ============

/// List all replies to a comment
#[utoipa::path(
    get,
    path = "/api/replies",
    request_body = ListRepliesRequest,
    responses(
        (status = 200, description = "Replies with author and comment info", body = ReplyListEnvelope),
        (status = 401, description = "Missing or invalid comment ID"),
        (status = 404, description = "No replies for this comment")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Replies"
)]
pub async fn list_replies(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<ListRepliesRequest>,
) -> AppResult<Json<ReplyListEnvelope>> {
    let comment_id = require_field(payload.comment_id, "Invalid request")?;
    let comment_id = ObjectId::parse_str(&comment_id)
        .map_err(|_| AppError::InvalidRequest("Invalid request".to_string()))?;

    let replies = state.store.list_replies_for_comment(comment_id).await?;

    // A comment with no replies is reported as missing, not as an empty list
    if replies.is_empty() {
        return Err(AppError::NotFound("Replies".to_string()));
    }

    Ok(Json(ReplyListEnvelope {
        message: "Success".to_string(),
        replies: replies.into_iter().map(Into::into).collect(),
    }))
}

/// Reply to a comment
#[utoipa::path(
    post,
    path = "/api/replies",
    request_body = CreateReplyRequest,
    responses(
        (status = 200, description = "Reply created successfully", body = ReplyEnvelope),
        (status = 401, description = "Missing fields or unknown comment")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Replies"
)]
pub async fn create_reply(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateReplyRequest>,
) -> AppResult<Json<ReplyEnvelope>> {
    let comment_id = require_field(payload.comment_id, "Invalid request")?;
    let message = require_message(payload.message, "Write reply message")?;

    // The parent comment must exist before a reply is attached to it
    let comment_id = ObjectId::parse_str(&comment_id)
        .map_err(|_| AppError::InvalidRequest("Invalid comment".to_string()))?;
    let comment = state
        .store
        .find_comment_by_id(comment_id)
        .await?
        .ok_or_else(|| AppError::InvalidRequest("Invalid comment".to_string()))?;

    let reply = state.store.create_reply(&message, user.id, comment.id).await?;

    Ok(Json(ReplyEnvelope {
        message: "Reply created successfully".to_string(),
        reply: reply.into(),
    }))
}

/// Update an own reply's message
#[utoipa::path(
    put,
    path = "/api/replies/{id}",
    params(
        ("id" = String, Path, description = "Reply ID")
    ),
    request_body = UpdateReplyRequest,
    responses(
        (status = 200, description = "Reply updated successfully", body = ReplyUpdateEnvelope),
        (status = 401, description = "Missing fields, unknown reply or caller is not the author")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Replies"
)]
pub async fn update_reply(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateReplyRequest>,
) -> AppResult<Json<ReplyUpdateEnvelope>> {
    // commentId must accompany the update though only its presence matters
    require_field(payload.comment_id, "Invalid request")?;
    let message = require_message(payload.message, "Write reply message")?;

    let id = ObjectId::parse_str(&id)
        .map_err(|_| AppError::InvalidRequest("Invalid reply".to_string()))?;
    let mut reply = state
        .store
        .find_reply_by_id(id)
        .await?
        .ok_or_else(|| AppError::InvalidRequest("Invalid reply".to_string()))?;

    if reply.by_user != user.id {
        return Err(AppError::Unauthorized);
    }

    reply.message = message;
    reply.updated_at = bson::DateTime::now();
    state.store.save_reply(&reply).await?;

    // Narrow response shape; the rest of the record stays private
    Ok(Json(ReplyUpdateEnvelope {
        message: "Reply updated successfully".to_string(),
        reply: UpdatedReplyResponse {
            message: reply.message,
            id: reply.id.to_hex(),
        },
    }))
}

/// Delete an own reply
#[utoipa::path(
    delete,
    path = "/api/replies/{id}",
    params(
        ("id" = String, Path, description = "Reply ID")
    ),
    responses(
        (status = 200, description = "Reply deleted successfully", body = MessageResponse),
        (status = 401, description = "Unknown reply or caller is not the author")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Replies"
)]
pub async fn delete_reply(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = ObjectId::parse_str(&id)
        .map_err(|_| AppError::InvalidRequest("Invalid reply".to_string()))?;

    let reply = state
        .store
        .find_reply_by_id(id)
        .await?
        .ok_or_else(|| AppError::InvalidRequest("Invalid reply".to_string()))?;

    if reply.by_user != user.id {
        return Err(AppError::Unauthorized);
    }

    state.store.delete_reply(id).await?;

    Ok(Json(MessageResponse::new("Reply deleted successfully")))
}
