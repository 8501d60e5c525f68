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
use crate::models::{Comment, CommentAuthor, CommentWithContext, ParentProject};
use crate::repositories::{CommentStore, ProjectStore};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListCommentsRequest {
    #[serde(rename = "projectId")]
    pub project_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    #[serde(rename = "projectId")]
    pub project_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCommentRequest {
    #[serde(rename = "projectId")]
    pub project_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: String,
    pub message: String,
    #[serde(rename = "byUser")]
    pub by_user: String,
    #[serde(rename = "toProject")]
    pub to_project: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id.to_hex(),
            message: c.message,
            by_user: c.by_user.to_hex(),
            to_project: c.to_project.to_hex(),
            created_at: c.created_at.try_to_rfc3339_string().unwrap_or_default(),
            updated_at: c.updated_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentAuthorResponse {
    pub id: String,
    pub username: String,
}

impl From<CommentAuthor> for CommentAuthorResponse {
    fn from(a: CommentAuthor) -> Self {
        Self {
            id: a.id.to_hex(),
            username: a.username,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParentProjectResponse {
    pub id: String,
    pub title: String,
}

impl From<ParentProject> for ParentProjectResponse {
    fn from(p: ParentProject) -> Self {
        Self {
            id: p.id.to_hex(),
            title: p.title,
        }
    }
}

/// Listing element: comment fields plus the joined author and project
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentWithContextResponse {
    pub id: String,
    pub message: String,
    #[serde(rename = "byUser")]
    pub by_user: String,
    #[serde(rename = "toProject")]
    pub to_project: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    #[serde(rename = "commentByUser", skip_serializing_if = "Option::is_none")]
    pub comment_by_user: Option<CommentAuthorResponse>,
    #[serde(rename = "commentToProject", skip_serializing_if = "Option::is_none")]
    pub comment_to_project: Option<ParentProjectResponse>,
}

impl From<CommentWithContext> for CommentWithContextResponse {
    fn from(c: CommentWithContext) -> Self {
        Self {
            id: c.id.to_hex(),
            message: c.message,
            by_user: c.by_user.to_hex(),
            to_project: c.to_project.to_hex(),
            created_at: c.created_at.try_to_rfc3339_string().unwrap_or_default(),
            updated_at: c.updated_at.try_to_rfc3339_string().unwrap_or_default(),
            comment_by_user: c.comment_by_user.map(Into::into),
            comment_to_project: c.comment_to_project.map(Into::into),
        }
    }
}

/// `{ message, comments }` listing envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentListEnvelope {
    pub message: String,
    pub comments: Vec<CommentWithContextResponse>,
}

/// `{ message, comment }` envelope returned by create
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentEnvelope {
    pub message: String,
    pub comment: CommentResponse,
}

/// Narrow comment shape returned by update
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatedCommentResponse {
    pub message: String,
    pub id: String,
}

/// `{ message, comment }` envelope returned by update
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentUpdateEnvelope {
    pub message: String,
    pub comment: UpdatedCommentResponse,
}

// ============ Handlers ============

/// List all comments on a project
#[utoipa::path(
    get,
    path = "/api/comments",
    request_body = ListCommentsRequest,
    responses(
        (status = 200, description = "Comments with author and project info", body = CommentListEnvelope),
        (status = 401, description = "Missing or invalid project ID"),
        (status = 404, description = "No comments for this project")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Comments"
)]
pub async fn list_comments(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<ListCommentsRequest>,
) -> AppResult<Json<CommentListEnvelope>> {
    let project_id = require_field(payload.project_id, "Invalid request")?;
    let project_id = ObjectId::parse_str(&project_id)
        .map_err(|_| AppError::InvalidRequest("Invalid request".to_string()))?;

    let comments = state.store.list_comments_for_project(project_id).await?;

    // A project with no comments is reported as missing, not as an empty list
    if comments.is_empty() {
        return Err(AppError::NotFound("Comments".to_string()));
    }

    Ok(Json(CommentListEnvelope {
        message: "Success".to_string(),
        comments: comments.into_iter().map(Into::into).collect(),
    }))
}

/// Comment on a project
#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "Comment created successfully", body = CommentEnvelope),
        (status = 401, description = "Missing fields or unknown project")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Comments"
)]
pub async fn create_comment(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateCommentRequest>,
) -> AppResult<Json<CommentEnvelope>> {
    let project_id = require_field(payload.project_id, "Invalid request")?;
    let message = require_message(payload.message, "Write comment message")?;

    // The project must exist before a comment is attached to it
    let project_id = ObjectId::parse_str(&project_id)
        .map_err(|_| AppError::InvalidRequest("Invalid project".to_string()))?;
    let project = state
        .store
        .find_project_by_id(project_id)
        .await?
        .ok_or_else(|| AppError::InvalidRequest("Invalid project".to_string()))?;

    let comment = state
        .store
        .create_comment(&message, user.id, project.id)
        .await?;

    Ok(Json(CommentEnvelope {
        message: "Comment created successfully".to_string(),
        comment: comment.into(),
    }))
}

/// Update an own comment's message
#[utoipa::path(
    put,
    path = "/api/comments/{id}",
    params(
        ("id" = String, Path, description = "Comment ID")
    ),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated successfully", body = CommentUpdateEnvelope),
        (status = 401, description = "Missing fields, unknown comment or caller is not the author")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Comments"
)]
pub async fn update_comment(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCommentRequest>,
) -> AppResult<Json<CommentUpdateEnvelope>> {
    // projectId must accompany the update though only its presence matters
    require_field(payload.project_id, "Invalid request")?;
    let message = require_message(payload.message, "Write comment message")?;

    let id = ObjectId::parse_str(&id)
        .map_err(|_| AppError::InvalidRequest("Invalid comment".to_string()))?;
    let mut comment = state
        .store
        .find_comment_by_id(id)
        .await?
        .ok_or_else(|| AppError::InvalidRequest("Invalid comment".to_string()))?;

    if comment.by_user != user.id {
        return Err(AppError::Unauthorized);
    }

    comment.message = message;
    comment.updated_at = bson::DateTime::now();
    state.store.save_comment(&comment).await?;

    // Narrow response shape; the rest of the record stays private
    Ok(Json(CommentUpdateEnvelope {
        message: "Comment updated successfully".to_string(),
        comment: UpdatedCommentResponse {
            message: comment.message,
            id: comment.id.to_hex(),
        },
    }))
}

/// Delete an own comment
#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    params(
        ("id" = String, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment deleted successfully", body = MessageResponse),
        (status = 401, description = "Unknown comment or caller is not the author")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Comments"
)]
pub async fn delete_comment(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = ObjectId::parse_str(&id)
        .map_err(|_| AppError::InvalidRequest("Invalid comment".to_string()))?;

    let comment = state
        .store
        .find_comment_by_id(id)
        .await?
        .ok_or_else(|| AppError::InvalidRequest("Invalid comment".to_string()))?;

    if comment.by_user != user.id {
        return Err(AppError::Unauthorized);
    }

    state.store.delete_comment(id).await?;

    Ok(Json(MessageResponse::new("Comment deleted successfully")))
}
