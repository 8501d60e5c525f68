use axum::{
    extract::{Path, State},
    Json,
};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::handlers::common::{require_field, MessageResponse};
use crate::middlewares::AuthUser;
use crate::models::user::PublicUserResponse;
use crate::models::{CreateProject, Project, ProjectDetail, ProjectWithOwner};
use crate::repositories::ProjectStore;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub likes: Option<i64>,
    #[serde(rename = "codeURL")]
    pub code_url: Option<String>,
    #[serde(rename = "hostedURL")]
    pub hosted_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub likes: Option<i64>,
    #[serde(rename = "codeURL")]
    pub code_url: Option<String>,
    #[serde(rename = "hostedURL")]
    pub hosted_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<i64>,
    #[serde(rename = "codeURL", skip_serializing_if = "Option::is_none")]
    pub code_url: Option<String>,
    #[serde(rename = "hostedURL", skip_serializing_if = "Option::is_none")]
    pub hosted_url: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id.to_hex(),
            title: p.title,
            description: p.description,
            owner: p.owner.to_hex(),
            likes: p.likes,
            code_url: p.code_url,
            hosted_url: p.hosted_url,
            created_at: p.created_at.try_to_rfc3339_string().unwrap_or_default(),
            updated_at: p.updated_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

/// Listing element: project fields plus the joined owner
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectWithOwnerResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<i64>,
    #[serde(rename = "codeURL", skip_serializing_if = "Option::is_none")]
    pub code_url: Option<String>,
    #[serde(rename = "hostedURL", skip_serializing_if = "Option::is_none")]
    pub hosted_url: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicUserResponse>,
}

impl From<ProjectWithOwner> for ProjectWithOwnerResponse {
    fn from(p: ProjectWithOwner) -> Self {
        Self {
            id: p.id.to_hex(),
            title: p.title,
            description: p.description,
            owner: p.owner.to_hex(),
            likes: p.likes,
            code_url: p.code_url,
            hosted_url: p.hosted_url,
            created_at: p.created_at.try_to_rfc3339_string().unwrap_or_default(),
            updated_at: p.updated_at.try_to_rfc3339_string().unwrap_or_default(),
            user: p.user.map(Into::into),
        }
    }
}

/// Detail projection: fixed field set with the owner flattened in
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectDetailResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "createdByUser", skip_serializing_if = "Option::is_none")]
    pub created_by_user: Option<PublicUserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<i64>,
    #[serde(rename = "codeURL", skip_serializing_if = "Option::is_none")]
    pub code_url: Option<String>,
    #[serde(rename = "hostedURL", skip_serializing_if = "Option::is_none")]
    pub hosted_url: Option<String>,
}

impl From<ProjectDetail> for ProjectDetailResponse {
    fn from(p: ProjectDetail) -> Self {
        Self {
            id: p.id.to_hex(),
            title: p.title,
            description: p.description,
            created_by_user: p.created_by_user.map(Into::into),
            likes: p.likes,
            code_url: p.code_url,
            hosted_url: p.hosted_url,
        }
    }
}

/// `{ message, projects }` listing envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectListEnvelope {
    pub message: String,
    pub projects: Vec<ProjectWithOwnerResponse>,
}

/// `{ message, project }` detail envelope
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectDetailEnvelope {
    pub message: String,
    pub project: ProjectDetailResponse,
}

/// `{ message, project }` envelope returned by create and update
#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectEnvelope {
    pub message: String,
    pub project: ProjectResponse,
}

// ============ Handlers ============

/// List all projects with their owners
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "All projects with owner info", body = ProjectListEnvelope)
    ),
    tag = "Projects"
)]
pub async fn list_projects(State(state): State<AppState>) -> AppResult<Json<ProjectListEnvelope>> {
    let projects = state.store.list_projects_with_owner().await?;

    Ok(Json(ProjectListEnvelope {
        message: "Success".to_string(),
        projects: projects.into_iter().map(Into::into).collect(),
    }))
}

/// Get a single project by ID
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project details", body = ProjectDetailEnvelope),
        (status = 401, description = "Invalid project ID")
    ),
    tag = "Projects"
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProjectDetailEnvelope>> {
    let id = ObjectId::parse_str(&id)
        .map_err(|_| AppError::InvalidRequest("ID is invalid".to_string()))?;

    let project = state
        .store
        .project_detail(id)
        .await?
        .ok_or_else(|| AppError::InvalidRequest("ID is invalid".to_string()))?;

    Ok(Json(ProjectDetailEnvelope {
        message: "Success".to_string(),
        project: project.into(),
    }))
}

/// Create a new project owned by the caller
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 200, description = "Project created successfully", body = ProjectEnvelope),
        (status = 401, description = "Missing required fields"),
        (status = 400, description = "Duplicate title for this owner")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn create_project(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> AppResult<Json<ProjectEnvelope>> {
    let title = require_field(payload.title, "Title and description are required")?;
    let description = require_field(payload.description, "Title and description are required")?;

    // Title must be unique among this owner's projects, like repository
    // names under a single account
    let existing = state
        .store
        .find_project_by_owner_and_title(user.id, &title)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Title".to_string()));
    }

    let project = state
        .store
        .create_project(CreateProject {
            title,
            description,
            owner: user.id,
            likes: payload.likes,
            code_url: payload.code_url,
            hosted_url: payload.hosted_url,
        })
        .await?;

    Ok(Json(ProjectEnvelope {
        message: "Project created successfully".to_string(),
        project: project.into(),
    }))
}

/// Update an owned project's details
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated successfully", body = ProjectEnvelope),
        (status = 400, description = "Unknown project or title change attempt"),
        (status = 401, description = "Caller does not own the project")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn update_project(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateProjectRequest>,
) -> AppResult<Json<ProjectEnvelope>> {
    // Malformed and unknown ids are answered alike
    let id = ObjectId::parse_str(&id)
        .map_err(|_| AppError::Validation("Project with this id does not exist".to_string()))?;

    let mut project = state
        .store
        .find_project_by_id(id)
        .await?
        .ok_or_else(|| AppError::Validation("Project with this id does not exist".to_string()))?;

    // A supplied blank title is ignored; a real value is rejected outright
    if payload.title.as_deref().is_some_and(|t| !t.trim().is_empty()) {
        return Err(AppError::Validation("Title cannot be changed".to_string()));
    }

    if project.owner != user.id {
        return Err(AppError::Unauthorized);
    }

    // Shallow overwrite of the supplied fields; anything absent is kept
    if let Some(description) = payload.description {
        project.description = description;
    }
    if let Some(likes) = payload.likes {
        project.likes = Some(likes);
    }
    if let Some(code_url) = payload.code_url {
        project.code_url = Some(code_url);
    }
    if let Some(hosted_url) = payload.hosted_url {
        project.hosted_url = Some(hosted_url);
    }
    project.updated_at = bson::DateTime::now();

    state.store.save_project(&project).await?;

    Ok(Json(ProjectEnvelope {
        message: "Project updated successfully".to_string(),
        project: project.into(),
    }))
}

/// Delete an owned project
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(
        ("id" = String, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted successfully", body = MessageResponse),
        (status = 401, description = "Invalid project ID or caller does not own the project")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn delete_project(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = ObjectId::parse_str(&id)
        .map_err(|_| AppError::InvalidRequest("Project id is invalid".to_string()))?;

    let project = state
        .store
        .find_project_by_id(id)
        .await?
        .ok_or_else(|| AppError::InvalidRequest("Project id is invalid".to_string()))?;

    if project.owner != user.id {
        return Err(AppError::Unauthorized);
    }

    state.store.delete_project(id).await?;

    Ok(Json(MessageResponse::new("Project deleted successfully")))
}
