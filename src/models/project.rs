use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::user::PublicUser;

/// Project document in the `projects` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    /// Owning user; set once at creation and never updated afterwards.
    pub owner: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<i64>,
    #[serde(rename = "codeURL", skip_serializing_if = "Option::is_none")]
    pub code_url: Option<String>,
    #[serde(rename = "hostedURL", skip_serializing_if = "Option::is_none")]
    pub hosted_url: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: bson::DateTime,
}

/// Project creation DTO (without id and timestamps)
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub owner: ObjectId,
    pub likes: Option<i64>,
    pub code_url: Option<String>,
    pub hosted_url: Option<String>,
}

/// Listing shape: a project joined with its owner's public fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectWithOwner {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    pub owner: ObjectId,
    pub likes: Option<i64>,
    #[serde(rename = "codeURL")]
    pub code_url: Option<String>,
    #[serde(rename = "hostedURL")]
    pub hosted_url: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: bson::DateTime,
    /// Joined owner document; absent when the owning user was deleted.
    pub user: Option<PublicUser>,
}

/// Detail shape for a single project lookup. The projection is fixed and
/// drops timestamps and the raw owner id in favour of the joined user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: String,
    #[serde(rename = "createdByUser")]
    pub created_by_user: Option<PublicUser>,
    pub likes: Option<i64>,
    #[serde(rename = "codeURL")]
    pub code_url: Option<String>,
    #[serde(rename = "hostedURL")]
    pub hosted_url: Option<String>,
}
