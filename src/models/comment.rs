use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Comment document in the `comments` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub message: String,
    #[serde(rename = "byUser")]
    pub by_user: ObjectId,
    #[serde(rename = "toProject")]
    pub to_project: ObjectId,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: bson::DateTime,
}

/// Author fields joined into comment listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentAuthor {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
}

/// Commented project fields joined into comment listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentProject {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
}

/// Listing shape: a comment joined with its author and its project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentWithContext {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub message: String,
    #[serde(rename = "byUser")]
    pub by_user: ObjectId,
    #[serde(rename = "toProject")]
    pub to_project: ObjectId,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: bson::DateTime,
    #[serde(rename = "commentByUser")]
    pub comment_by_user: Option<CommentAuthor>,
    #[serde(rename = "commentToProject")]
    pub comment_to_project: Option<ParentProject>,
}
