use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Reply document in the `replies` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub message: String,
    #[serde(rename = "byUser")]
    pub by_user: ObjectId,
    #[serde(rename = "toComment")]
    pub to_comment: ObjectId,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: bson::DateTime,
}

/// Author fields joined into reply listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyAuthor {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
}

/// Replied-to comment fields joined into reply listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentComment {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub message: String,
}

/// Listing shape: a reply joined with its author and its parent comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyWithContext {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub message: String,
    #[serde(rename = "byUser")]
    pub by_user: ObjectId,
    #[serde(rename = "toComment")]
    pub to_comment: ObjectId,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: bson::DateTime,
    #[serde(rename = "replyByUser")]
    pub reply_by_user: Option<ReplyAuthor>,
    #[serde(rename = "replyToComment")]
    pub reply_to_comment: Option<ParentComment>,
}
