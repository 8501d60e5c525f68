use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User document in the `users` collection.
///
/// The password hash is stored under the legacy `password` field name and is
/// never returned by handlers; responses go through [`UserResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    #[serde(rename = "createdAt")]
    pub created_at: bson::DateTime,
    #[serde(rename = "updatedAt")]
    pub updated_at: bson::DateTime,
}

/// User creation DTO (without id and timestamps)
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Public user response (safe to return via API)
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            username: user.username,
            email: user.email,
            created_at: user.created_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

/// Owner fields joined into project listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub email: String,
}

/// JSON shape of [`PublicUser`] in API responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<PublicUser> for PublicUserResponse {
    fn from(user: PublicUser) -> Self {
        Self {
            id: user.id.to_hex(),
            username: user.username,
            email: user.email,
        }
    }
}
