pub mod memory;
pub mod mongo;

pub use memory::InMemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::error::AppResult;
use crate::models::{
    Comment, CommentWithContext, CreateProject, CreateUser, Project, ProjectDetail,
    ProjectWithOwner, Reply, ReplyWithContext, User,
};

/// User persistence operations
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user and return it with its assigned id
    async fn create_user(&self, user: CreateUser) -> AppResult<User>;

    /// Find a user by id
    async fn find_user_by_id(&self, id: ObjectId) -> AppResult<Option<User>>;

    /// Find a user by email (login lookup)
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user matching either username or email (registration duplicate check)
    async fn find_user_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> AppResult<Option<User>>;
}

/// Project persistence operations
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Insert a new project and return it with its assigned id
    async fn create_project(&self, project: CreateProject) -> AppResult<Project>;

    /// Find a project by id
    async fn find_project_by_id(&self, id: ObjectId) -> AppResult<Option<Project>>;

    /// Find a project with the given title belonging to the given owner.
    /// Title uniqueness is scoped per owner, not global.
    async fn find_project_by_owner_and_title(
        &self,
        owner: ObjectId,
        title: &str,
    ) -> AppResult<Option<Project>>;

    /// List every project joined with its owner's public fields
    async fn list_projects_with_owner(&self) -> AppResult<Vec<ProjectWithOwner>>;

    /// Fetch the fixed detail projection of a single project
    async fn project_detail(&self, id: ObjectId) -> AppResult<Option<ProjectDetail>>;

    /// Persist the full state of an already-loaded project (last write wins)
    async fn save_project(&self, project: &Project) -> AppResult<()>;

    /// Delete a project by id
    async fn delete_project(&self, id: ObjectId) -> AppResult<()>;
}

/// Comment persistence operations
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Insert a new comment and return it with its assigned id
    async fn create_comment(
        &self,
        message: &str,
        by_user: ObjectId,
        to_project: ObjectId,
    ) -> AppResult<Comment>;

    /// Find a comment by id
    async fn find_comment_by_id(&self, id: ObjectId) -> AppResult<Option<Comment>>;

    /// List a project's comments joined with author and project fields
    async fn list_comments_for_project(
        &self,
        project_id: ObjectId,
    ) -> AppResult<Vec<CommentWithContext>>;

    /// Persist the full state of an already-loaded comment
    async fn save_comment(&self, comment: &Comment) -> AppResult<()>;

    /// Delete a comment by id
    async fn delete_comment(&self, id: ObjectId) -> AppResult<()>;
}

/// Reply persistence operations
#[async_trait]
pub trait ReplyStore: Send + Sync {
    /// Insert a new reply and return it with its assigned id
    async fn create_reply(
        &self,
        message: &str,
        by_user: ObjectId,
        to_comment: ObjectId,
    ) -> AppResult<Reply>;

    /// Find a reply by id
    async fn find_reply_by_id(&self, id: ObjectId) -> AppResult<Option<Reply>>;

    /// List a comment's replies joined with author and parent comment fields
    async fn list_replies_for_comment(
        &self,
        comment_id: ObjectId,
    ) -> AppResult<Vec<ReplyWithContext>>;

    /// Persist the full state of an already-loaded reply
    async fn save_reply(&self, reply: &Reply) -> AppResult<()>;

    /// Delete a reply by id
    async fn delete_reply(&self, id: ObjectId) -> AppResult<()>;
}

/// Unified storage surface consumed by handlers. Backed by MongoDB in
/// production and by [`InMemoryStore`] in tests.
pub trait Store: UserStore + ProjectStore + CommentStore + ReplyStore {}

impl<T: UserStore + ProjectStore + CommentStore + ReplyStore> Store for T {}
