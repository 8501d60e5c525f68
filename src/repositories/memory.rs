use async_trait::async_trait;
use bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::AppResult;
use crate::models::{
    Comment, CommentAuthor, CommentWithContext, CreateProject, CreateUser, ParentComment,
    ParentProject, Project, ProjectDetail, ProjectWithOwner, PublicUser, Reply, ReplyAuthor,
    ReplyWithContext, User,
};
use crate::repositories::{CommentStore, ProjectStore, ReplyStore, UserStore};

/// In-memory store for unit testing
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<Mutex<InMemoryStoreInner>>,
}

#[derive(Default)]
struct InMemoryStoreInner {
    users: HashMap<ObjectId, User>,
    projects: HashMap<ObjectId, Project>,
    comments: HashMap<ObjectId, Comment>,
    replies: HashMap<ObjectId, Reply>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(InMemoryStoreInner::default())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStoreInner {
    fn public_user(&self, id: ObjectId) -> Option<PublicUser> {
        self.users.get(&id).map(|user| PublicUser {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        })
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create_user(&self, user: CreateUser) -> AppResult<User> {
        let now = bson::DateTime::now();
        let user = User {
            id: ObjectId::new(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        let mut inner = self.inner.lock().await;
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: ObjectId) -> AppResult<Option<User>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> AppResult<Option<User>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.username == username || u.email == email)
            .cloned())
    }
}

#[async_trait]
impl ProjectStore for InMemoryStore {
    async fn create_project(&self, project: CreateProject) -> AppResult<Project> {
        let now = bson::DateTime::now();
        let project = Project {
            id: ObjectId::new(),
            title: project.title,
            description: project.description,
            owner: project.owner,
            likes: project.likes,
            code_url: project.code_url,
            hosted_url: project.hosted_url,
            created_at: now,
            updated_at: now,
        };
        let mut inner = self.inner.lock().await;
        inner.projects.insert(project.id, project.clone());
        Ok(project)
    }

    async fn find_project_by_id(&self, id: ObjectId) -> AppResult<Option<Project>> {
        let inner = self.inner.lock().await;
        Ok(inner.projects.get(&id).cloned())
    }

    async fn find_project_by_owner_and_title(
        &self,
        owner: ObjectId,
        title: &str,
    ) -> AppResult<Option<Project>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .projects
            .values()
            .find(|p| p.owner == owner && p.title == title)
            .cloned())
    }

    async fn list_projects_with_owner(&self) -> AppResult<Vec<ProjectWithOwner>> {
        let inner = self.inner.lock().await;
        let mut projects: Vec<ProjectWithOwner> = inner
            .projects
            .values()
            .map(|p| ProjectWithOwner {
                id: p.id,
                title: p.title.clone(),
                description: p.description.clone(),
                owner: p.owner,
                likes: p.likes,
                code_url: p.code_url.clone(),
                hosted_url: p.hosted_url.clone(),
                created_at: p.created_at,
                updated_at: p.updated_at,
                user: inner.public_user(p.owner),
            })
            .collect();

        // HashMap iteration order is arbitrary; present insertion order
        projects.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

        Ok(projects)
    }

    async fn project_detail(&self, id: ObjectId) -> AppResult<Option<ProjectDetail>> {
        let inner = self.inner.lock().await;
        Ok(inner.projects.get(&id).map(|p| ProjectDetail {
            id: p.id,
            title: p.title.clone(),
            description: p.description.clone(),
            created_by_user: inner.public_user(p.owner),
            likes: p.likes,
            code_url: p.code_url.clone(),
            hosted_url: p.hosted_url.clone(),
        }))
    }

    async fn save_project(&self, project: &Project) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        inner.projects.insert(project.id, project.clone());
        Ok(())
    }

    async fn delete_project(&self, id: ObjectId) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        inner.projects.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl CommentStore for InMemoryStore {
    async fn create_comment(
        &self,
        message: &str,
        by_user: ObjectId,
        to_project: ObjectId,
    ) -> AppResult<Comment> {
        let now = bson::DateTime::now();
        let comment = Comment {
            id: ObjectId::new(),
            message: message.to_string(),
            by_user,
            to_project,
            created_at: now,
            updated_at: now,
        };
        let mut inner = self.inner.lock().await;
        inner.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_comment_by_id(&self, id: ObjectId) -> AppResult<Option<Comment>> {
        let inner = self.inner.lock().await;
        Ok(inner.comments.get(&id).cloned())
    }

    async fn list_comments_for_project(
        &self,
        project_id: ObjectId,
    ) -> AppResult<Vec<CommentWithContext>> {
        let inner = self.inner.lock().await;
        let mut comments: Vec<CommentWithContext> = inner
            .comments
            .values()
            .filter(|c| c.to_project == project_id)
            .map(|c| CommentWithContext {
                id: c.id,
                message: c.message.clone(),
                by_user: c.by_user,
                to_project: c.to_project,
                created_at: c.created_at,
                updated_at: c.updated_at,
                comment_by_user: inner.users.get(&c.by_user).map(|u| CommentAuthor {
                    id: u.id,
                    username: u.username.clone(),
                }),
                comment_to_project: inner.projects.get(&c.to_project).map(|p| ParentProject {
                    id: p.id,
                    title: p.title.clone(),
                }),
            })
            .collect();

        comments.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

        Ok(comments)
    }

    async fn save_comment(&self, comment: &Comment) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        inner.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn delete_comment(&self, id: ObjectId) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        inner.comments.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ReplyStore for InMemoryStore {
    async fn create_reply(
        &self,
        message: &str,
        by_user: ObjectId,
        to_comment: ObjectId,
    ) -> AppResult<Reply> {
        let now = bson::DateTime::now();
        let reply = Reply {
            id: ObjectId::new(),
            message: message.to_string(),
            by_user,
            to_comment,
            created_at: now,
            updated_at: now,
        };
        let mut inner = self.inner.lock().await;
        inner.replies.insert(reply.id, reply.clone());
        Ok(reply)
    }

    async fn find_reply_by_id(&self, id: ObjectId) -> AppResult<Option<Reply>> {
        let inner = self.inner.lock().await;
        Ok(inner.replies.get(&id).cloned())
    }

    async fn list_replies_for_comment(
        &self,
        comment_id: ObjectId,
    ) -> AppResult<Vec<ReplyWithContext>> {
        let inner = self.inner.lock().await;
        let mut replies: Vec<ReplyWithContext> = inner
            .replies
            .values()
            .filter(|r| r.to_comment == comment_id)
            .map(|r| ReplyWithContext {
                id: r.id,
                message: r.message.clone(),
                by_user: r.by_user,
                to_comment: r.to_comment,
                created_at: r.created_at,
                updated_at: r.updated_at,
                reply_by_user: inner.users.get(&r.by_user).map(|u| ReplyAuthor {
                    id: u.id,
                    username: u.username.clone(),
                }),
                reply_to_comment: inner.comments.get(&r.to_comment).map(|c| ParentComment {
                    id: c.id,
                    message: c.message.clone(),
                }),
            })
            .collect();

        replies.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));

        Ok(replies)
    }

    async fn save_reply(&self, reply: &Reply) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        inner.replies.insert(reply.id, reply.clone());
        Ok(())
    }

    async fn delete_reply(&self, id: ObjectId) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        inner.replies.remove(&id);
        Ok(())
    }
}
