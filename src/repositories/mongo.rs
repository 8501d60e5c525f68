use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use crate::error::AppResult;
use crate::models::{
    Comment, CommentWithContext, CreateProject, CreateUser, Project, ProjectDetail,
    ProjectWithOwner, Reply, ReplyWithContext, User,
};
use crate::repositories::{CommentStore, ProjectStore, ReplyStore, UserStore};

/// MongoDB-backed store
#[derive(Clone)]
pub struct MongoStore {
    users: Collection<User>,
    projects: Collection<Project>,
    comments: Collection<Comment>,
    replies: Collection<Reply>,
}

impl MongoStore {
    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection::<User>("users"),
            projects: db.collection::<Project>("projects"),
            comments: db.collection::<Comment>("comments"),
            replies: db.collection::<Reply>("replies"),
        }
    }

    /// Create the unique indexes the write paths rely on. Title uniqueness
    /// is scoped per owner, so the projects index is compound.
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let unique = IndexOptions::builder().unique(true).build();

        self.users
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(unique.clone())
                    .build(),
            )
            .await?;

        self.users
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "username": 1 })
                    .options(unique.clone())
                    .build(),
            )
            .await?;

        self.projects
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "owner": 1, "title": 1 })
                    .options(unique)
                    .build(),
            )
            .await?;

        // Non-unique indexes backing the listing pipelines
        self.comments
            .create_index(IndexModel::builder().keys(doc! { "toProject": 1 }).build())
            .await?;

        self.replies
            .create_index(IndexModel::builder().keys(doc! { "toComment": 1 }).build())
            .await?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for MongoStore {
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
        self.users.insert_one(&user).await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: ObjectId) -> AppResult<Option<User>> {
        Ok(self.users.find_one(doc! { "_id": id }).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.find_one(doc! { "email": email }).await?)
    }

    async fn find_user_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> AppResult<Option<User>> {
        let filter = doc! { "$or": [ { "username": username }, { "email": email } ] };
        Ok(self.users.find_one(filter).await?)
    }
}

#[async_trait]
impl ProjectStore for MongoStore {
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
        self.projects.insert_one(&project).await?;
        Ok(project)
    }

    async fn find_project_by_id(&self, id: ObjectId) -> AppResult<Option<Project>> {
        Ok(self.projects.find_one(doc! { "_id": id }).await?)
    }

    async fn find_project_by_owner_and_title(
        &self,
        owner: ObjectId,
        title: &str,
    ) -> AppResult<Option<Project>> {
        let filter = doc! { "$and": [ { "title": title }, { "owner": owner } ] };
        Ok(self.projects.find_one(filter).await?)
    }

    async fn list_projects_with_owner(&self) -> AppResult<Vec<ProjectWithOwner>> {
        let pipeline = vec![
            doc! {
                "$lookup": {
                    "from": "users",
                    "localField": "owner",
                    "foreignField": "_id",
                    "as": "user",
                    "pipeline": [
                        { "$project": { "_id": 1, "username": 1, "email": 1 } },
                    ],
                }
            },
            doc! { "$addFields": { "user": { "$first": "$user" } } },
        ];

        let cursor = self
            .projects
            .aggregate(pipeline)
            .with_type::<ProjectWithOwner>()
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn project_detail(&self, id: ObjectId) -> AppResult<Option<ProjectDetail>> {
        let pipeline = vec![
            doc! { "$match": { "_id": id } },
            doc! {
                "$lookup": {
                    "from": "users",
                    "localField": "owner",
                    "foreignField": "_id",
                    "as": "user",
                    "pipeline": [
                        { "$project": { "_id": 1, "username": 1, "email": 1 } },
                    ],
                }
            },
            doc! { "$addFields": { "createdByUser": { "$first": "$user" } } },
            doc! {
                "$project": {
                    "title": 1,
                    "description": 1,
                    "createdByUser": 1,
                    "likes": 1,
                    "codeURL": 1,
                    "hostedURL": 1,
                }
            },
        ];

        let mut cursor = self
            .projects
            .aggregate(pipeline)
            .with_type::<ProjectDetail>()
            .await?;
        Ok(cursor.try_next().await?)
    }

    async fn save_project(&self, project: &Project) -> AppResult<()> {
        self.projects
            .replace_one(doc! { "_id": project.id }, project)
            .await?;
        Ok(())
    }

    async fn delete_project(&self, id: ObjectId) -> AppResult<()> {
        self.projects.delete_one(doc! { "_id": id }).await?;
        Ok(())
    }
}

#[async_trait]
impl CommentStore for MongoStore {
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
        self.comments.insert_one(&comment).await?;
        Ok(comment)
    }

    async fn find_comment_by_id(&self, id: ObjectId) -> AppResult<Option<Comment>> {
        Ok(self.comments.find_one(doc! { "_id": id }).await?)
    }

    async fn list_comments_for_project(
        &self,
        project_id: ObjectId,
    ) -> AppResult<Vec<CommentWithContext>> {
        let pipeline = vec![
            doc! { "$match": { "toProject": project_id } },
            doc! {
                "$lookup": {
                    "from": "users",
                    "localField": "byUser",
                    "foreignField": "_id",
                    "as": "commentByUser",
                    "pipeline": [
                        { "$project": { "username": 1 } },
                    ],
                }
            },
            doc! {
                "$lookup": {
                    "from": "projects",
                    "localField": "toProject",
                    "foreignField": "_id",
                    "as": "commentToProject",
                    "pipeline": [
                        { "$project": { "title": 1 } },
                    ],
                }
            },
            doc! {
                "$addFields": {
                    "commentByUser": { "$first": "$commentByUser" },
                    "commentToProject": { "$first": "$commentToProject" },
                }
            },
        ];

        let cursor = self
            .comments
            .aggregate(pipeline)
            .with_type::<CommentWithContext>()
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn save_comment(&self, comment: &Comment) -> AppResult<()> {
        self.comments
            .replace_one(doc! { "_id": comment.id }, comment)
            .await?;
        Ok(())
    }

    async fn delete_comment(&self, id: ObjectId) -> AppResult<()> {
        self.comments.delete_one(doc! { "_id": id }).await?;
        Ok(())
    }
}

#[async_trait]
impl ReplyStore for MongoStore {
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
        self.replies.insert_one(&reply).await?;
        Ok(reply)
    }

    async fn find_reply_by_id(&self, id: ObjectId) -> AppResult<Option<Reply>> {
        Ok(self.replies.find_one(doc! { "_id": id }).await?)
    }

    async fn list_replies_for_comment(
        &self,
        comment_id: ObjectId,
    ) -> AppResult<Vec<ReplyWithContext>> {
        let pipeline = vec![
            doc! { "$match": { "toComment": comment_id } },
            doc! {
                "$lookup": {
                    "from": "users",
                    "localField": "byUser",
                    "foreignField": "_id",
                    "as": "replyByUser",
                    "pipeline": [
                        { "$project": { "username": 1 } },
                    ],
                }
            },
            doc! {
                "$lookup": {
                    "from": "comments",
                    "localField": "toComment",
                    "foreignField": "_id",
                    "as": "replyToComment",
                    "pipeline": [
                        { "$project": { "message": 1 } },
                    ],
                }
            },
            doc! {
                "$addFields": {
                    "replyByUser": { "$first": "$replyByUser" },
                    "replyToComment": { "$first": "$replyToComment" },
                }
            },
        ];

        let cursor = self
            .replies
            .aggregate(pipeline)
            .with_type::<ReplyWithContext>()
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn save_reply(&self, reply: &Reply) -> AppResult<()> {
        self.replies
            .replace_one(doc! { "_id": reply.id }, reply)
            .await?;
        Ok(())
    }

    async fn delete_reply(&self, id: ObjectId) -> AppResult<()> {
        self.replies.delete_one(doc! { "_id": id }).await?;
        Ok(())
    }
}
