use bson::oid::ObjectId;

use devshelf::models::{Comment, CreateProject, CreateUser, Project, Reply};
use devshelf::repositories::{CommentStore, ProjectStore, ReplyStore, UserStore};
use devshelf::services::AuthService;
use devshelf::state::AppState;

/// Authentication info for tests
#[allow(dead_code)]
pub struct TestAuth {
    pub user_id: ObjectId,
    pub username: String,
    pub email: String,
    pub token: String,
}

impl TestAuth {
    /// Get the Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a test user and return auth info
    pub async fn create_user(&self) -> TestAuth {
        let unique = ObjectId::new().to_hex();
        let username = format!("user-{}", unique);
        let email = format!("test-{}@example.com", unique);
        let password = "TestPassword123!";

        let password_hash = AuthService::hash_password(password).unwrap();
        let user = self
            .state
            .store
            .create_user(CreateUser {
                username: username.clone(),
                email: email.clone(),
                password_hash,
            })
            .await
            .unwrap();

        let token =
            AuthService::generate_token(user.id, &username, &email, &self.state.config).unwrap();

        TestAuth {
            user_id: user.id,
            username,
            email,
            token,
        }
    }

    /// Create a test project with the given title
    pub async fn create_project(&self, owner: ObjectId, title: &str) -> Project {
        self.state
            .store
            .create_project(CreateProject {
                title: title.to_string(),
                description: "Test project description".to_string(),
                owner,
                likes: None,
                code_url: None,
                hosted_url: None,
            })
            .await
            .unwrap()
    }

    /// Create a test comment on a project
    pub async fn create_comment(
        &self,
        by_user: ObjectId,
        project_id: ObjectId,
        message: &str,
    ) -> Comment {
        self.state
            .store
            .create_comment(message, by_user, project_id)
            .await
            .unwrap()
    }

    /// Create a test reply to a comment
    pub async fn create_reply(
        &self,
        by_user: ObjectId,
        comment_id: ObjectId,
        message: &str,
    ) -> Reply {
        self.state
            .store
            .create_reply(message, by_user, comment_id)
            .await
            .unwrap()
    }
}
