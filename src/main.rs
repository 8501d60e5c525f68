use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use devshelf::config::Config;
use devshelf::handlers::{
    AuthResponse, CommentEnvelope, CommentListEnvelope, CommentUpdateEnvelope,
    CreateCommentRequest, CreateProjectRequest, CreateReplyRequest, ListCommentsRequest,
    ListRepliesRequest, LoginRequest, MessageResponse, ProjectDetailEnvelope, ProjectEnvelope,
    ProjectListEnvelope, RegisterRequest, ReplyEnvelope, ReplyListEnvelope, ReplyUpdateEnvelope,
    UpdateCommentRequest, UpdateProjectRequest, UpdateReplyRequest, UserEnvelope,
};
use devshelf::models::user::UserResponse;
use devshelf::state::AppState;
use devshelf::{build_router, handlers};

/// Security scheme for Bearer token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::project::list_projects,
        handlers::project::get_project,
        handlers::project::create_project,
        handlers::project::update_project,
        handlers::project::delete_project,
        handlers::comment::list_comments,
        handlers::comment::create_comment,
        handlers::comment::update_comment,
        handlers::comment::delete_comment,
        handlers::reply::list_replies,
        handlers::reply::create_reply,
        handlers::reply::update_reply,
        handlers::reply::delete_reply,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        UserResponse,
        UserEnvelope,
        CreateProjectRequest,
        UpdateProjectRequest,
        ProjectListEnvelope,
        ProjectDetailEnvelope,
        ProjectEnvelope,
        ListCommentsRequest,
        CreateCommentRequest,
        UpdateCommentRequest,
        CommentListEnvelope,
        CommentEnvelope,
        CommentUpdateEnvelope,
        ListRepliesRequest,
        CreateReplyRequest,
        UpdateReplyRequest,
        ReplyListEnvelope,
        ReplyEnvelope,
        ReplyUpdateEnvelope,
        MessageResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Projects", description = "Project management endpoints"),
        (name = "Comments", description = "Project comment endpoints"),
        (name = "Replies", description = "Comment reply endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    let addr = config.server_addr();

    // Initialize application state (connects to MongoDB)
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .expect("Failed to initialize application state");
    tracing::info!("Database connection established");

    // Build the main application router
    let app = build_router(state)
        // Add Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .unwrap();
}
