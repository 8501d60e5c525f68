pub mod auth;
pub mod comment;
pub mod common;
pub mod project;
pub mod reply;

pub use auth::{login, me, register, AuthResponse, LoginRequest, RegisterRequest, UserEnvelope};
pub use comment::{
    create_comment, delete_comment, list_comments, update_comment, CommentEnvelope,
    CommentListEnvelope, CommentUpdateEnvelope, CreateCommentRequest, ListCommentsRequest,
    UpdateCommentRequest,
};
pub use common::{require_field, require_message, MessageResponse};
pub use project::{
    create_project, delete_project, get_project, list_projects, update_project,
    CreateProjectRequest, ProjectDetailEnvelope, ProjectEnvelope, ProjectListEnvelope,
    UpdateProjectRequest,
};
pub use reply::{
    create_reply, delete_reply, list_replies, update_reply, CreateReplyRequest,
    ListRepliesRequest, ReplyEnvelope, ReplyListEnvelope, ReplyUpdateEnvelope, UpdateReplyRequest,
};
