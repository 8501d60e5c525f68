pub mod comment;
pub mod project;
pub mod reply;
pub mod user;

pub use comment::*;
pub use project::*;
pub use reply::*;
pub use user::*;
