pub mod auth;
pub mod viewer;

pub use auth::{require_admin_middleware, AdminUser};
pub use viewer::viewer_context_middleware;
