pub mod auth;
pub mod response;

pub use auth::{require_admin, AuthEmployee};
pub use response::{ApiResponse, ApiResult};
