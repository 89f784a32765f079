pub mod auth;
pub mod response;

pub use auth::{token_auth_middleware, CurrentUser};
pub use response::{ApiResponse, ApiResult};
