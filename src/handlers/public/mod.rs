// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Read-only access to users, posts and comments, sign-up, and token
// acquisition through HTTP Basic credentials.

pub mod comments;
pub mod posts;
pub mod status;
pub mod token;
pub mod users;
