// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every handler here receives `Extension<CurrentUser>`; the token middleware
// has already rejected the request with 401 if it could not resolve one.
// Ownership checks happen per handler, after the target row is loaded, so a
// missing row is 404 and someone else's row is 403.

pub mod comments;
pub mod posts;
pub mod token;
pub mod users;
