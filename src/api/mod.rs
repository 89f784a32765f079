pub mod extract;
pub mod format;

pub use extract::{into_object, optional_string, require_fields, required_string, IdPath, JsonBody, JsonObject};
pub use format::{CommentView, PostView, UserView};
