pub mod comment;
pub mod post;
pub mod user;

pub use comment::Comment;
pub use post::{Post, PostChanges};
pub use user::{NewUser, User, UserChanges};
