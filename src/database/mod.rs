pub mod manager;
pub mod models;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{Comment, NewUser, Post, PostChanges, User, UserChanges};
pub use repository::{Record, Repository};
