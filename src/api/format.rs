use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::database::{Comment, Post, User};

/// Public wire format of a user. Password and token never leave the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub date_created: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            date_created: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub date_created: DateTime<Utc>,
    pub author: UserView,
}

impl PostView {
    pub fn new(post: &Post, author: &User) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            body: post.body.clone(),
            date_created: post.created_at,
            author: author.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub body: String,
    pub date_created: DateTime<Utc>,
    pub post_id: i64,
    pub author: UserView,
}

impl CommentView {
    pub fn new(comment: &Comment, author: &User) -> Self {
        Self {
            id: comment.id,
            body: comment.body.clone(),
            date_created: comment.created_at,
            post_id: comment.post_id,
            author: author.into(),
        }
    }
}

/// Distinct owner ids referenced by a batch of rows, for a single author lookup
pub fn owner_ids(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    let mut ids: Vec<i64> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Pair each row with its author. Rows whose author is missing are skipped;
/// foreign keys with cascades make that unreachable in practice.
pub fn with_authors<T, V>(rows: &[T], owner: impl Fn(&T) -> i64, authors: &[User], view: impl Fn(&T, &User) -> V) -> Vec<V> {
    let by_id: HashMap<i64, &User> = authors.iter().map(|u| (u.id, u)).collect();
    rows.iter()
        .filter_map(|row| by_id.get(&owner(row)).map(|author| view(row, author)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(id: i64) -> User {
        User {
            id,
            first_name: "A".into(),
            last_name: "B".into(),
            username: "ab".into(),
            email: "a@b.com".into(),
            password: "$argon2id$secret".into(),
            auth_token: Some("tok".into()),
            token_expiration: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn user_view_hides_secrets() {
        let value = serde_json::to_value(UserView::from(&user(1))).unwrap();
        assert_eq!(value["firstName"], json!("A"));
        assert_eq!(value["username"], json!("ab"));
        assert!(value.get("password").is_none());
        assert!(value.get("authToken").is_none());
        assert!(value["dateCreated"].is_string());
    }

    #[test]
    fn pairs_rows_with_authors() {
        let posts = vec![
            Post { id: 1, title: "t1".into(), body: "b".into(), created_at: Utc::now(), user_id: 2 },
            Post { id: 2, title: "t2".into(), body: "b".into(), created_at: Utc::now(), user_id: 1 },
        ];
        assert_eq!(owner_ids(posts.iter().map(|p| p.user_id)), vec![1, 2]);

        let authors = vec![user(1), user(2)];
        let views = with_authors(&posts, |p| p.user_id, &authors, PostView::new);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].author.id, 2);
        assert_eq!(views[1].author.id, 1);
    }
}
