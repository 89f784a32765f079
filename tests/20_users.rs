mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{error_of, id_of, user_body, TestServer};

#[tokio::test]
async fn signup_then_duplicate_is_rejected() -> Result<()> {
    let server = TestServer::start().await?;
    let body = json!({
        "firstName": "A",
        "lastName": "B",
        "username": "ab",
        "email": "a@b.com",
        "password": "x"
    });

    let res = server.client.post(server.url("/users")).json(&body).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let user: Value = res.json().await?;
    assert_eq!(user["username"], "ab");
    assert_eq!(user["firstName"], "A");
    assert!(user["dateCreated"].is_string());
    assert!(user.get("password").is_none());

    let res = server.client.post(server.url("/users")).json(&body).send().await?;
    let (status, message) = error_of(res).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "A user with that username and/or email already exists");
    Ok(())
}

#[tokio::test]
async fn duplicate_email_alone_is_rejected() -> Result<()> {
    let server = TestServer::start().await?;
    server.create_user("first").await?;

    let mut body = user_body("second");
    body["email"] = json!("first@example.com");
    let res = server.client.post(server.url("/users")).json(&body).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn signup_names_every_missing_field() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/users"))
        .json(&json!({ "username": "ab", "email": null }))
        .send()
        .await?;
    let (status, message) = error_of(res).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "firstName, lastName, email, password must be in the request body");
    Ok(())
}

#[tokio::test]
async fn signup_requires_json() -> Result<()> {
    let server = TestServer::start().await?;

    let res = server
        .client
        .post(server.url("/users"))
        .body("username=ab")
        .header("content-type", "application/x-www-form-urlencoded")
        .send()
        .await?;
    let (status, message) = error_of(res).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Your content-type must be application/json");
    Ok(())
}

#[tokio::test]
async fn get_user_by_id() -> Result<()> {
    let server = TestServer::start().await?;
    let created = server.create_user("reader").await?;

    let res = server
        .client
        .get(server.url(&format!("/users/{}", id_of(&created))))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let user: Value = res.json().await?;
    assert_eq!(user, created);

    let res = server.client.get(server.url("/users/999")).send().await?;
    let (status, message) = error_of(res).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message, "User with id 999 not found");

    let res = server.client.get(server.url("/users/abc")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn update_own_profile() -> Result<()> {
    let server = TestServer::start().await?;
    let (user, token) = server.signed_in("editor").await?;
    let path = format!("/users/{}", id_of(&user));

    let res = server
        .client
        .put(server.url(&path))
        .bearer_auth(&token)
        .json(&json!({ "firstName": "Edited", "password": "new-secret", "ignored": true }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["firstName"], "Edited");
    assert_eq!(updated["username"], "editor");

    // The new password is the one that works now
    let res = server
        .client
        .get(server.url("/token"))
        .basic_auth("editor", Some("new-secret"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn update_rejects_taken_username_and_bad_types() -> Result<()> {
    let server = TestServer::start().await?;
    server.create_user("taken").await?;
    let (user, token) = server.signed_in("mover").await?;
    let path = format!("/users/{}", id_of(&user));

    let res = server
        .client
        .put(server.url(&path))
        .bearer_auth(&token)
        .json(&json!({ "username": "taken" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = server
        .client
        .put(server.url(&path))
        .bearer_auth(&token)
        .json(&json!({ "email": 42 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Keeping one's own username is not a conflict
    let res = server
        .client
        .put(server.url(&path))
        .bearer_auth(&token)
        .json(&json!({ "username": "mover" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn only_self_can_update_or_delete() -> Result<()> {
    let server = TestServer::start().await?;
    let victim = server.create_user("victim").await?;
    let (_, token) = server.signed_in("intruder").await?;
    let path = format!("/users/{}", id_of(&victim));

    let res = server
        .client
        .put(server.url(&path))
        .bearer_auth(&token)
        .json(&json!({ "firstName": "Hacked" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server.client.delete(server.url(&path)).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = server.client.delete(server.url("/users/999")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_self() -> Result<()> {
    let server = TestServer::start().await?;
    let (user, token) = server.signed_in("leaver").await?;
    let path = format!("/users/{}", id_of(&user));

    let res = server.client.delete(server.url(&path)).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], "leaver has been deleted!");

    let res = server.client.get(server.url(&path)).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The deleted user's token no longer resolves
    let res = server.client.delete(server.url(&path)).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn update_missing_user_is_not_found() -> Result<()> {
    let server = TestServer::start().await?;
    let (_, token) = server.signed_in("lonely").await?;

    let res = server
        .client
        .put(server.url("/users/999"))
        .bearer_auth(&token)
        .json(&json!({ "firstName": "Nobody" }))
        .send()
        .await?;
    let (status, message) = error_of(res).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message, "User with id 999 not found");
    Ok(())
}
