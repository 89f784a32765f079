mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

use common::{id_of, TestServer};

#[tokio::test]
async fn deleting_user_removes_their_posts_and_comments() -> Result<()> {
    let server = TestServer::start().await?;
    let (leaver, leaver_token) = server.signed_in("leaver").await?;
    let (_, stayer_token) = server.signed_in("stayer").await?;

    let own_post = server.create_post(&leaver_token, "Leaving soon").await?;
    let other_post = server.create_post(&stayer_token, "Staying").await?;
    let reply = server.create_comment(&stayer_token, id_of(&own_post), "bye").await?;
    let remark = server.create_comment(&leaver_token, id_of(&other_post), "so long").await?;

    let res = server
        .client
        .delete(server.url(&format!("/users/{}", id_of(&leaver))))
        .bearer_auth(&leaver_token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Their post and everything on it is gone
    let res = server.client.get(server.url(&format!("/posts/{}", id_of(&own_post)))).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let res = server
        .client
        .get(server.url(&format!("/posts/{}/comments/{}", id_of(&own_post), id_of(&reply))))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Their comment on someone else's post is gone, the post is not
    let res = server
        .client
        .get(server.url(&format!("/posts/{}/comments/{}", id_of(&other_post), id_of(&remark))))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let res = server.client.get(server.url(&format!("/posts/{}", id_of(&other_post)))).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server.client.get(server.url("/posts")).send().await?;
    let posts: Vec<Value> = res.json().await?;
    assert_eq!(posts.len(), 1);
    Ok(())
}

#[tokio::test]
async fn deleting_post_removes_its_comments() -> Result<()> {
    let server = TestServer::start().await?;
    let (_, token) = server.signed_in("host").await?;
    let post = server.create_post(&token, "Short lived").await?;
    let comment = server.create_comment(&token, id_of(&post), "first!").await?;

    let res = server
        .client
        .delete(server.url(&format!("/posts/{}", id_of(&post))))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = server
        .client
        .get(server.url(&format!("/posts/{}/comments/{}", id_of(&post), id_of(&comment))))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
