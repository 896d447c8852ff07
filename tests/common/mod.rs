#![allow(dead_code)]

use ghprofile::github::{GitHubClient, GitHubConfig};
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};

pub fn client(server: &ServerGuard) -> GitHubClient {
    GitHubClient::new(GitHubConfig::with_base_url(server.url())).expect("client")
}

pub fn user_json(login: &str, public_repos: u64) -> Value {
    json!({
        "login": login,
        "id": 1,
        "name": null,
        "company": "@Acme",
        "blog": "example.com",
        "location": "Berlin",
        "bio": null,
        "twitter_username": null,
        "public_repos": public_repos,
        "followers": 1500,
        "following": 3,
        "avatar_url": format!("https://avatars.githubusercontent.com/{login}"),
        "html_url": format!("https://github.com/{login}"),
        "created_at": "2015-03-01T10:00:00Z"
    })
}

pub fn repos_json(owner: &str, prefix: &str, n: usize, language: Option<&str>) -> Value {
    Value::Array(
        (0..n)
            .map(|i| {
                json!({
                    "name": format!("{prefix}-{i}"),
                    "description": null,
                    "language": language,
                    "stargazers_count": i,
                    "forks_count": 0,
                    "fork": false,
                    "updated_at": "2024-05-01T00:00:00Z",
                    "html_url": format!("https://github.com/{owner}/{prefix}-{i}")
                })
            })
            .collect(),
    )
}

pub async fn mock_user(server: &mut ServerGuard, login: &str, public_repos: u64) -> Mock {
    server
        .mock("GET", format!("/users/{login}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_json(login, public_repos).to_string())
        .create_async()
        .await
}

pub async fn mock_page(server: &mut ServerGuard, login: &str, page: u32, body: Value) -> Mock {
    server
        .mock("GET", format!("/users/{login}/repos").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("per_page".into(), "6".into()),
            Matcher::UrlEncoded("page".into(), page.to_string()),
            Matcher::UrlEncoded("sort".into(), "updated".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

pub async fn mock_language_sample(server: &mut ServerGuard, login: &str, body: Value) -> Mock {
    server
        .mock("GET", format!("/users/{login}/repos").as_str())
        .match_query(Matcher::UrlEncoded("per_page".into(), "100".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}
