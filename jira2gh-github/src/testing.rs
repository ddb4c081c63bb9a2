//! Mock GitHub server helpers shared by the backend tests

use octocrab::Octocrab;
use serde_json::{json, Value};
use wiremock::MockServer;

use crate::GitHubClient;

pub const OWNER: &str = "acme";
pub const REPO: &str = "widgets";

/// Client for `acme/widgets` talking to the mock server
pub fn client(server: &MockServer) -> GitHubClient {
    let octocrab = Octocrab::builder()
        .base_uri(server.uri())
        .unwrap()
        .personal_token("ghp_test".to_string())
        .build()
        .unwrap();
    GitHubClient::from_octocrab(octocrab, OWNER, REPO)
}

/// Path of a repository route on the mock server
pub fn repo_path(route: &str) -> String {
    format!("/repos/{}/{}/{}", OWNER, REPO, route)
}

/// `Link` header value pointing at the next page
pub fn next_link(url: &str) -> String {
    format!(r#"<{}>; rel="next""#, url)
}

/// GitHub's answer to a duplicate milestone title
pub fn validation_failed() -> Value {
    json!({
        "message": "Validation Failed",
        "errors": [{"resource": "Milestone", "code": "already_exists", "field": "title"}],
        "documentation_url": "https://docs.github.com/rest/issues/milestones#create-a-milestone"
    })
}

pub fn milestone(number: u64, title: &str) -> Value {
    json!({"number": number, "title": title, "state": "open"})
}

/// Issue comment as returned by the REST API
pub fn comment(server: &MockServer, id: u64, body: &str) -> Value {
    let base = server.uri();
    json!({
        "id": id,
        "node_id": format!("IC_{}", id),
        "url": format!("{}/repos/{}/{}/issues/comments/{}", base, OWNER, REPO, id),
        "html_url": format!("https://github.com/{}/{}/issues/1#issuecomment-{}", OWNER, REPO, id),
        "issue_url": format!("{}/repos/{}/{}/issues/1", base, OWNER, REPO),
        "body": body,
        "user": {
            "login": "octocat",
            "id": 1,
            "node_id": "MDQ6VXNlcjE=",
            "avatar_url": "https://github.com/images/error/octocat_happy.gif",
            "gravatar_id": "",
            "url": "https://api.github.com/users/octocat",
            "html_url": "https://github.com/octocat",
            "followers_url": "https://api.github.com/users/octocat/followers",
            "following_url": "https://api.github.com/users/octocat/following{/other_user}",
            "gists_url": "https://api.github.com/users/octocat/gists{/gist_id}",
            "starred_url": "https://api.github.com/users/octocat/starred{/owner}{/repo}",
            "subscriptions_url": "https://api.github.com/users/octocat/subscriptions",
            "organizations_url": "https://api.github.com/users/octocat/orgs",
            "repos_url": "https://api.github.com/users/octocat/repos",
            "events_url": "https://api.github.com/users/octocat/events{/privacy}",
            "received_events_url": "https://api.github.com/users/octocat/received_events",
            "type": "User",
            "site_admin": false
        },
        "author_association": "OWNER",
        "created_at": "2011-04-14T16:00:49Z",
        "updated_at": "2011-04-14T16:00:49Z"
    })
}
