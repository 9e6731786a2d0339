//! GitHub REST API 연동 구현.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, LINK};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, instrument};

use crate::application::ports::IssueGateway;
use crate::domain::event::RepoRef;
use crate::domain::outcome::{CommentPage, IssueComment};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const COMMENTS_PER_PAGE: usize = 100;

pub struct GitHubClient {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubClient {
    /// GitHub(또는 Enterprise) API 클라이언트를 생성한다.
    pub fn new(api_base: impl Into<String>, token: Option<String>) -> Self {
        let api_base: String = api_base.into();
        Self {
            client: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    fn search_endpoint(&self) -> String {
        format!("{}/search/issues", self.api_base)
    }

    fn issue_comments_endpoint(&self, repo: &RepoRef, issue_number: u64) -> String {
        format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.api_base, repo.owner, repo.repo, issue_number
        )
    }

    fn issue_comment_endpoint(&self, repo: &RepoRef, comment_id: &str) -> String {
        format!(
            "{}/repos/{}/{}/issues/comments/{}",
            self.api_base, repo.owner, repo.repo, comment_id
        )
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        // 공통 헤더/인증 적용.
        let req = self
            .client
            .request(method, url)
            .header("User-Agent", "terraform-cdk-action")
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");

        if let Some(token) = &self.token {
            req.bearer_auth(token)
        } else {
            req
        }
    }

    async fn send(&self, req: RequestBuilder, action: &str) -> Result<Response> {
        let resp = req
            .send()
            .await
            .with_context(|| format!("github: failed to {action}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("github: failed to {action} ({status}): {body}");
        }
        Ok(resp)
    }

    async fn read_json<T: DeserializeOwned>(resp: Response, action: &str) -> Result<T> {
        let body = resp
            .text()
            .await
            .with_context(|| format!("github: failed to read {action} body"))?;
        serde_json::from_str(&body).with_context(|| format!("github: invalid {action} JSON"))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    number: u64,
}

#[derive(Debug, Deserialize)]
struct IssueCommentResponse {
    id: u64,
    #[serde(default)]
    body: Option<String>,
}

impl From<IssueCommentResponse> for IssueComment {
    fn from(c: IssueCommentResponse) -> Self {
        IssueComment {
            id: c.id.to_string(),
            body: c.body.unwrap_or_default(),
        }
    }
}

/// Link 헤더가 있으면 rel="next" 존재 여부를, 없으면 None을 반환한다.
fn link_has_next(headers: &HeaderMap) -> Option<bool> {
    let link = headers.get(LINK)?.to_str().ok()?;
    Some(
        link.split(',')
            .any(|part| part.split(';').skip(1).any(|p| p.trim() == "rel=\"next\"")),
    )
}

#[async_trait]
impl IssueGateway for GitHubClient {
    #[instrument(skip(self))]
    async fn search_issue_numbers(&self, query: &str) -> Result<Vec<u64>> {
        let req = self
            .request(Method::GET, self.search_endpoint())
            .query(&[("q", query)]);
        let resp = self.send(req, "search pull requests").await?;
        let result: SearchResponse = Self::read_json(resp, "search").await?;

        debug!(hits = result.items.len(), "searched issues");
        Ok(result.items.into_iter().map(|item| item.number).collect())
    }

    #[instrument(skip(self, repo), fields(owner = %repo.owner, repo = %repo.repo))]
    async fn list_comments_page(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        page: u32,
    ) -> Result<CommentPage> {
        let req = self
            .request(Method::GET, self.issue_comments_endpoint(repo, issue_number))
            .query(&[
                ("per_page", COMMENTS_PER_PAGE.to_string()),
                ("page", page.to_string()),
            ]);
        let resp = self.send(req, "list comments").await?;
        let link_next = link_has_next(resp.headers());
        let comments: Vec<IssueCommentResponse> = Self::read_json(resp, "comments").await?;

        let has_next = link_next.unwrap_or(comments.len() >= COMMENTS_PER_PAGE);
        debug!(count = comments.len(), has_next, "fetched comment page");

        Ok(CommentPage {
            comments: comments.into_iter().map(IssueComment::from).collect(),
            has_next,
        })
    }

    #[instrument(skip(self, repo, body), fields(owner = %repo.owner, repo = %repo.repo))]
    async fn create_comment(
        &self,
        repo: &RepoRef,
        issue_number: u64,
        body: &str,
    ) -> Result<IssueComment> {
        let req = self
            .request(Method::POST, self.issue_comments_endpoint(repo, issue_number))
            .json(&json!({ "body": body }));
        let resp = self.send(req, "create comment").await?;
        let comment: IssueCommentResponse = Self::read_json(resp, "create-comment").await?;
        Ok(comment.into())
    }

    #[instrument(skip(self, repo, body), fields(owner = %repo.owner, repo = %repo.repo))]
    async fn update_comment(
        &self,
        repo: &RepoRef,
        comment_id: &str,
        body: &str,
    ) -> Result<IssueComment> {
        let req = self
            .request(Method::PATCH, self.issue_comment_endpoint(repo, comment_id))
            .json(&json!({ "body": body }));
        let resp = self.send(req, "update comment").await?;
        let comment: IssueCommentResponse = Self::read_json(resp, "update-comment").await?;
        Ok(comment.into())
    }
}
