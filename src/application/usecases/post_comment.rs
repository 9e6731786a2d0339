//! 실행 설정 fingerprint 기반 PR 코멘트 생성/갱신 유스케이스.
//!
//! 같은 설정(cdktf/terraform 버전, 작업 디렉터리, 스택, 모드)으로 반복 실행하면
//! 새 코멘트를 쌓지 않고 같은 코멘트 하나를 계속 갱신한다.
//! 읽은 뒤 쓰는 방식이라 같은 fingerprint의 실행이 동시에 돌면 코멘트가 두 개 생길 수 있다.

use anyhow::Result;
use futures::stream::{self, Stream, TryStreamExt};

use crate::application::ports::{IssueGateway, Reporter};
use crate::domain::event::{RepoRef, TriggerContext};
use crate::domain::outcome::IssueComment;
use crate::domain::policy::{
    comment_tag, find_comment_with_tag, pull_request_search_query, tag_message,
};
use crate::domain::run::ActionInputs;

pub struct CommentController<'a> {
    pub gateway: &'a dyn IssueGateway,
    pub reporter: &'a dyn Reporter,
    pub inputs: &'a ActionInputs,
    pub context: &'a TriggerContext,
}

impl<'a> CommentController<'a> {
    /// 태그가 붙은 메시지로 PR 코멘트를 하나 생성하거나 기존 코멘트를 교체한다.
    /// 코멘트가 비활성화됐거나 PR을 찾지 못하면 아무것도 하지 않는다.
    pub async fn post_comment_on_pr(&self, message: &str) -> Result<()> {
        if !self.inputs.comment_on_pr {
            self.reporter.debug("Not commenting on PR by configuration");
            return Ok(());
        }

        let Some(pull_number) = self.resolve_pull_number().await? else {
            self.reporter
                .debug("Not commenting on PR since it could not be identified");
            return Ok(());
        };

        let tag = comment_tag(&self.inputs.run);
        let message_with_tag = tag_message(&tag, message);

        let previous = if self.inputs.update_comment {
            self.find_previous_comment(pull_number, &tag).await?
        } else {
            None
        };

        if let Some(previous) = previous {
            self.reporter
                .debug(&format!("Updating previous comment {}", previous.id));
            self.gateway
                .update_comment(&self.context.repo, &previous.id, &message_with_tag)
                .await?;
            return Ok(());
        }

        self.reporter
            .debug(&format!("Adding new comment to #{pull_number}"));
        self.gateway
            .create_comment(&self.context.repo, pull_number, &message_with_tag)
            .await?;
        Ok(())
    }

    async fn resolve_pull_number(&self) -> Result<Option<u64>> {
        if let Some(number) = self.context.pull_request_number {
            return Ok(Some(number));
        }

        self.reporter
            .debug("Not running on a PR, looking for a pull request number via search");

        let Some(full_name) = self.context.repository_full_name.as_deref() else {
            self.reporter
                .debug("Could not identify repository name, skipping comment on PR");
            return Ok(None);
        };

        let query = pull_request_search_query(full_name, &self.context.sha);
        let numbers = self.gateway.search_issue_numbers(&query).await?;
        self.reporter
            .debug(&format!("Searched for '{query}', got {numbers:?}"));

        let first = numbers.first().copied();
        if first.is_none() {
            self.reporter.warning(&format!(
                "No pull request found for commit {}, skipping comment on PR",
                self.context.sha
            ));
        }
        Ok(first)
    }

    /// 페이지를 순서대로 조회하다가 태그를 포함한 첫 코멘트에서 멈춘다.
    async fn find_previous_comment(
        &self,
        pull_number: u64,
        tag: &str,
    ) -> Result<Option<IssueComment>> {
        let mut pages = std::pin::pin!(comment_pages(
            self.gateway,
            &self.context.repo,
            pull_number
        ));

        while let Some(comments) = pages.try_next().await? {
            if let Some(found) = find_comment_with_tag(&comments, tag) {
                return Ok(Some(found.clone()));
            }
        }
        Ok(None)
    }
}

/// 요청 시점에만 다음 페이지를 가져오는 코멘트 페이지 스트림.
fn comment_pages<'a>(
    gateway: &'a dyn IssueGateway,
    repo: &'a RepoRef,
    issue_number: u64,
) -> impl Stream<Item = Result<Vec<IssueComment>>> + 'a {
    stream::try_unfold(Some(1u32), move |next| async move {
        let Some(page) = next else {
            return Ok(None);
        };
        let fetched = gateway.list_comments_page(repo, issue_number, page).await?;
        let next = fetched.has_next.then_some(page + 1);
        Ok(Some((fetched.comments, next)))
    })
}
