//! 도메인 정책(코멘트 fingerprint 태그, 태그 기반 중복 판정).

use crate::domain::outcome::IssueComment;
use crate::domain::run::RunConfig;

/// 실행 설정 JSON의 MD5 해시를 hex 문자열로 반환한다.
pub fn options_hash(run: &RunConfig) -> String {
    // 문자열 필드와 unit enum만 있으므로 직렬화는 실패하지 않는다.
    let serialized = serde_json::to_string(run).unwrap_or_default();
    format!("{:x}", md5::compute(serialized.as_bytes()))
}

pub fn comment_tag(run: &RunConfig) -> String {
    format!(
        "<!-- terraform cdk action for options with hash {} -->",
        options_hash(run)
    )
}

/// 태그를 첫 줄로 붙인 코멘트 본문.
pub fn tag_message(tag: &str, message: &str) -> String {
    format!("{tag}\n{message}")
}

pub fn find_comment_with_tag<'a>(
    comments: &'a [IssueComment],
    tag: &str,
) -> Option<&'a IssueComment> {
    comments.iter().find(|c| c.body.contains(tag))
}

pub fn pull_request_search_query(repository_full_name: &str, sha: &str) -> String {
    format!("is:pr repo:{repository_full_name} sha:{sha}")
}
