use mockito::Matcher;
use serde_json::json;

use terraform_cdk_action::application::usecases::post_comment::CommentController;
use terraform_cdk_action::domain::event::{RepoRef, TriggerContext};
use terraform_cdk_action::domain::run::{ActionInputs, ExecutionMode, RunConfig};
use terraform_cdk_action::infrastructure::adapters::ActionsReporter;
use terraform_cdk_action::infrastructure::vcs::GitHubClient;

const TAG: &str =
    "<!-- terraform cdk action for options with hash 761811df765e65db8321b6c4002ca358 -->";

fn inputs() -> ActionInputs {
    ActionInputs {
        run: RunConfig {
            cdktf_version: "1.4.0".to_string(),
            terraform_version: "1.4.0".to_string(),
            working_directory: "some-directory".to_string(),
            stack_name: "some-stack".to_string(),
            mode: ExecutionMode::PlanOnly,
        },
        terraform_cloud_token: "xxx".to_string(),
        github_token: "xxx".to_string(),
        comment_on_pr: true,
        update_comment: true,
        custom_npx_args: String::new(),
        cdktf_args: String::new(),
        suppress_output: false,
    }
}

fn push_context() -> TriggerContext {
    TriggerContext {
        sha: "some-sha".to_string(),
        repo: RepoRef::parse("some-org/some-repo").unwrap(),
        pull_request_number: None,
        repository_full_name: Some("some-org/some-repo".to_string()),
    }
}

fn page_query(page: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("per_page".into(), "100".into()),
        Matcher::UrlEncoded("page".into(), page.into()),
    ])
}

#[tokio::test]
async fn searches_pr_then_updates_tagged_comment_on_second_page() {
    let mut server = mockito::Server::new_async().await;
    let comments_path = "/repos/some-org/some-repo/issues/7/comments";

    let search = server
        .mock("GET", "/search/issues")
        .match_query(Matcher::UrlEncoded(
            "q".into(),
            "is:pr repo:some-org/some-repo sha:some-sha".into(),
        ))
        .with_status(200)
        .with_body(r#"{"items":[{"number":7}]}"#)
        .create_async()
        .await;

    let next = format!("<{}{}?per_page=100&page=2>; rel=\"next\"", server.url(), comments_path);
    let first_page = server
        .mock("GET", comments_path)
        .match_query(page_query("1"))
        .with_status(200)
        .with_header("link", &next)
        .with_body(r#"[{"id":1,"body":"some comment"}]"#)
        .create_async()
        .await;

    let second_body = json!([
        { "id": 2, "body": "<!-- terraform cdk action for options with hash SOME-DIFFERENT-HASH -->\nold" },
        { "id": 3, "body": format!("{TAG}\nprevious-message") }
    ]);
    let later = format!("<{}{}?per_page=100&page=3>; rel=\"next\"", server.url(), comments_path);
    let second_page = server
        .mock("GET", comments_path)
        .match_query(page_query("2"))
        .with_status(200)
        .with_header("link", &later)
        .with_body(second_body.to_string())
        .create_async()
        .await;
    let third_page = server
        .mock("GET", comments_path)
        .match_query(page_query("3"))
        .with_status(200)
        .with_body("[]")
        .expect(0)
        .create_async()
        .await;

    let update = server
        .mock("PATCH", "/repos/some-org/some-repo/issues/comments/3")
        .match_body(Matcher::Json(json!({ "body": format!("{TAG}\nsome-message") })))
        .with_status(200)
        .with_body(r#"{"id":3,"body":"updated"}"#)
        .create_async()
        .await;
    let create = server
        .mock("POST", comments_path)
        .expect(0)
        .create_async()
        .await;

    let gateway = GitHubClient::new(server.url(), Some("xxx".to_string()));
    let inputs = inputs();
    let context = push_context();
    let controller = CommentController {
        gateway: &gateway,
        reporter: &ActionsReporter,
        inputs: &inputs,
        context: &context,
    };

    controller.post_comment_on_pr("some-message").await.unwrap();

    search.assert_async().await;
    first_page.assert_async().await;
    second_page.assert_async().await;
    third_page.assert_async().await;
    update.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn creates_comment_directly_on_pull_request_event() {
    let mut server = mockito::Server::new_async().await;
    let comments_path = "/repos/some-org/some-repo/issues/12/comments";

    let search = server
        .mock("GET", "/search/issues")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let list = server
        .mock("GET", comments_path)
        .match_query(page_query("1"))
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let create = server
        .mock("POST", comments_path)
        .match_body(Matcher::Json(json!({ "body": format!("{TAG}\nsome-message") })))
        .with_status(201)
        .with_body(r#"{"id":50,"body":"created"}"#)
        .create_async()
        .await;

    let gateway = GitHubClient::new(server.url(), Some("xxx".to_string()));
    let inputs = inputs();
    let mut context = push_context();
    context.pull_request_number = Some(12);
    let controller = CommentController {
        gateway: &gateway,
        reporter: &ActionsReporter,
        inputs: &inputs,
        context: &context,
    };

    controller.post_comment_on_pr("some-message").await.unwrap();

    search.assert_async().await;
    list.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn listing_failure_propagates_without_writing() {
    let mut server = mockito::Server::new_async().await;
    let comments_path = "/repos/some-org/some-repo/issues/12/comments";

    server
        .mock("GET", comments_path)
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;
    let create = server
        .mock("POST", comments_path)
        .expect(0)
        .create_async()
        .await;

    let gateway = GitHubClient::new(server.url(), Some("xxx".to_string()));
    let inputs = inputs();
    let mut context = push_context();
    context.pull_request_number = Some(12);
    let controller = CommentController {
        gateway: &gateway,
        reporter: &ActionsReporter,
        inputs: &inputs,
        context: &context,
    };

    let err = controller.post_comment_on_pr("some-message").await.unwrap_err();

    assert!(format!("{err:#}").contains("502"));
    create.assert_async().await;
}
