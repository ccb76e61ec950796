use std::io::Write;

use serde_json::json;
use tempfile::{tempdir, NamedTempFile};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use repo_review::ai::AiClient;
use repo_review::config::Config;
use repo_review::error::ReviewError;
use repo_review::github::{GithubClient, LinkParser, TreeWalker};
use repo_review::models::SubmissionRecord;
use repo_review::review::prompt::FilePromptStore;
use repo_review::review::recorder::JsonlRecorder;
use repo_review::review::ReviewService;

const REPO_URL: &str = "https://github.com/acme/widgets/tree/main/src";

fn test_config(github_server: &MockServer, ai_server: &MockServer) -> Config {
    Config {
        github_token: "test-token".to_string(),
        github_api_url: github_server.uri(),
        provider: "deepseek".to_string(),
        model: "deepseek-chat".to_string(),
        deepseek_api_key: Some("test-key".to_string()),
        deepseek_url: format!("{}/v1/chat/completions", ai_server.uri()),
        ollama_url: "http://localhost:11434/api/generate".to_string(),
        prompt_path: None,
        submissions_path: "submissions.jsonl".to_string(),
        max_tree_depth: 16,
    }
}

async fn mount_repo_tree(server: &MockServer) {
    let file_entry = |p: &str| {
        json!({
            "url": format!("{}/repos/acme/widgets/contents/{}", server.uri(), p),
            "type": "file"
        })
    };
    let dir_entry = |p: &str| {
        json!({
            "url": format!("{}/repos/acme/widgets/contents/{}", server.uri(), p),
            "type": "dir"
        })
    };
    let file_detail = |name: &str, p: &str| {
        json!({
            "name": name,
            "path": p,
            "sha": "3b18e512dba79e4c8300dd08aeb37f8e728b8dad",
            "size": 12,
            "url": format!("{}/repos/acme/widgets/contents/{}", server.uri(), p),
            "html_url": format!("https://github.com/acme/widgets/blob/main/{}", p),
            "download_url": format!("https://raw.githubusercontent.com/acme/widgets/main/{}", p),
            "type": "file",
            "content": "aGVsbG8gd29ybGQK",
            "encoding": "base64"
        })
    };

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/contents/src"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            file_entry("src/a.txt"),
            dir_entry("src/sub"),
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/contents/src/sub"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([file_entry("src/sub/b.txt")])),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/contents/src/a.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(file_detail("a.txt", "src/a.txt")))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/contents/src/sub/b.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(file_detail("b.txt", "src/sub/b.txt")),
        )
        .mount(server)
        .await;
}

fn build_service(
    config: &Config,
    prompts: FilePromptStore,
    recorder: JsonlRecorder,
) -> ReviewService<AiClient, FilePromptStore, JsonlRecorder> {
    let links = LinkParser::new(config.github_api_url.clone());
    let client = GithubClient::new(config.github_token.clone()).unwrap();
    let walker = TreeWalker::new(client, links).with_max_depth(config.max_tree_depth);
    ReviewService::new(walker, AiClient::new(config), prompts, recorder)
}

#[tokio::test]
async fn test_review_happy_path_records_submission() {
    let github_server = MockServer::start().await;
    let ai_server = MockServer::start().await;
    mount_repo_tree(&github_server).await;

    // The composed prompt carries the rendered template followed by the
    // quote-swapped corpus, in walk order.
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("Review of Sorting Algorithms:"))
        .and(body_string_contains("'name':'a.txt'"))
        .and(body_string_contains("'name':'b.txt'"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Solid submission, 8/10." } }
            ]
        })))
        .expect(1)
        .mount(&ai_server)
        .await;

    let mut template_file = NamedTempFile::new().unwrap();
    write!(template_file, "Review of {{{{exercise}}}}:\n").unwrap();

    let dir = tempdir().unwrap();
    let submissions_path = dir.path().join("submissions.jsonl");

    let config = test_config(&github_server, &ai_server);
    let service = build_service(
        &config,
        FilePromptStore::new(Some(template_file.path().to_path_buf())),
        JsonlRecorder::new(&submissions_path),
    );

    let review = service.review(REPO_URL, "Sorting Algorithms").await.unwrap();
    assert_eq!(review, "Solid submission, 8/10.");

    let content = std::fs::read_to_string(&submissions_path).unwrap();
    let record: SubmissionRecord = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert_eq!(record.repo_url, REPO_URL);
    assert_eq!(record.review, "Solid submission, 8/10.");
}

#[tokio::test]
async fn test_review_generation_failure_records_nothing() {
    let github_server = MockServer::start().await;
    let ai_server = MockServer::start().await;
    mount_repo_tree(&github_server).await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&ai_server)
        .await;

    let dir = tempdir().unwrap();
    let submissions_path = dir.path().join("submissions.jsonl");

    let config = test_config(&github_server, &ai_server);
    let service = build_service(
        &config,
        FilePromptStore::new(None),
        JsonlRecorder::new(&submissions_path),
    );

    let result = service.review(REPO_URL, "Sorting Algorithms").await;
    assert!(matches!(result, Err(ReviewError::AiService { .. })));
    assert!(!submissions_path.exists());
}

#[tokio::test]
async fn test_review_walk_failure_skips_generation() {
    let github_server = MockServer::start().await;
    let ai_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/acme/widgets/contents/src"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&github_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ai_server)
        .await;

    let dir = tempdir().unwrap();
    let submissions_path = dir.path().join("submissions.jsonl");

    let config = test_config(&github_server, &ai_server);
    let service = build_service(
        &config,
        FilePromptStore::new(None),
        JsonlRecorder::new(&submissions_path),
    );

    let result = service.review(REPO_URL, "Sorting Algorithms").await;
    assert!(matches!(result, Err(ReviewError::RepoNotFound { .. })));
    assert!(!submissions_path.exists());
}

#[tokio::test]
async fn test_review_invalid_url_makes_no_requests() {
    let github_server = MockServer::start().await;
    let ai_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&github_server)
        .await;

    let dir = tempdir().unwrap();
    let config = test_config(&github_server, &ai_server);
    let service = build_service(
        &config,
        FilePromptStore::new(None),
        JsonlRecorder::new(dir.path().join("submissions.jsonl")),
    );

    let result = service
        .review("https://github.com/acme/widgets", "Sorting Algorithms")
        .await;
    assert!(matches!(result, Err(ReviewError::InvalidRepoUrl { .. })));
}
