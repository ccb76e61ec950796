use clap::Parser;
use tracing_subscriber::EnvFilter;

use repo_review::ai::AiClient;
use repo_review::cli::args::Args;
use repo_review::config::Config;
use repo_review::github::{GithubClient, LinkParser, TreeWalker};
use repo_review::review::prompt::FilePromptStore;
use repo_review::review::recorder::JsonlRecorder;
use repo_review::review::ReviewService;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let args = Args::parse();
    let mut config = Config::new();
    config.update_from_args(&args);
    config.validate()?;

    let links = LinkParser::new(config.github_api_url.clone());
    let client = GithubClient::new(config.github_token.clone())?;
    let walker = TreeWalker::new(client, links).with_max_depth(config.max_tree_depth);
    let prompts = FilePromptStore::new(config.prompt_path.clone().map(Into::into));
    let generator = AiClient::new(&config);
    let recorder = JsonlRecorder::new(config.submissions_path.clone());

    let service = ReviewService::new(walker, generator, prompts, recorder);
    let review = service.review(&args.repo_url, &args.exercise).await?;

    println!("{}", review);
    Ok(())
}
