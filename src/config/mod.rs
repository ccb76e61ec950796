use std::env;
use std::path::PathBuf;

use crate::error::ReviewError;
use crate::github::walker::DEFAULT_MAX_TREE_DEPTH;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub github_api_url: String,
    pub provider: String,
    pub model: String,
    pub deepseek_api_key: Option<String>,
    pub deepseek_url: String,
    pub ollama_url: String,
    pub prompt_path: Option<String>,
    pub submissions_path: String,
    pub max_tree_depth: usize,
}

impl Config {
    pub fn new() -> Self {
        // Defaults
        let mut config = Config {
            github_token: String::new(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            provider: "ollama".to_string(),
            model: "mistral".to_string(),
            deepseek_api_key: None,
            deepseek_url: "https://api.deepseek.com/v1/chat/completions".to_string(),
            ollama_url: "http://localhost:11434/api/generate".to_string(),
            prompt_path: None,
            submissions_path: "submissions.jsonl".to_string(),
            max_tree_depth: DEFAULT_MAX_TREE_DEPTH,
        };

        // .env files first, then environment variables on top
        #[cfg(not(test))]
        config.load_from_env_file();
        config.load_from_env();

        config
    }

    pub fn load_from_env_file(&mut self) {
        // User-level config from the home directory
        if let Ok(home) = env::var("HOME") {
            let user_env_path = PathBuf::from(format!("{}/.repo-review/.env", home));
            if user_env_path.exists() {
                dotenvy::from_path(user_env_path).ok();
            }
        }

        // Then the current directory
        dotenvy::dotenv().ok();
    }

    pub fn load_from_env(&mut self) {
        if let Ok(token) = env::var("GITHUB_TOKEN") {
            self.github_token = token;
        }
        if let Ok(url) = env::var("REPO_REVIEW_GITHUB_API_URL") {
            self.github_api_url = url;
        }
        if let Ok(provider) = env::var("REPO_REVIEW_PROVIDER") {
            self.provider = provider;
        }
        if let Ok(model) = env::var("REPO_REVIEW_MODEL") {
            self.model = model;
        }
        if let Ok(api_key) = env::var("REPO_REVIEW_DEEPSEEK_API_KEY") {
            self.deepseek_api_key = Some(api_key);
        }
        if let Ok(url) = env::var("REPO_REVIEW_DEEPSEEK_URL") {
            self.deepseek_url = url;
        }
        if let Ok(url) = env::var("REPO_REVIEW_OLLAMA_URL") {
            self.ollama_url = url;
        }
        if let Ok(path) = env::var("REPO_REVIEW_PROMPT_PATH") {
            self.prompt_path = Some(path);
        }
        if let Ok(path) = env::var("REPO_REVIEW_SUBMISSIONS_PATH") {
            self.submissions_path = path;
        }
        if let Ok(depth) = env::var("REPO_REVIEW_MAX_TREE_DEPTH") {
            match depth.parse() {
                Ok(depth) => self.max_tree_depth = depth,
                Err(_) => tracing::warn!(
                    value = depth.as_str(),
                    default = self.max_tree_depth,
                    "REPO_REVIEW_MAX_TREE_DEPTH is not a number, keeping default"
                ),
            }
        }
    }

    pub fn update_from_args(&mut self, args: &crate::cli::args::Args) {
        // Command-line arguments take the highest priority
        if !args.provider.is_empty() {
            self.provider = args.provider.clone();
        }
        if !args.model.is_empty() {
            self.model = args.model.clone();
        }
        if !args.output.is_empty() {
            self.submissions_path = args.output.clone();
        }
    }

    pub fn validate(&self) -> Result<(), ReviewError> {
        if self.github_token.is_empty() {
            return Err(ReviewError::config(
                "GitHub token is required but not set. Please set GITHUB_TOKEN environment variable or in .env file",
            ));
        }
        match self.provider.as_str() {
            "deepseek" => {
                if self.deepseek_api_key.is_none() {
                    return Err(ReviewError::config(
                        "Deepseek API key is required but not set. Please set REPO_REVIEW_DEEPSEEK_API_KEY environment variable or in .env file",
                    ));
                }
            }
            "ollama" => {
                // Local service, no API key needed
            }
            other => {
                return Err(ReviewError::config(format!(
                    "Unsupported provider: {}",
                    other
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
