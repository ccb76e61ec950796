use crate::error::ReviewError;

/// Prefix every human-facing repository URL must carry.
pub const GITHUB_URL_PREFIX: &str = "https://github.com/";

/// Location of a repository subtree, derived once from the input URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub path: String,
}

/// Translates human-facing repository URLs into contents-API resource URLs.
#[derive(Debug, Clone)]
pub struct LinkParser {
    api_base: String,
    api_host: String,
}

impl LinkParser {
    /// `api_base` is the API root, `https://api.github.com` in production.
    /// Tests point it at a mock server.
    pub fn new(api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        let api_host = api_base
            .strip_prefix("https://")
            .or_else(|| api_base.strip_prefix("http://"))
            .unwrap_or(&api_base)
            .to_string();
        Self { api_base, api_host }
    }

    /// Splits `https://github.com/<owner>/<repo>/tree/<branch>/<path...>`
    /// by position. The segment indices are fixed by the URL format.
    pub fn parse(url: &str) -> Result<RepoLocation, ReviewError> {
        if !url.starts_with(GITHUB_URL_PREFIX) {
            return Err(ReviewError::invalid_url(url));
        }
        let segments: Vec<&str> = url.split('/').collect();
        if segments.len() < 7 {
            return Err(ReviewError::invalid_url(url));
        }
        Ok(RepoLocation {
            owner: segments[3].to_string(),
            repo: segments[4].to_string(),
            branch: segments[6].to_string(),
            path: segments[7..].join("/"),
        })
    }

    /// The contents API resolves the default branch by itself, so the branch
    /// is carried in `RepoLocation` but not substituted into the URL.
    pub fn render(&self, location: &RepoLocation) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, location.owner, location.repo, location.path
        )
    }

    /// True iff the string already targets the API host. The walker uses this
    /// to skip re-parsing of URLs the API itself returned fully qualified.
    pub fn is_api_url(&self, url: &str) -> bool {
        url.contains(&self.api_host)
    }
}
