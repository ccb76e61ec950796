use thiserror::Error;

/// Review error types
#[derive(Error, Debug, Clone)]
pub enum ReviewError {
    #[error("invalid repository url: {url}")]
    InvalidRepoUrl { url: String },

    #[error("repository resource not found: {url}")]
    RepoNotFound { url: String },

    #[error("github api error: {message}")]
    RemoteApi {
        message: String,
        status: Option<u16>,
        url: Option<String>,
    },

    #[error("unexpected github response: {message} ({url})")]
    Parsing { message: String, url: String },

    #[error("directory tree deeper than {max_depth} levels: {url}")]
    TreeTooDeep { max_depth: usize, url: String },

    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("prompt template error: {message}")]
    Template { message: String },

    #[error("AI service error: {provider} - {message}")]
    AiService { provider: String, message: String },

    #[error("submission storage error: {message}")]
    Storage { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ReviewError {
    pub fn invalid_url(url: impl Into<String>) -> Self {
        ReviewError::InvalidRepoUrl { url: url.into() }
    }

    pub fn not_found(url: impl Into<String>) -> Self {
        ReviewError::RepoNotFound { url: url.into() }
    }

    pub fn remote_api(
        message: impl Into<String>,
        status: Option<u16>,
        url: Option<String>,
    ) -> Self {
        ReviewError::RemoteApi {
            message: message.into(),
            status,
            url,
        }
    }

    pub fn parsing(message: impl Into<String>, url: impl Into<String>) -> Self {
        ReviewError::Parsing {
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        ReviewError::Configuration {
            message: message.into(),
        }
    }

    pub fn template(message: impl Into<String>) -> Self {
        ReviewError::Template {
            message: message.into(),
        }
    }

    pub fn ai_service(provider: impl Into<String>, message: impl Into<String>) -> Self {
        ReviewError::AiService {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ReviewError::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ReviewError::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ReviewError {
    fn from(error: std::io::Error) -> Self {
        ReviewError::Storage {
            message: error.to_string(),
        }
    }
}

impl From<handlebars::RenderError> for ReviewError {
    fn from(error: handlebars::RenderError) -> Self {
        ReviewError::Template {
            message: error.to_string(),
        }
    }
}
