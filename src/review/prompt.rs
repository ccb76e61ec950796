use std::path::PathBuf;
use std::sync::RwLock;

use async_trait::async_trait;
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde_json::json;

use crate::error::ReviewError;
use crate::review::PromptStore;

// Shared registry; escaping is disabled because the output is a plain-text
// prompt, not HTML.
static TEMPLATES: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
});

/// Built-in template, compiled in so the binary works without any setup.
pub const BUILT_IN_TEMPLATE: &str = include_str!("../../review-prompt.txt");

/// Prompt store backed by an optional template file, falling back to the
/// built-in template. The template is read once and cached.
pub struct FilePromptStore {
    path: Option<PathBuf>,
    cache: RwLock<Option<String>>,
}

impl FilePromptStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            cache: RwLock::new(None),
        }
    }

    fn load(&self) -> Result<String, ReviewError> {
        match &self.path {
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                ReviewError::template(format!(
                    "cannot read prompt file {}: {}",
                    path.display(),
                    e
                ))
            }),
            None => Ok(BUILT_IN_TEMPLATE.to_string()),
        }
    }
}

#[async_trait]
impl PromptStore for FilePromptStore {
    async fn active_template(&self) -> Result<String, ReviewError> {
        {
            let cache = self.cache.read().unwrap();
            if let Some(template) = cache.as_ref() {
                return Ok(template.clone());
            }
        }

        let template = self.load()?;
        *self.cache.write().unwrap() = Some(template.clone());
        Ok(template)
    }
}

/// Substitutes the exercise title into the `{{exercise}}` placeholder.
pub fn render(template: &str, exercise_title: &str) -> Result<String, ReviewError> {
    let rendered = TEMPLATES.render_template(template, &json!({ "exercise": exercise_title }))?;
    Ok(rendered)
}
