pub mod prompt;
pub mod recorder;

use async_trait::async_trait;

use crate::ai::ReviewGenerator;
use crate::error::ReviewError;
use crate::github::walker::TreeWalker;
use crate::models::FileRecord;

/// Store of the active prompt template.
#[async_trait]
pub trait PromptStore: Send + Sync {
    async fn active_template(&self) -> Result<String, ReviewError>;
}

/// Records a finished review against the submitted repository URL.
#[async_trait]
pub trait SubmissionRecorder: Send + Sync {
    async fn record(&self, repo_url: &str, review: &str) -> Result<(), ReviewError>;
}

/// Drives a review end to end: walk the repository, compose the prompt,
/// call the generation service, record the result.
pub struct ReviewService<G, P, R> {
    walker: TreeWalker,
    generator: G,
    prompts: P,
    recorder: R,
}

impl<G, P, R> ReviewService<G, P, R>
where
    G: ReviewGenerator,
    P: PromptStore,
    R: SubmissionRecorder,
{
    pub fn new(walker: TreeWalker, generator: G, prompts: P, recorder: R) -> Self {
        Self {
            walker,
            generator,
            prompts,
            recorder,
        }
    }

    /// Walk failures propagate unchanged; nothing is recorded unless the
    /// generation call succeeded.
    pub async fn review(
        &self,
        repo_url: &str,
        exercise_title: &str,
    ) -> Result<String, ReviewError> {
        tracing::info!(repo_url, exercise = exercise_title, "starting review");

        let corpus = self.walker.walk(repo_url).await?;
        let serialized = serialize_corpus(&corpus)?;

        let template = self.prompts.active_template().await?;
        let prompt = format!(
            "{}{}",
            prompt::render(&template, exercise_title)?,
            serialized
        );

        let response = self.generator.generate(&prompt).await?;
        self.recorder.record(repo_url, &response).await?;

        tracing::info!(repo_url, response_len = response.len(), "review recorded");
        Ok(response)
    }
}

/// Field-for-field JSON of the corpus with every double quote swapped for a
/// single quote, so it can sit inside the quoted prompt without conflicting
/// delimiters. Downstream consumers depend on this exact shape.
pub fn serialize_corpus(corpus: &[FileRecord]) -> Result<String, ReviewError> {
    let json = serde_json::to_string(corpus)
        .map_err(|e| ReviewError::internal(format!("corpus serialization: {}", e)))?;
    Ok(json.replace('"', "'"))
}
