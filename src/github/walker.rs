use futures_util::future::BoxFuture;
use serde::Deserialize;

use crate::error::ReviewError;
use crate::github::client::GithubClient;
use crate::github::link::LinkParser;
use crate::models::FileRecord;

/// Upper bound on recursion into subdirectories. The walk depth is dictated
/// by the remote tree, which the API gives no cycle guarantee for.
pub const DEFAULT_MAX_TREE_DEPTH: usize = 64;

/// Directory-listing entry as the contents API returns it. Consumed
/// entry-by-entry during the walk, never persisted.
#[derive(Debug, Deserialize)]
struct TreeEntry {
    url: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Flattens a repository subtree into an ordered list of file records.
///
/// Order contract: depth-first, directory entries in listing order. The
/// order is observable downstream (prompt determinism) and must hold.
pub struct TreeWalker {
    client: GithubClient,
    links: LinkParser,
    max_depth: usize,
}

impl TreeWalker {
    pub fn new(client: GithubClient, links: LinkParser) -> Self {
        Self {
            client,
            links,
            max_depth: DEFAULT_MAX_TREE_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Walks the tree under `start_url`, which may be a human-facing
    /// github.com URL or an API resource URL. Any error at any depth aborts
    /// the whole walk; no partial corpus is returned.
    pub async fn walk(&self, start_url: &str) -> Result<Vec<FileRecord>, ReviewError> {
        let mut corpus = Vec::new();
        self.walk_directory(start_url.to_string(), 0, &mut corpus)
            .await?;
        tracing::info!(files = corpus.len(), "repository walk finished");
        Ok(corpus)
    }

    fn walk_directory<'a>(
        &'a self,
        url: String,
        depth: usize,
        corpus: &'a mut Vec<FileRecord>,
    ) -> BoxFuture<'a, Result<(), ReviewError>> {
        Box::pin(async move {
            if depth > self.max_depth {
                return Err(ReviewError::TreeTooDeep {
                    max_depth: self.max_depth,
                    url,
                });
            }

            // Sub-resource URLs come back from the API fully qualified and
            // must not be re-parsed.
            let api_url = if self.links.is_api_url(&url) {
                url
            } else {
                self.links.render(&LinkParser::parse(&url)?)
            };

            let body = self.client.fetch(&api_url).await?;
            let entries: Vec<TreeEntry> = serde_json::from_str(&body)
                .map_err(|e| ReviewError::parsing(format!("directory listing: {}", e), &api_url))?;

            for entry in entries {
                match entry.kind.as_str() {
                    "file" => {
                        let body = self.client.fetch(&entry.url).await?;
                        let record: FileRecord = serde_json::from_str(&body).map_err(|e| {
                            ReviewError::parsing(format!("file detail: {}", e), &entry.url)
                        })?;
                        corpus.push(record);
                    }
                    "dir" => {
                        self.walk_directory(entry.url, depth + 1, corpus).await?;
                    }
                    other => {
                        // Submodules, symlinks and friends are not part of
                        // the corpus.
                        tracing::debug!(url = entry.url.as_str(), kind = other, "skipping entry");
                    }
                }
            }

            Ok(())
        })
    }
}
