pub mod client;
pub mod link;
pub mod walker;

pub use client::GithubClient;
pub use link::{LinkParser, RepoLocation};
pub use walker::TreeWalker;
