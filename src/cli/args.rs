use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "repo-review",
    version,
    about = "AI review for exercise submissions hosted on GitHub",
    long_about = "Walks the file tree of a GitHub repository subtree, flattens it into a corpus and asks an AI provider for a structured review of the exercise submission. The result is printed and appended to the submissions log."
)]
pub struct Args {
    /// Repository URL, e.g. https://github.com/owner/repo/tree/main/src
    pub repo_url: String,

    /// Exercise title substituted into the prompt template
    #[arg(short, long)]
    pub exercise: String,

    /// AI provider to use (ollama or deepseek)
    #[arg(short = 'P', long, default_value = "")] // empty means not specified
    pub provider: String,

    /// Model to use (default: mistral)
    #[arg(short, long, default_value = "")] // empty means not specified
    pub model: String,

    /// Path of the submissions log
    #[arg(short, long, default_value = "")]
    pub output: String,
}
