use crate::config::Config;
use crate::model::AuthorFilter;
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repotally")]
#[command(about = "Mirror an account's repositories and tally per-file commit line changes into CSV")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Account whose repositories are mirrored and reported on")]
    pub username: String,

    #[arg(help = "Comma-separated exact author names to keep; all authors when omitted")]
    pub authors: Option<String>,

    #[arg(long, help = "Directory holding the bare mirrors")]
    pub mirrors_dir: Option<PathBuf>,

    #[arg(long, help = "Path of the CSV report")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Base URL of the repository listing API")]
    pub api_url: Option<String>,

    #[arg(long, help = "Skip listing and cloning; report over existing mirrors")]
    pub no_fetch: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let config = Config::new(self.mirrors_dir, self.output, self.api_url);
        let filter = self
            .authors
            .as_deref()
            .map(AuthorFilter::parse)
            .unwrap_or_default();

        if !self.no_fetch {
            let repos = crate::remote::list_repos(&config, &self.username)
                .context("Failed to list repositories")?;
            println!(
                "Listed {} repositories for {} (single page)",
                repos.len(),
                self.username
            );

            let summary = crate::mirror::sync_mirrors(&config, &self.username, &repos)
                .context("Failed to sync mirrors")?;
            println!(
                "Mirrors: {} cloned, {} skipped, {} failed",
                summary.cloned, summary.skipped, summary.failed
            );
        }

        crate::report::exec(&config, &self.username, &filter)
    }
}
