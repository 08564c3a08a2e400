use crate::config::Config;
use crate::error::Result;
use crate::model::RemoteRepo;
use console::style;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct SyncSummary {
    pub cloned: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Ensure a bare mirror of every listed repository exists under the
/// account's mirror directory. Existing mirrors are skipped without any
/// integrity check; a failed clone is logged and the batch continues.
pub fn sync_mirrors(
    config: &Config,
    username: &str,
    repos: &[RemoteRepo],
) -> Result<SyncSummary> {
    std::fs::create_dir_all(config.account_dir(username))?;

    let mut summary = SyncSummary::default();
    for repo in repos {
        let path = config.mirror_path(username, &repo.name);
        if path.exists() {
            println!("Repository {} already exists, skipping.", repo.name);
            summary.skipped += 1;
            continue;
        }

        println!("Cloning {} into {}", repo.clone_url, path.display());
        match clone_bare(&repo.clone_url, &path) {
            Ok(()) => summary.cloned += 1,
            Err(err) => {
                eprintln!(
                    "{} failed to clone {}: {err}",
                    style("warning:").yellow().bold(),
                    repo.name
                );
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

fn clone_bare(url: &str, path: &Path) -> Result<()> {
    let mut prepare = gix::prepare_clone_bare(url, path)?;
    let (_repo, _outcome) =
        prepare.fetch_only(gix::progress::Discard, &gix::interrupt::IS_INTERRUPTED)?;
    Ok(())
}
