use crate::config::Config;
use crate::error::{RepotallyError, Result};
use crate::model::{CommitRecord, FileStats};
use chrono::{DateTime, FixedOffset, Utc};
use gix::object::tree::diff::ChangeDetached;
use gix::{ObjectId, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use similar::{ChangeTag, TextDiff};
use std::collections::{HashSet, VecDeque};

/// A locally mirrored repository opened for history extraction.
pub struct Mirror {
    repo: Repository,
    name: String,
}

impl Mirror {
    /// Open the bare mirror for `repo_name` under the account's mirror dir.
    pub fn open(config: &Config, username: &str, repo_name: &str) -> Result<Self> {
        let path = config.mirror_path(username, repo_name);
        if !path.exists() {
            return Err(RepotallyError::MirrorNotFound {
                name: repo_name.to_string(),
                path,
            });
        }

        let repo = gix::open(&path)?;
        Ok(Self {
            repo,
            name: repo_name.to_string(),
        })
    }

    /// Collect every commit reachable from HEAD together with per-file line
    /// stats. Merge commits diff against their first parent. Records come
    /// back newest first, authored timestamp descending with the commit id
    /// as tie-break.
    pub fn collect_commits(&self) -> Result<Vec<CommitRecord>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            return Ok(Vec::new());
        }
        let head_commit = head.peel_to_commit_in_place()?;

        let mut records = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Collecting commits from {}...", self.name));

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let time = commit.time()?;
            let timestamp = author_timestamp(time.seconds, time.offset)?;
            let author = commit.author()?.name.to_string();
            let message = String::from_utf8_lossy(commit.message_raw()?)
                .trim()
                .to_string();
            let parents: Vec<ObjectId> = commit.parent_ids().map(|id| id.into()).collect();

            let files = self.diff_stats(commit_id, parents.first().copied())?;

            records.push(CommitRecord {
                id: commit_id.to_string(),
                author,
                timestamp,
                message,
                files,
            });

            for pid in parents {
                stack.push_back(pid);
            }

            pb.inc(1);
        }

        pb.finish_and_clear();

        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(records)
    }

    fn diff_stats(
        &self,
        commit_id: ObjectId,
        parent_id: Option<ObjectId>,
    ) -> Result<Vec<FileStats>> {
        let commit_tree = self.repo.find_commit(commit_id)?.tree()?;
        let parent_tree = match parent_id {
            Some(id) => Some(self.repo.find_commit(id)?.tree()?),
            None => None,
        };

        let changes: Vec<ChangeDetached> =
            self.repo
                .diff_tree_to_tree(parent_tree.as_ref(), Some(&commit_tree), None)?;

        let mut files = Vec::new();
        for change in changes {
            self.handle_change(change, &mut files)?;
        }

        Ok(files)
    }

    fn handle_change(&self, change: ChangeDetached, files: &mut Vec<FileStats>) -> Result<()> {
        match change {
            ChangeDetached::Addition { id, location, .. } => {
                if let Ok(obj) = self.repo.find_object(id) {
                    let lines = if is_binary(&obj) { 0 } else { count_lines(&obj) };
                    files.push(FileStats {
                        path: location.to_string(),
                        added_lines: lines,
                        deleted_lines: 0,
                    });
                }
            }
            ChangeDetached::Deletion { id, location, .. } => {
                if let Ok(obj) = self.repo.find_object(id) {
                    let lines = if is_binary(&obj) { 0 } else { count_lines(&obj) };
                    files.push(FileStats {
                        path: location.to_string(),
                        added_lines: 0,
                        deleted_lines: lines,
                    });
                }
            }
            ChangeDetached::Modification {
                previous_id,
                id,
                location,
                ..
            } => {
                if let (Ok(old_obj), Ok(new_obj)) =
                    (self.repo.find_object(previous_id), self.repo.find_object(id))
                {
                    let (added, deleted) = if is_binary(&old_obj) || is_binary(&new_obj) {
                        (0, 0)
                    } else {
                        line_diff(&old_obj, &new_obj)
                    };
                    files.push(FileStats {
                        path: location.to_string(),
                        added_lines: added,
                        deleted_lines: deleted,
                    });
                }
            }
            ChangeDetached::Rewrite {
                source_id,
                id,
                source_location,
                location,
                copy,
                ..
            } => {
                if let (Ok(old_obj), Ok(new_obj)) =
                    (self.repo.find_object(source_id), self.repo.find_object(id))
                {
                    let (added, deleted) = if is_binary(&old_obj) || is_binary(&new_obj) {
                        (0, 0)
                    } else {
                        line_diff(&old_obj, &new_obj)
                    };

                    files.push(FileStats {
                        path: source_location.to_string(),
                        added_lines: 0,
                        deleted_lines: if copy { 0 } else { deleted },
                    });

                    files.push(FileStats {
                        path: location.to_string(),
                        added_lines: if copy { added } else { 0 },
                        deleted_lines: 0,
                    });
                }
            }
        }
        Ok(())
    }
}

fn author_timestamp(secs: i64, offset_secs: i32) -> Result<DateTime<FixedOffset>> {
    let utc = DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| RepotallyError::InvalidDate(format!("Invalid timestamp: {secs}")))?;
    let offset = FixedOffset::east_opt(offset_secs)
        .ok_or_else(|| RepotallyError::InvalidDate(format!("Invalid UTC offset: {offset_secs}")))?;
    Ok(utc.with_timezone(&offset))
}

fn is_binary(object: &gix::Object) -> bool {
    object.data.as_slice().iter().take(8192).any(|&b| b == 0)
}

fn count_lines(object: &gix::Object) -> u32 {
    std::str::from_utf8(object.data.as_slice())
        .map(|t| t.lines().count() as u32)
        .unwrap_or(0)
}

fn line_diff(old_object: &gix::Object, new_object: &gix::Object) -> (u32, u32) {
    let old_text = String::from_utf8_lossy(old_object.data.as_slice());
    let new_text = String::from_utf8_lossy(new_object.data.as_slice());

    let diff = TextDiff::from_lines(old_text.as_ref(), new_text.as_ref());
    let mut added = 0u32;
    let mut deleted = 0u32;
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => deleted += 1,
            ChangeTag::Equal => {}
        }
    }

    (added, deleted)
}

#[cfg(test)]
mod tests {
    use super::author_timestamp;

    #[test]
    fn author_timestamp_preserves_utc_offset() {
        let ts = author_timestamp(1_672_567_200, 7200).unwrap();
        assert_eq!(ts.to_rfc3339(), "2023-01-01T12:00:00+02:00");
    }

    #[test]
    fn author_timestamp_rejects_bogus_offset() {
        assert!(author_timestamp(0, 100_000_000).is_err());
    }
}
