use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One element of the provider's repository listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRepo {
    pub name: String,
    pub clone_url: String,
}

/// Line changes for one file touched by a commit. Binary blobs count 0/0.
#[derive(Debug, Clone, Serialize)]
pub struct FileStats {
    pub path: String,
    pub added_lines: u32,
    pub deleted_lines: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitRecord {
    pub id: String,
    pub author: String,
    pub timestamp: DateTime<FixedOffset>,
    pub message: String,
    pub files: Vec<FileStats>,
}

/// Field order is the CSV column contract.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub repo_name: String,
    pub sha_1_hash: String,
    pub author: String,
    pub date: String,
    pub message: String,
    pub filename: String,
    pub add_lines: u32,
    pub del_lines: u32,
}

pub const REPORT_HEADER: [&str; 8] = [
    "repo_name",
    "sha_1_hash",
    "author",
    "date",
    "message",
    "filename",
    "add_lines",
    "del_lines",
];

/// Exact-match author allow-list. An empty filter admits everyone.
#[derive(Debug, Clone, Default)]
pub struct AuthorFilter {
    authors: HashSet<String>,
}

impl AuthorFilter {
    /// Parse a comma-separated list of author names; empty segments are
    /// discarded, names are matched verbatim (no trimming).
    pub fn parse(raw: &str) -> Self {
        Self {
            authors: raw
                .split(',')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    pub fn admits(&self, author: &str) -> bool {
        self.authors.is_empty() || self.authors.contains(author)
    }
}
