use crate::config::Config;
use crate::error::Result;
use crate::git::Mirror;
use crate::model::{AuthorFilter, CommitRecord, ReportRow, REPORT_HEADER};
use anyhow::Context;
use console::style;
use std::path::Path;

/// Walk every mirror under the account's directory, flatten the histories
/// into report rows, and write the CSV. Repositories that fail to open or
/// walk contribute zero rows; the run still completes.
pub fn exec(config: &Config, username: &str, filter: &AuthorFilter) -> anyhow::Result<()> {
    let mut rows = Vec::new();
    for repo_name in mirrored_repo_names(config, username)? {
        let records = match extract(config, username, &repo_name) {
            Ok(records) => records,
            Err(err) => {
                eprintln!(
                    "{} error processing repository {repo_name}: {err}",
                    style("warning:").yellow().bold()
                );
                Vec::new()
            }
        };
        rows.extend(flatten(&repo_name, &records, filter));
    }

    write_csv(&config.output_path, &rows).context("Failed to write CSV report")?;
    println!("Generated {}! ({} rows)", config.output_path.display(), rows.len());
    Ok(())
}

/// Mirrors actually present on disk, sorted by name. Independent of the
/// listing, so reporting works over previously-created mirrors offline.
fn mirrored_repo_names(config: &Config, username: &str) -> Result<Vec<String>> {
    let dir = config.account_dir(username);
    if !dir.exists() {
        println!("No mirrors found under {}", dir.display());
        return Ok(Vec::new());
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

fn extract(config: &Config, username: &str, repo_name: &str) -> Result<Vec<CommitRecord>> {
    let mirror = Mirror::open(config, username, repo_name)?;
    mirror.collect_commits()
}

fn flatten(repo_name: &str, records: &[CommitRecord], filter: &AuthorFilter) -> Vec<ReportRow> {
    let mut rows = Vec::new();
    for record in records {
        if !filter.admits(&record.author) {
            continue;
        }
        for file in &record.files {
            rows.push(ReportRow {
                repo_name: repo_name.to_string(),
                sha_1_hash: record.id.clone(),
                author: record.author.clone(),
                date: record.timestamp.to_rfc3339(),
                message: record.message.clone(),
                filename: file.path.clone(),
                add_lines: file.added_lines,
                del_lines: file.deleted_lines,
            });
        }
    }
    rows
}

/// Overwrites the output file on every run. The header row is written even
/// when there are no data rows.
fn write_csv(path: &Path, rows: &[ReportRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(REPORT_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileStats;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn record(author: &str, files: Vec<FileStats>) -> CommitRecord {
        CommitRecord {
            id: "deadbeef".to_string(),
            author: author.to_string(),
            timestamp: DateTime::parse_from_rfc3339("2023-01-01T12:00:00+02:00").unwrap(),
            message: "add widgets".to_string(),
            files,
        }
    }

    fn touched(path: &str, added: u32, deleted: u32) -> FileStats {
        FileStats {
            path: path.to_string(),
            added_lines: added,
            deleted_lines: deleted,
        }
    }

    #[test]
    fn flatten_emits_one_row_per_touched_file() {
        let records = vec![
            record("alice", vec![touched("a.go", 10, 2)]),
            record("bob", vec![touched("a.go", 1, 1), touched("b.go", 5, 0)]),
        ];
        let rows = flatten("widgets", &records, &AuthorFilter::default());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].repo_name, "widgets");
        assert_eq!(rows[0].filename, "a.go");
        assert_eq!(rows[0].add_lines, 10);
        assert_eq!(rows[0].del_lines, 2);
        assert_eq!(rows[0].date, "2023-01-01T12:00:00+02:00");
    }

    #[test]
    fn flatten_drops_commits_outside_the_author_filter() {
        let records = vec![
            record("alice", vec![touched("a.go", 10, 2)]),
            record("bob", vec![touched("a.go", 1, 1), touched("b.go", 5, 0)]),
        ];
        let rows = flatten("widgets", &records, &AuthorFilter::parse("alice"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].author, "alice");
        assert_eq!(rows[0].filename, "a.go");
    }

    #[test]
    fn write_csv_emits_header_for_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commits.csv");
        write_csv(&path, &[]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "repo_name,sha_1_hash,author,date,message,filename,add_lines,del_lines\n"
        );
    }

    #[test]
    fn write_csv_quotes_messages_with_newlines_and_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commits.csv");
        let mut rec = record("alice", vec![touched("a.go", 1, 0)]);
        rec.message = "first line\n\nbody, with commas".to_string();
        let rows = flatten("widgets", &[rec], &AuthorFilter::default());
        write_csv(&path, &rows).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let parsed: Vec<csv::StringRecord> =
            reader.records().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(&parsed[0][4], "first line\n\nbody, with commas");
    }
}
