use std::path::PathBuf;

pub const DEFAULT_MIRRORS_DIR: &str = "bare_repos";
pub const DEFAULT_OUTPUT: &str = "commits.csv";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Paths and endpoints threaded through the pipeline instead of living as
/// process-wide constants, so tests can point everything at temp dirs.
#[derive(Debug, Clone)]
pub struct Config {
    pub mirrors_root: PathBuf,
    pub output_path: PathBuf,
    pub api_base: String,
}

impl Config {
    pub fn new(
        mirrors_root: Option<PathBuf>,
        output_path: Option<PathBuf>,
        api_base: Option<String>,
    ) -> Self {
        Self {
            mirrors_root: mirrors_root.unwrap_or_else(|| PathBuf::from(DEFAULT_MIRRORS_DIR)),
            output_path: output_path.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }

    /// Directory holding all of one account's mirrors.
    pub fn account_dir(&self, username: &str) -> PathBuf {
        self.mirrors_root.join(username)
    }

    pub fn mirror_path(&self, username: &str, repo_name: &str) -> PathBuf {
        self.account_dir(username).join(repo_name)
    }

    pub fn repos_endpoint(&self, username: &str) -> String {
        format!(
            "{}/users/{}/repos",
            self.api_base.trim_end_matches('/'),
            username
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_relative_working_dir_paths() {
        let config = Config::default();
        assert_eq!(config.mirrors_root, PathBuf::from("bare_repos"));
        assert_eq!(config.output_path, PathBuf::from("commits.csv"));
    }

    #[test]
    fn repos_endpoint_tolerates_trailing_slash() {
        let config = Config::new(None, None, Some("http://127.0.0.1:8080/".to_string()));
        assert_eq!(
            config.repos_endpoint("acme"),
            "http://127.0.0.1:8080/users/acme/repos"
        );
    }

    #[test]
    fn mirror_path_is_keyed_by_account_and_name() {
        let config = Config::new(Some(PathBuf::from("/tmp/mirrors")), None, None);
        assert_eq!(
            config.mirror_path("acme", "widgets"),
            PathBuf::from("/tmp/mirrors/acme/widgets")
        );
    }
}
