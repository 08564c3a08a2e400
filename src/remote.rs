use crate::config::Config;
use crate::error::{RepotallyError, Result};
use crate::model::RemoteRepo;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

const USER_AGENT: &str = concat!("repotally/", env!("CARGO_PKG_VERSION"));

/// Fetch the account's repository listing with a single unauthenticated GET.
/// Only the first page is consumed; callers print the returned count so a
/// truncated listing is visible to the user.
pub fn list_repos(config: &Config, username: &str) -> Result<Vec<RemoteRepo>> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;

    let response = client
        .get(config.repos_endpoint(username))
        .header(ACCEPT, "application/vnd.github+json")
        .send()?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .unwrap_or_else(|_| "<unable to read response>".to_string());
        return Err(RepotallyError::RemoteFetch {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json()?)
}
