use std::path::PathBuf;

use regex::Regex;

use crate::config::Config;
use crate::error::{Result, TaggerError};
use crate::git::{Credentials, RemoteTarget};
use crate::github::{self, GitHubClient};

/// Username sent with a token when no actor is known
const TOKEN_USERNAME: &str = "x-access-token";

#[derive(clap::Parser, Debug, Clone)]
#[command(
    name = "merge-tagger",
    version,
    about = "Tag merged pull requests with the next semantic version"
)]
pub struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        default_value = ".",
        help = "Path to the repository checkout"
    )]
    pub path: PathBuf,

    #[arg(long, env = "GITHUB_REPOSITORY", help = "Repository as owner/name")]
    pub repository: Option<String>,

    #[arg(
        long,
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "Token used to push the tag and comment"
    )]
    pub token: Option<String>,

    #[arg(long, env = "GITHUB_ACTOR", help = "User the push authenticates as")]
    pub actor: Option<String>,

    #[arg(
        long,
        env = "GITHUB_EVENT_PATH",
        help = "Path to the pull request event payload"
    )]
    pub event_path: Option<PathBuf>,

    #[arg(long, help = "Compute the tag without creating, pushing or commenting")]
    pub dry_run: bool,

    #[arg(long, help = "Do not comment on the pull request")]
    pub no_comment: bool,
}

/// Run settings, resolved once from CLI/environment and the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// `owner/name`
    pub repository: String,
    pub token: Option<String>,
    pub actor: Option<String>,
    pub event_path: PathBuf,
    pub repo_path: PathBuf,
    pub remote_name: String,
    pub api_url: String,
    pub server_url: String,
    pub dry_run: bool,
    pub comment: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn validate_repository(repository: &str) -> Result<()> {
    let re = Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$")
        .map_err(|e| TaggerError::config(e.to_string()))?;
    if re.is_match(repository) {
        Ok(())
    } else {
        Err(TaggerError::config(format!(
            "Repository '{}' is not in owner/name form",
            repository
        )))
    }
}

impl Settings {
    /// Merges arguments with the file configuration.
    ///
    /// Flags can only turn dry-run on and comments off.
    ///
    /// # Errors
    /// [`TaggerError::Config`] when the repository or event path is missing, or
    /// the repository is not `owner/name`.
    pub fn resolve(args: Args, config: &Config) -> Result<Self> {
        let repository = non_empty(args.repository).ok_or_else(|| {
            TaggerError::config("Repository not set (use --repository or GITHUB_REPOSITORY)")
        })?;
        validate_repository(&repository)?;

        let event_path = args.event_path.ok_or_else(|| {
            TaggerError::config("Event payload not set (use --event-path or GITHUB_EVENT_PATH)")
        })?;

        Ok(Settings {
            repository,
            token: non_empty(args.token),
            actor: non_empty(args.actor),
            event_path,
            repo_path: args.path,
            remote_name: config.remote.name.clone(),
            api_url: config.github.api_url.clone(),
            server_url: config.github.server_url.clone(),
            dry_run: args.dry_run || config.behavior.dry_run,
            comment: !args.no_comment && config.behavior.comment,
        })
    }

    /// Remote the tag is pushed to, authenticated with the token when present
    pub fn remote_target(&self) -> RemoteTarget {
        RemoteTarget {
            name: self.remote_name.clone(),
            url: Some(format!(
                "{}/{}.git",
                self.server_url.trim_end_matches('/'),
                self.repository
            )),
            credentials: self.token.as_ref().map(|token| Credentials {
                username: self
                    .actor
                    .clone()
                    .unwrap_or_else(|| TOKEN_USERNAME.to_string()),
                token: token.clone(),
            }),
        }
    }

    /// Release page base URL used in the success comment
    pub fn releases_url(&self) -> String {
        github::releases_url(&self.server_url, &self.repository)
    }

    /// API client for comments; `None` when commenting is off or there is no token
    pub fn github_client(&self) -> Option<GitHubClient> {
        if !self.comment {
            return None;
        }
        self.token
            .as_ref()
            .map(|token| GitHubClient::new(&self.api_url, &self.repository, token))
    }
}
