//! Host connection backed by the `cf` client's session file.
//!
//! The `cf` client keeps its session in `$CF_HOME/.cf/config.json`. Every
//! query re-reads that file, so answers always reflect the current session.

use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use tracing::debug;

use super::{CliConnection, Organization, Space};
use crate::consts::{config_path_in, default_config_path};
use crate::error::ConnectionError;

/// The subset of `config.json` this plugin reads.
#[derive(Debug, Default, Deserialize)]
struct SessionFile {
    #[serde(rename = "Target", default)]
    target: String,
    #[serde(rename = "AccessToken", default)]
    access_token: String,
    #[serde(rename = "OrganizationFields", default)]
    organization: Organization,
    #[serde(rename = "SpaceFields", default)]
    space: Space,
}

/// Claims read from the access token payload.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    user_name: String,
}

/// Answers host queries from a `cf` session file.
pub struct ConfigConnection {
    path: PathBuf,
}

impl ConfigConnection {
    /// Session file under `cf_home`, or `~/.cf/config.json` when `None`.
    pub fn new(cf_home: Option<&Path>) -> Result<Self, ConnectionError> {
        let path = match cf_home {
            Some(home) => config_path_in(home),
            None => default_config_path().ok_or_else(|| {
                ConnectionError::Unavailable("cannot determine home directory".to_string())
            })?,
        };
        Ok(Self::with_path(path))
    }

    /// Use an explicit session file path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty session, as on a fresh `cf` install.
    fn load(&self) -> Result<SessionFile, ConnectionError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "no session file, treating as empty session");
                return Ok(SessionFile::default());
            }
            Err(source) => {
                return Err(ConnectionError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&content).map_err(|source| ConnectionError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl CliConnection for ConfigConnection {
    fn has_api_endpoint(&self) -> Result<bool, ConnectionError> {
        Ok(!self.load()?.target.is_empty())
    }

    fn api_endpoint(&self) -> Result<String, ConnectionError> {
        Ok(self.load()?.target)
    }

    fn is_logged_in(&self) -> Result<bool, ConnectionError> {
        Ok(!self.load()?.access_token.is_empty())
    }

    fn username(&self) -> Result<String, ConnectionError> {
        let token = self.load()?.access_token;
        if token.is_empty() {
            return Ok(String::new());
        }
        username_from_token(&token)
    }

    fn has_organization(&self) -> Result<bool, ConnectionError> {
        let org = self.load()?.organization;
        Ok(!org.guid.is_empty() && !org.name.is_empty())
    }

    fn current_organization(&self) -> Result<Organization, ConnectionError> {
        Ok(self.load()?.organization)
    }

    fn has_space(&self) -> Result<bool, ConnectionError> {
        let space = self.load()?.space;
        Ok(!space.guid.is_empty() && !space.name.is_empty())
    }

    fn current_space(&self) -> Result<Space, ConnectionError> {
        Ok(self.load()?.space)
    }
}

/// Extract the `user_name` claim from a `bearer <jwt>` access token.
/// A token without the claim yields an empty name.
pub fn username_from_token(token: &str) -> Result<String, ConnectionError> {
    let jwt = token
        .strip_prefix("bearer ")
        .or_else(|| token.strip_prefix("Bearer "))
        .unwrap_or(token)
        .trim();

    let payload = jwt
        .split('.')
        .nth(1)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ConnectionError::InvalidToken("not a JWT".to_string()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ConnectionError::InvalidToken(format!("payload is not base64url: {e}")))?;

    let claims: TokenClaims = serde_json::from_slice(&bytes)
        .map_err(|e| ConnectionError::InvalidToken(format!("payload is not JSON: {e}")))?;

    Ok(claims.user_name)
}
