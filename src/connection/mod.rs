//! The host connection: session and target queries a plugin may make.
//!
//! [`CliConnection`] is the capability set the reporter consumes.
//! [`ConfigConnection`] answers from the `cf` session file; [`FakeCliConnection`]
//! answers with fixed values for tests.

pub mod config;
pub mod fake;

pub use config::ConfigConnection;
pub use fake::FakeCliConnection;

use serde::{Deserialize, Serialize};

use crate::error::ConnectionError;

/// The organization currently targeted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    #[serde(rename = "GUID", default)]
    pub guid: String,
    #[serde(rename = "Name", default)]
    pub name: String,
}

impl Organization {
    pub fn named(name: &str) -> Self {
        Self {
            guid: String::new(),
            name: name.to_string(),
        }
    }
}

/// The space currently targeted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    #[serde(rename = "GUID", default)]
    pub guid: String,
    #[serde(rename = "Name", default)]
    pub name: String,
}

impl Space {
    pub fn named(name: &str) -> Self {
        Self {
            guid: String::new(),
            name: name.to_string(),
        }
    }
}

/// Session queries answered by the host CLI.
///
/// Every call asks the host afresh; implementations must not cache answers
/// across calls.
pub trait CliConnection {
    fn has_api_endpoint(&self) -> Result<bool, ConnectionError>;

    fn api_endpoint(&self) -> Result<String, ConnectionError>;

    fn is_logged_in(&self) -> Result<bool, ConnectionError>;

    /// Logged-in user name. Empty when the host knows of no user.
    fn username(&self) -> Result<String, ConnectionError>;

    fn has_organization(&self) -> Result<bool, ConnectionError>;

    fn current_organization(&self) -> Result<Organization, ConnectionError>;

    fn has_space(&self) -> Result<bool, ConnectionError>;

    fn current_space(&self) -> Result<Space, ConnectionError>;
}
