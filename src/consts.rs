//! Project-wide constants.

use std::path::{Path, PathBuf};

pub const AUTHOR: &str = env!("CARGO_PKG_AUTHORS");
pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Name the plugin registers under with the host CLI.
pub const PLUGIN_NAME: &str = "whoami-plugin";

/// Command run when none is given on the command line.
pub const DEFAULT_COMMAND: &str = "whoami";

/// Environment variable the `cf` client uses to relocate its home.
pub const CF_HOME_ENV: &str = "CF_HOME";

/// Footer for `--help`: where the project lives.
pub fn help_footer() -> String {
    format!("home  {HOMEPAGE}\nrepo  {REPO}")
}

/// Session file location relative to the cf home directory.
pub fn config_path_in(cf_home: &Path) -> PathBuf {
    cf_home.join(".cf").join("config.json")
}

/// Default session file: `~/.cf/config.json`.
/// `None` when the home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| config_path_in(&home))
}

/// Split `CARGO_PKG_VERSION` into `(major, minor, build)`.
/// Missing or non-numeric parts read as 0.
pub fn version_parts(version: &str) -> (u32, u32, u32) {
    let mut parts = version
        .split(['.', '-', '+'])
        .map(|p| p.parse::<u32>().unwrap_or(0));
    (
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
    )
}
