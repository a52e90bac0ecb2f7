use std::io::Write;

use super::Command;
use crate::connection::CliConnection;
use crate::error::PluginError;
use crate::reporter;

pub struct WhoamiCommand;

impl Command for WhoamiCommand {
    fn name(&self) -> &str {
        "whoami"
    }

    fn aliases(&self) -> &[&str] {
        &["who"]
    }

    fn description(&self) -> &str {
        "show the logged-in user, API endpoint, org and space"
    }

    fn usage(&self) -> &str {
        "cf whoami"
    }

    fn run(
        &self,
        conn: &dyn CliConnection,
        _args: &[String],
        out: &mut dyn Write,
    ) -> Result<(), PluginError> {
        reporter::report(conn, out)?;
        Ok(())
    }
}
