use std::io::Write;

use super::{Command, CommandRegistry};
use crate::connection::CliConnection;
use crate::error::PluginError;

/// Lists the plugin's commands. Dispatch renders the listing from the
/// registry; run on its own it lists the built-ins.
pub struct HelpCommand;

impl HelpCommand {
    pub const NAME: &'static str = "help";
}

impl Command for HelpCommand {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn aliases(&self) -> &[&str] {
        &["h"]
    }

    fn description(&self) -> &str {
        "show this help"
    }

    fn usage(&self) -> &str {
        "cf-whoami help"
    }

    fn run(
        &self,
        _conn: &dyn CliConnection,
        _args: &[String],
        out: &mut dyn Write,
    ) -> Result<(), PluginError> {
        out.write_all(CommandRegistry::new().help_text().as_bytes())?;
        Ok(())
    }
}
