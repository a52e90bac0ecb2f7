//! Plugin commands exposed to the host CLI.
//!
//! Commands implement the [`Command`] trait and are registered in a
//! [`CommandRegistry`]. The registry handles dispatch, alias resolution,
//! and help generation. Extra commands can be added at runtime via
//! `registry.register(Arc::new(MyCommand))`.

mod help;
mod whoami;

pub use help::HelpCommand;
pub use whoami::WhoamiCommand;

use std::io::Write;
use std::sync::Arc;

use tracing::debug;

use crate::connection::CliConnection;
use crate::error::PluginError;

/// A plugin command. Implement this trait to add new commands.
pub trait Command: Send + Sync {
    /// Primary name, e.g. `"whoami"`.
    fn name(&self) -> &str;

    /// Alternative names, e.g. `&["who"]`.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage line shown by the host, e.g. `"cf whoami"`.
    fn usage(&self) -> &str;

    /// Run the command against the host connection, writing to `out`.
    fn run(
        &self,
        conn: &dyn CliConnection,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<(), PluginError>;
}

/// Holds registered commands.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry with all built-in commands.
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![Arc::new(WhoamiCommand), Arc::new(HelpCommand)];
        Self { commands }
    }

    /// Register an additional command. Fails if its name or any alias is
    /// already taken, leaving the registry unchanged.
    pub fn register(&mut self, command: Arc<dyn Command>) -> Result<(), PluginError> {
        let taken = self.all_triggers();
        let mut incoming = vec![command.name()];
        incoming.extend_from_slice(command.aliases());
        for (i, trigger) in incoming.iter().enumerate() {
            if taken.contains(trigger) || incoming[..i].contains(trigger) {
                return Err(PluginError::DuplicateTrigger(trigger.to_string()));
            }
        }
        self.commands.push(command);
        Ok(())
    }

    /// Find a command by name or alias.
    pub fn find(&self, trigger: &str) -> Option<&Arc<dyn Command>> {
        self.commands
            .iter()
            .find(|c| c.name() == trigger || c.aliases().contains(&trigger))
    }

    /// Run the command matching `trigger`.
    pub fn dispatch(
        &self,
        trigger: &str,
        args: &[String],
        conn: &dyn CliConnection,
        out: &mut dyn Write,
    ) -> Result<(), PluginError> {
        let trigger = trigger.trim();
        let Some(command) = self.find(trigger) else {
            return Err(PluginError::UnknownCommand(trigger.to_string()));
        };
        debug!(command = command.name(), ?args, "dispatching");

        // help needs the registry to list all commands
        if command.name() == HelpCommand::NAME {
            out.write_all(self.help_text().as_bytes())?;
            return Ok(());
        }
        command.run(conn, args, out)
    }

    /// Generate help text from all registered commands.
    pub fn help_text(&self) -> String {
        let entries: Vec<(String, &str)> = self
            .commands
            .iter()
            .map(|c| (format_label(c.name(), c.aliases()), c.description()))
            .collect();

        let max_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for (label, desc) in &entries {
            out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
        }
        out
    }

    /// All registered commands, in registration order.
    pub fn commands(&self) -> &[Arc<dyn Command>] {
        &self.commands
    }

    /// All registered command names (for testing).
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// All registered names and aliases (for duplicate detection).
    pub fn all_triggers(&self) -> Vec<&str> {
        let mut triggers = Vec::new();
        for cmd in &self.commands {
            triggers.push(cmd.name());
            triggers.extend_from_slice(cmd.aliases());
        }
        triggers
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn format_label(name: &str, aliases: &[&str]) -> String {
    if aliases.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, aliases.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::FakeCliConnection;
    use crate::error::ReportError;

    fn dispatch(reg: &CommandRegistry, trigger: &str) -> (Result<(), PluginError>, String) {
        let conn = FakeCliConnection::logged_in("https://api.example.com", "dev");
        let mut out = Vec::new();
        let result = reg.dispatch(trigger, &[], &conn, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn all_builtins_registered() {
        let reg = CommandRegistry::new();
        let names = reg.names();
        assert!(names.contains(&"whoami"));
        assert!(names.contains(&"help"));
    }

    #[test]
    fn no_duplicate_triggers() {
        let reg = CommandRegistry::new();
        let triggers = reg.all_triggers();
        let mut seen = Vec::new();
        for t in &triggers {
            assert!(!seen.contains(t), "duplicate trigger: {t}");
            seen.push(t);
        }
    }

    #[test]
    fn help_text_includes_all_commands() {
        let reg = CommandRegistry::new();
        let text = reg.help_text();
        for name in reg.names() {
            assert!(text.contains(name), "help missing: {name}");
        }
    }

    #[test]
    fn help_text_includes_aliases() {
        let text = CommandRegistry::new().help_text();
        assert!(text.contains("whoami (who)"));
        assert!(text.contains("help (h)"));
    }

    #[test]
    fn dispatch_by_name_and_alias() {
        let reg = CommandRegistry::new();
        for trigger in ["whoami", "who", " whoami "] {
            let (result, output) = dispatch(&reg, trigger);
            assert!(result.is_ok(), "{trigger} failed");
            assert!(output.contains("You are logged in as 'dev'"));
        }
    }

    #[test]
    fn dispatch_help_prints_listing() {
        let reg = CommandRegistry::new();
        let (result, output) = dispatch(&reg, "h");
        assert!(result.is_ok());
        assert_eq!(output, reg.help_text());
    }

    #[test]
    fn unknown_command_is_an_error() {
        let reg = CommandRegistry::new();
        let (result, output) = dispatch(&reg, "whereami");
        assert!(matches!(result, Err(PluginError::UnknownCommand(c)) if c == "whereami"));
        assert!(output.is_empty());
    }

    #[test]
    fn report_errors_pass_through() {
        let reg = CommandRegistry::new();
        let conn = FakeCliConnection::new();
        let mut out = Vec::new();
        let result = reg.dispatch("whoami", &[], &conn, &mut out);
        assert!(matches!(
            result,
            Err(PluginError::Report(ReportError::NoApiEndpoint))
        ));
    }

    #[test]
    fn registered_command_works() {
        struct PingCommand;

        impl Command for PingCommand {
            fn name(&self) -> &str {
                "ping"
            }
            fn description(&self) -> &str {
                "pong"
            }
            fn usage(&self) -> &str {
                "cf ping"
            }
            fn run(
                &self,
                _conn: &dyn CliConnection,
                _args: &[String],
                out: &mut dyn Write,
            ) -> Result<(), PluginError> {
                writeln!(out, "pong")?;
                Ok(())
            }
        }

        let mut reg = CommandRegistry::new();
        reg.register(Arc::new(PingCommand)).unwrap();
        assert!(reg.names().contains(&"ping"));
        let (result, output) = dispatch(&reg, "ping");
        assert!(result.is_ok());
        assert_eq!(output, "pong\n");
        assert!(reg.help_text().contains("ping"));
    }

    struct AliasedCommand {
        name: &'static str,
        aliases: &'static [&'static str],
    }

    impl Command for AliasedCommand {
        fn name(&self) -> &str {
            self.name
        }
        fn aliases(&self) -> &[&str] {
            self.aliases
        }
        fn description(&self) -> &str {
            "aliased"
        }
        fn usage(&self) -> &str {
            "cf aliased"
        }
        fn run(
            &self,
            _conn: &dyn CliConnection,
            _args: &[String],
            out: &mut dyn Write,
        ) -> Result<(), PluginError> {
            writeln!(out, "{}", self.name)?;
            Ok(())
        }
    }

    #[test]
    fn register_rejects_taken_alias() {
        let mut reg = CommandRegistry::new();
        let result = reg.register(Arc::new(AliasedCommand {
            name: "shadow",
            aliases: &["who"],
        }));
        assert!(matches!(result, Err(PluginError::DuplicateTrigger(t)) if t == "who"));
        assert!(!reg.names().contains(&"shadow"));

        let (result, output) = dispatch(&reg, "who");
        assert!(result.is_ok());
        assert!(output.contains("You are logged in as 'dev'"));
        let count = reg.all_triggers().iter().filter(|t| **t == "who").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn register_rejects_taken_name() {
        let mut reg = CommandRegistry::new();
        let result = reg.register(Arc::new(AliasedCommand {
            name: "help",
            aliases: &[],
        }));
        assert!(matches!(result, Err(PluginError::DuplicateTrigger(t)) if t == "help"));
    }

    #[test]
    fn register_rejects_self_collision() {
        let mut reg = CommandRegistry::new();
        let result = reg.register(Arc::new(AliasedCommand {
            name: "echo",
            aliases: &["e", "e"],
        }));
        assert!(matches!(result, Err(PluginError::DuplicateTrigger(t)) if t == "e"));
        assert!(!reg.names().contains(&"echo"));
    }

    #[test]
    fn registered_alias_dispatches() {
        let mut reg = CommandRegistry::new();
        reg.register(Arc::new(AliasedCommand {
            name: "echo",
            aliases: &["e"],
        }))
        .unwrap();
        let (result, output) = dispatch(&reg, "e");
        assert!(result.is_ok());
        assert_eq!(output, "echo\n");
    }

    #[test]
    fn format_label_no_aliases() {
        assert_eq!(format_label("ping", &[]), "ping");
    }

    #[test]
    fn format_label_with_aliases() {
        assert_eq!(format_label("help", &["h", "?"]), "help (h, ?)");
    }
}
