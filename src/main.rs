use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use whoami_plugin::commands::CommandRegistry;
use whoami_plugin::connection::ConfigConnection;
use whoami_plugin::consts::{AUTHOR, CF_HOME_ENV, DEFAULT_COMMAND, help_footer};
use whoami_plugin::logging;
use whoami_plugin::plugin::PluginMetadata;

#[derive(Parser)]
#[command(
    name = "cf-whoami",
    version,
    author = AUTHOR,
    about = "Show who you are logged in as and what you are targeting.",
    after_help = help_footer()
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Directory containing the cf client's .cf folder (defaults to your home)
    #[arg(long, env = CF_HOME_ENV)]
    cf_home: Option<PathBuf>,

    /// Print plugin metadata as JSON and exit
    #[arg(long)]
    metadata: bool,

    /// Command to run
    #[arg(default_value = DEFAULT_COMMAND)]
    command: String,

    /// Arguments passed to the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let registry = CommandRegistry::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.metadata {
        let json = PluginMetadata::from_registry(&registry)
            .to_json()
            .context("failed to serialize plugin metadata")?;
        writeln!(out, "{json}")?;
        return Ok(());
    }

    let conn = ConfigConnection::new(cli.cf_home.as_deref())?;
    tracing::debug!(path = ?conn.path(), "using session file");

    if let Err(e) = registry.dispatch(&cli.command, &cli.args, &conn, &mut out) {
        out.flush()?;
        eprintln!("FAILED");
        eprintln!("{e}");
        std::process::exit(1);
    }

    out.flush()?;
    Ok(())
}
