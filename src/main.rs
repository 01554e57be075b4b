use clap::Parser;
use colored::{control::set_override, Colorize};
use is_terminal::IsTerminal;

use debtop::cli::args::{Cli, Commands, CompletionsArgs};
use debtop::cli::commands;
use debtop::config::{Config, Paths};
use debtop::error::DebtopError;
use debtop::logging;
use debtop::progress::TerminalReporter;

fn main() {
    // Respect NO_COLOR environment variable (https://no-color.org/)
    // Also disable colors when stdout is not a terminal (for piping)
    if std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal() {
        set_override(false);
    }

    let cli = Cli::parse();
    let paths = Paths::default();
    let _log_guard = logging::init(&paths, cli.verbose);

    if let Err(e) = run(&cli, &paths) {
        report(&e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &Cli, paths: &Paths) -> Result<(), DebtopError> {
    let format = cli.output;

    // Handle completions command early (no config needed)
    if let Commands::Completions(CompletionsArgs { shell }) = &cli.command {
        Cli::print_completions(*shell);
        return Ok(());
    }

    let mut config = Config::load_from(paths)?;
    if let Some(mirror) = &cli.mirror {
        config.mirror.url = mirror.trim_end_matches('/').to_string();
    }

    let output = match &cli.command {
        Commands::Top(args) => {
            let reporter = TerminalReporter::new(cli.quiet, std::io::stderr().is_terminal());
            commands::top(&config, paths, args, reporter, format)?
        }
        Commands::Archs => commands::archs(format)?,
        Commands::Cache(args) => commands::cache(&config, paths, args, format)?,
        Commands::Config(args) => commands::config(&mut config, paths, args, format)?,
        Commands::Completions(_) => unreachable!(), // Handled above
    };

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}

/// Tell the user what went wrong
///
/// Expected failures get their own message; anything else is logged in full
/// and summarized on the terminal.
fn report(e: &DebtopError) {
    match e {
        DebtopError::Download { .. } => {
            eprintln!("{}: {}", "error".red().bold(), e);
            eprintln!("\nExiting program");
        }
        e if e.is_expected() => eprintln!("{}: {}", "error".red().bold(), e),
        e => {
            tracing::error!(error = %e, "Unexpected error");
            eprintln!(
                "{} {}",
                "Unexpected error occurred. Check logs for details.".red(),
                e.to_string().dimmed()
            );
        }
    }
}
