#![forbid(unsafe_code)]

mod cmd;
mod guard;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode};
use std::env;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use guard::GuardError;
use till_client::ApiError;
use till_core::config::ConfigError;
use till_core::draft::{DraftError, ValidationError};
use till_core::error::ErrorCode;
use till_core::session::SessionError;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "till: retail management console",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format (defaults to pretty on a TTY, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (alias for --format json).
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Session",
        about = "Log in and cache a session",
        long_about = "Authenticate against the server and cache the session locally.",
        after_help = "EXAMPLES:\n    # Log in interactively via TILL_PASSWORD\n    TILL_PASSWORD=secret till login --username ana\n\n    # Emit machine-readable output\n    till login --username ana --password secret --json"
    )]
    Login(cmd::login::LoginArgs),

    #[command(
        next_help_heading = "Session",
        about = "Clear the cached session",
        long_about = "Remove the cached identity and token. Safe to repeat.",
        after_help = "EXAMPLES:\n    # Log out\n    till logout"
    )]
    Logout,

    #[command(
        next_help_heading = "Session",
        about = "Show the cached identity",
        long_about = "Print the locally cached identity without contacting the server.",
        after_help = "EXAMPLES:\n    # Who am I?\n    till whoami\n\n    # Emit machine-readable output\n    till whoami --json"
    )]
    Whoami,

    #[command(
        next_help_heading = "Session",
        about = "Register a new account",
        long_about = "Create a new account on the server.",
        after_help = "EXAMPLES:\n    # Register a seller\n    till register --username ana --full-name \"Ana P\" --email ana@shop.test --role seller"
    )]
    Register(cmd::register::RegisterArgs),

    #[command(
        next_help_heading = "Catalog",
        about = "Manage products and stock",
        after_help = "EXAMPLES:\n    # List, filtered and sorted\n    till products list --search coffee --sort price --desc\n\n    # Adjust stock\n    till products stock 3 --change -5 --reason \"breakage\""
    )]
    Products {
        #[command(subcommand)]
        command: cmd::products::ProductsCommand,
    },

    #[command(
        next_help_heading = "Staff",
        about = "Manage employees and shifts",
        after_help = "EXAMPLES:\n    # List employees\n    till employees list --sort full_name\n\n    # Clock in\n    till employees clock-in"
    )]
    Employees {
        #[command(subcommand)]
        command: cmd::employees::EmployeesCommand,
    },

    #[command(
        next_help_heading = "Sales",
        about = "Record and revert sales",
        after_help = "EXAMPLES:\n    # Sell two of product 1 and one of product 2\n    till sales new --item 1:2 --item 2:1\n\n    # Revert a sale\n    till sales revert 42 --yes"
    )]
    Sales {
        #[command(subcommand)]
        command: cmd::sales::SalesCommand,
    },

    #[command(
        next_help_heading = "Reports",
        about = "Read-only report aggregates",
        after_help = "EXAMPLES:\n    # Daily totals for August\n    till reports daily --from 2026-08-01 --to 2026-08-31\n\n    # Recent inventory movements\n    till reports movements --limit 20"
    )]
    Reports {
        #[command(subcommand)]
        command: cmd::reports::ReportsCommand,
    },

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    till completions bash"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("TILL_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "till=debug,info"
        } else {
            "till=info,warn"
        })
    });

    let format = env::var("TILL_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

/// Walk the error chain and pick the taxonomy code for the most specific
/// typed error found. Anything unrecognized is an internal error.
fn classify(err: &anyhow::Error) -> CliError {
    for cause in err.chain() {
        if let Some(cli) = cause.downcast_ref::<CliError>() {
            return CliError {
                code: cli.code.clone(),
                message: cli.message.clone(),
                hint: cli.hint.clone(),
            };
        }
        if let Some(guard) = cause.downcast_ref::<GuardError>() {
            match guard {
                GuardError::Unauthenticated(_) => {
                    return CliError::from_code(ErrorCode::Unauthenticated);
                }
                GuardError::Session(SessionError::Corrupt { .. }) => {
                    return CliError::with_message(ErrorCode::SessionCorrupt, guard.to_string());
                }
                GuardError::Session(_) | GuardError::Config(ConfigError::Io { .. }) => {
                    return CliError::with_message(
                        ErrorCode::InternalUnexpected,
                        guard.to_string(),
                    );
                }
                GuardError::Config(ConfigError::Parse { .. }) => {
                    return CliError::with_message(
                        ErrorCode::ConfigParseError,
                        guard.to_string(),
                    );
                }
            }
        }
        if let Some(api) = cause.downcast_ref::<ApiError>() {
            let code = match api {
                ApiError::Unauthenticated => ErrorCode::Unauthenticated,
                ApiError::ServerRejected { .. } => ErrorCode::ServerRejected,
                ApiError::RequestFailed { .. } | ApiError::Decode(_) => ErrorCode::RequestFailed,
            };
            return CliError::with_message(code, api.to_string());
        }
        if let Some(validation) = cause.downcast_ref::<ValidationError>() {
            return CliError::with_message(ErrorCode::ValidationFailed, validation.to_string());
        }
        if let Some(draft) = cause.downcast_ref::<DraftError>() {
            let code = match draft {
                DraftError::Validation(_) => ErrorCode::ValidationFailed,
                DraftError::NoSuchLine(_) | DraftError::NothingToSubmit => {
                    ErrorCode::InvalidArgument
                }
            };
            return CliError::with_message(code, draft.to_string());
        }
        if let Some(session) = cause.downcast_ref::<SessionError>() {
            let code = match session {
                SessionError::Corrupt { .. } => ErrorCode::SessionCorrupt,
                SessionError::Io(_) => ErrorCode::InternalUnexpected,
            };
            return CliError::with_message(code, session.to_string());
        }
        if cause.downcast_ref::<till_core::model::ParseEnumError>().is_some() {
            return CliError::with_message(ErrorCode::InvalidArgument, cause.to_string());
        }
        if let Some(config) = cause.downcast_ref::<ConfigError>() {
            let code = match config {
                ConfigError::Parse { .. } => ErrorCode::ConfigParseError,
                ConfigError::Io { .. } => ErrorCode::InternalUnexpected,
            };
            return CliError::with_message(code, config.to_string());
        }
    }
    CliError::with_message(ErrorCode::InternalUnexpected, err.to_string())
}

fn dispatch(command: Commands, output: OutputMode) -> anyhow::Result<()> {
    match command {
        Commands::Login(ref args) => cmd::login::run_login(args, output),
        Commands::Logout => cmd::login::run_logout(output),
        Commands::Whoami => cmd::login::run_whoami(output),
        Commands::Register(ref args) => cmd::register::run_register(args, output),
        Commands::Products { ref command } => cmd::products::run(command, output),
        Commands::Employees { ref command } => cmd::employees::run(command, output),
        Commands::Sales { ref command } => cmd::sales::run(command, output),
        Commands::Reports { ref command } => cmd::reports::run(command, output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    let output = output::resolve_output_mode(cli.format, cli.json);

    if let Err(err) = dispatch(cli.command, output) {
        let cli_error = classify(&err);
        // Rendering to stderr can itself fail (closed pipe); nothing left
        // to do about it at this point.
        let _ = output::render_error(output, &cli_error);
        std::process::exit(1);
    }
}
