//! note CLI
//!
//! Talks to the note message board from the terminal.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use note_core::{NoteApi, NoteClient, DEFAULT_BASE_URL};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod transport;

use transport::UreqTransport;

/// note - anonymous message board client
#[derive(Parser)]
#[command(name = "note")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the note service
    #[arg(long, env = "NOTE_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "NOTE_API_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a nickname is still free
    CheckNickname { nickname: String },

    /// Register a nickname
    SignUp { nickname: String },

    /// Sign in with a registered nickname
    SignIn { nickname: String },

    /// Post a new message
    Send {
        /// Message body
        #[arg(short, long)]
        content: String,

        /// Author nickname
        #[arg(short, long)]
        nickname: String,

        /// Image file to attach
        #[arg(short, long)]
        image: Option<PathBuf>,
    },

    /// List every message on the board
    List,

    /// Show a single message
    Show { id: u64 },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!(base_url = %cli.base_url, timeout_secs = cli.timeout_secs, "configured");
    let api = NoteApi::new(
        NoteClient::new(&cli.base_url),
        UreqTransport::new(Duration::from_secs(cli.timeout_secs)),
    );

    match cli.command {
        Commands::CheckNickname { nickname } => commands::check_nickname(&api, &nickname)?,
        Commands::SignUp { nickname } => commands::sign_up(&api, &nickname)?,
        Commands::SignIn { nickname } => commands::sign_in(&api, &nickname)?,
        Commands::Send {
            content,
            nickname,
            image,
        } => commands::send(&api, &content, &nickname, image.as_deref())?,
        Commands::List => commands::list(&api)?,
        Commands::Show { id } => commands::show(&api, id)?,
    }

    Ok(())
}
