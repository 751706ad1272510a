use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "tessera", version, about = "Tessera token CLI")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Signing secret management
    Keys {
        #[command(subcommand)]
        cmd: KeysCommand,
    },

    /// Issue, inspect and verify tokens
    Token {
        #[command(subcommand)]
        cmd: TokenCommand,
    },
}

#[derive(Subcommand, Debug)]
enum KeysCommand {
    /// Generate a new random signing secret
    Generate {
        /// Directory to write secret.key into (prints to stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum TokenCommand {
    /// Issue a token for a subject id
    Issue {
        /// Secret key file or base64 value
        #[arg(long, env = "TESSERA_SECRET_KEY", hide_env_values = true)]
        key: Option<String>,

        /// Subject (user) id, stored in the `aud` claim
        #[arg(long)]
        subject: i64,

        /// JSON payload carried in the token
        #[arg(long)]
        message: Option<String>,

        /// Validity window, e.g. "15d", "24h" (default 15d)
        #[arg(long)]
        validity: Option<String>,

        /// Write the token to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Decode a token without checking its signature
    Inspect {
        /// Token string or file containing it
        token: String,
    },

    /// Validate a token against the secret and the current time
    Verify {
        /// Secret key file or base64 value
        #[arg(long, env = "TESSERA_SECRET_KEY", hide_env_values = true)]
        key: Option<String>,

        /// Token string or file containing it
        token: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Keys { cmd } => match cmd {
            KeysCommand::Generate { output } => commands::keys::generate(output)?,
        },

        Command::Token { cmd } => match cmd {
            TokenCommand::Issue {
                key,
                subject,
                message,
                validity,
                output,
            } => commands::token::issue(key, subject, message, validity, output)?,
            TokenCommand::Inspect { token } => commands::token::inspect(token)?,
            TokenCommand::Verify { key, token } => {
                commands::token::verify(key, token)?;
            }
        },
    }

    Ok(())
}
