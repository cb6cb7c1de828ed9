use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

use session_client::exchange::exchanger_for;
use session_client::storage::{FileStorage, MemoryStorage};
use session_client::{CallbackParams, ClientConfig, Session};

#[derive(Parser)]
#[command(name = "line-login")]
#[command(about = "Sign in to CO2X with LINE from the terminal")]
struct Cli {
    #[command(flatten)]
    config: ClientConfig,

    #[command(subcommand)]
    command: Command,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Open the LINE consent page and complete the login from the redirect URL
    Login,
    /// Show the cached LINE profile
    Whoami,
    /// Forget the cached LINE profile
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let exchanger = exchanger_for(&cli.config.line_backend_url)?;
    let mut session = Session::new(
        cli.config.clone(),
        Box::new(FileStorage::new(&cli.config.line_session_file)),
        Box::new(MemoryStorage::new()),
        exchanger,
    );

    match cli.command {
        Command::Login => login(&mut session).await,
        Command::Whoami => {
            match session.user() {
                Some(user) => {
                    println!("{} {}", "✓".green(), user.display_name.bold());
                    println!("  userId: {}", user.user_id);
                    if let Some(status_message) = &user.status_message {
                        println!("  status: {status_message}");
                    }
                }
                None => println!("{} Not logged in", "✗".red()),
            }
            Ok(())
        }
        Command::Logout => {
            session.logout()?;
            println!("{} Logged out", "✓".green());
            Ok(())
        }
    }
}

// The nonce lives in memory, so the redirect must be completed by this process.
async fn login(session: &mut Session) -> Result<()> {
    let authorize_url = session.login()?;

    println!("{} Open this URL in your browser:\n", "→".blue());
    println!("  {}\n", authorize_url.underline());
    print!("{} Paste the URL LINE redirected you to: ", "→".blue());
    io::stdout().flush()?;

    let mut redirect_url = String::new();
    io::stdin()
        .lock()
        .read_line(&mut redirect_url)
        .context("Failed to read the redirect URL")?;

    let params = CallbackParams::from_redirect_url(&redirect_url)?;
    let user = session.complete_login(params).await?;

    println!(
        "{} Logged in as {} ({})",
        "✓".green(),
        user.display_name.bold(),
        user.user_id
    );
    Ok(())
}
