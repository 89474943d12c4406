//! Bulletin CLI
//!
//! Headless host for the Bulletin application core. Runs against an
//! in-process fake posts server by default, or against a live
//! `/fakeApi/posts` endpoint with `--remote`.

use anyhow::Result;
use bulletin_core::{PostId, ReactionName};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "bulletin")]
#[command(about = "Bulletin - headless posts board client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Talk to the posts API at the configured base URL instead of the
    /// built-in fake server
    #[arg(long, global = true)]
    remote: bool,

    /// Override the posts API base URL (implies --remote)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print state as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk through a full session: login, fetch, post, react, logout
    Demo {
        /// Wait for the post-created toast to expire before logging out
        #[arg(long)]
        wait_for_toast: bool,
    },

    /// Fetch and list posts
    Fetch,

    /// Create a post
    Post {
        /// Post title
        title: String,

        /// Post body
        content: String,

        /// Author user id
        #[arg(short = 'u', long = "as", default_value = "0")]
        author: String,
    },

    /// Add a reaction to a post
    React {
        /// Target post id
        post_id: String,

        /// Reaction name (thumbsUp, tada, heart, rocket, eyes)
        #[arg(value_parser = parse_reaction)]
        reaction: ReactionName,
    },

    /// Refresh and list server notifications
    Notifications {
        /// Mark every listed notification read afterwards
        #[arg(long)]
        mark_read: bool,
    },

    /// List known users
    Users,
}

fn parse_reaction(s: &str) -> Result<ReactionName, String> {
    s.parse().map_err(|e: bulletin_core::BulletinError| e.to_string())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let config = commands::load_config(cli.config.as_deref(), cli.api_url.as_deref())?;
    let remote = cli.remote || cli.api_url.is_some();
    let app = commands::build_app(config, remote)?;
    let output = render::Output::new(cli.json);

    match cli.command {
        Commands::Demo { wait_for_toast } => {
            commands::demo(&app, &output, wait_for_toast).await?;
        }

        Commands::Fetch => {
            commands::fetch(&app, &output).await?;
        }

        Commands::Post {
            title,
            content,
            author,
        } => {
            commands::post(&app, &output, &author, title, content).await?;
        }

        Commands::React { post_id, reaction } => {
            commands::react(&app, &output, PostId::new(post_id), reaction).await?;
        }

        Commands::Notifications { mark_read } => {
            commands::notifications(&app, &output, mark_read).await?;
        }

        Commands::Users => {
            output.users(&app.users())?;
        }
    }

    Ok(())
}
