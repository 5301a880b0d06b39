//! CLI entry point for staticle

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "staticle")]
#[command(version)]
#[command(about = "A file-based markdown blog engine", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the blog server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Reload posts when the posts directory changes
        #[arg(short, long)]
        watch: bool,
    },

    /// List blog content
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Search posts
    Search {
        /// Words to look for
        query: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "staticle=debug,info"
    } else {
        "staticle=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Serve { port, host, watch } => {
            let blog = staticle::Staticle::new(&base_dir)?;
            let host = host.unwrap_or_else(|| blog.config.host.clone());
            let port = port.unwrap_or(blog.config.port);

            tracing::info!("Starting server at http://{}:{}", host, port);
            staticle::server::start(&blog, &host, port, watch).await?;
        }

        Commands::List { r#type } => {
            let blog = staticle::Staticle::new(&base_dir)?;
            staticle::commands::list::run(&blog, &r#type)?;
        }

        Commands::Search { query } => {
            let blog = staticle::Staticle::new(&base_dir)?;
            staticle::commands::search::run(&blog, &query)?;
        }

        Commands::Version => {
            println!("staticle version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
