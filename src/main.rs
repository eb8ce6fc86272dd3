//! veneer - presentation overrides for a live multi-client session
//!
//! Usage:
//!   veneer                       → simulated session on stdin/stdout
//!   veneer --config veneer.toml  → same, with players and overlay settings from TOML
//!   veneer config                → print the default config
//!
//! Session input, one per line:
//!   /name Star, /level 42, ...   → chat commands (unknown ones reach the host)
//!   recv <json>                  → deliver a peer gossip payload
//!   render <text>                → draw text through the render hook
//!   join <id> <name> <level>     → add a player and their lobby entries
//!   dump                         → print the document
//!   quit

mod sim;

use clap::{Parser, Subcommand};
use sim::{SimConfig, StdoutChat, StdoutRenderer, StdoutTransport};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use veneer_commands::{create_default_registry, CommandInterpreter};
use veneer_core::{CommandHandler, Participant, TextObject, TextRenderer};
use veneer_overlay::memory::{MemoryDocument, MemoryRegistry};
use veneer_overlay::{Host, Overlay};

#[derive(Parser)]
#[command(
    name = "veneer",
    about = "Local presentation overrides for a live multi-client session",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to config file (TOML)
    #[arg(long, default_value = "veneer.toml")]
    config: PathBuf,

    /// Write logs to a file (in addition to stderr)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the default config as TOML
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config) = cli.command {
        print!("{}", SimConfig::default().to_toml());
        return Ok(());
    }

    let _guard = init_tracing(cli.log_file.as_deref());
    let config = SimConfig::load(&cli.config);
    run_session(config).await
}

fn init_tracing(
    log_file: Option<&std::path::Path>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "veneer=info,veneer_overlay=info,veneer_commands=info".into());
    let stderr = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match log_file {
        Some(path) => {
            let dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_os_string())
                .unwrap_or_else(|| "veneer.log".into());
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(filter).with(stderr).init();
            None
        }
    }
}

async fn run_session(config: SimConfig) -> anyhow::Result<()> {
    let registry = Arc::new(config.registry());
    let document = Arc::new(MemoryDocument::new());
    config.seed(&document);

    let overlay = Arc::new(Overlay::new(
        &config.overlay,
        Host {
            registry: registry.clone(),
            transport: Arc::new(StdoutTransport),
            document: document.clone(),
            chat: Arc::new(StdoutChat),
        },
    )?);
    let driver = overlay.start(document.mutations());

    let host_handler = |line: &str| -> String {
        if line.starts_with('/') {
            format!("Unknown command: {}", line)
        } else {
            line.to_string()
        }
    };
    let interpreter = CommandInterpreter::new(create_default_registry(), overlay.clone(), host_handler);
    let renderer = overlay.intercept(StdoutRenderer);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        match word {
            "" => {}
            "quit" | "exit" => break,
            "recv" => {
                let outcome = overlay.handle_incoming(rest);
                tracing::info!("recv -> {:?}", outcome);
            }
            "render" => renderer.update_text(&mut TextObject::new(rest)),
            "dump" => dump(&document),
            "join" => join(&registry, &document, rest),
            _ => {
                let reply = interpreter.handle(line);
                if !reply.is_empty() {
                    println!("[host] {}", reply);
                }
            }
        }
    }

    overlay.shutdown();
    driver.await?;
    Ok(())
}

fn dump(document: &MemoryDocument) {
    for (node, selector, text) in document.dump() {
        println!("{:<10} {:<34} {}", node.to_string(), selector, text);
    }
}

fn join(registry: &MemoryRegistry, document: &MemoryDocument, args: &str) {
    let parts: Vec<&str> = args.split_whitespace().collect();
    let [id, name, level] = parts.as_slice() else {
        println!("usage: join <id> <name> <level>");
        return;
    };
    let Ok(level) = level.parse::<u32>() else {
        println!("level must be a number");
        return;
    };
    registry.insert(*id, Participant::new(*name, level));
    document.append(".newbonklobby_playerentry_name", name);
    document.append(
        ".newbonklobby_playerentry_level",
        &veneer_core::rank_label(level),
    );
}
