use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use chatline::core::config::{self, ChatlineConfig};
use chatline::core::error::ChatError;
use chatline::core::lookup::{Target, find_conversation};
use chatline::core::session::Session;
use chatline::core::store::Store;
use chatline::remote::GraphClient;
use chatline::tui::{self, UiOptions};
use clap::{Parser, Subcommand};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "chatline", about = "Terminal chat client for Teams-style chats and channels")]
struct Args {
    /// Use the signed-in user remembered in the cache instead of asking the service
    #[arg(long, global = true)]
    offline: bool,

    /// Cache file to use (overrides config file and CHATLINE_CACHE_PATH)
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download every chat and channel message into the local cache
    Cache,
    /// Open a chat with one person, or a group chat with --group
    Chat {
        /// Display name of the other person
        #[arg(required_unless_present = "group")]
        name: Option<String>,
        /// Topic of a group chat
        #[arg(long, conflicts_with = "name")]
        group: Option<String>,
    },
    /// List the threads of a channel
    Channel { team: String, channel: String },
    /// Open one thread of a channel
    Thread {
        team: String,
        channel: String,
        /// Remote id of the thread's first message
        root: String,
    },
}

impl Command {
    fn target(self) -> Option<Target> {
        match self {
            Command::Cache => None,
            Command::Chat { group: Some(topic), .. } => Some(Target::Group(topic)),
            Command::Chat { name, .. } => Some(Target::Direct(name.unwrap_or_default())),
            Command::Channel { team, channel } => Some(Target::Channel { team, channel }),
            Command::Thread { team, channel, root } => Some(Target::Thread {
                team,
                channel,
                root_remote_id: root,
            }),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to chatline.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("chatline.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("chatline starting up");

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("chatline: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), ChatError> {
    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{e}, using defaults");
        eprintln!("chatline: {e}, using defaults");
        ChatlineConfig::default()
    });
    let config = config::resolve(&file_config, args.cache.as_deref());

    let store = Store::open(&config.cache_path)?;
    let service = GraphClient::new(
        config.access_token.clone().unwrap_or_default(),
        Some(config.base_url.clone()),
    );
    let mut session = Session::connect(store, Box::new(service), args.offline)?;

    let Some(target) = args.command.target() else {
        let summary = session.refill_cache(false)?;
        println!(
            "cached {} messages from {} chats and {} channels",
            summary.messages, summary.threads, summary.channels
        );
        return Ok(());
    };

    let conversation = find_conversation(&session.store, session.current_user.id, &target)?;
    let options = UiOptions {
        show_timestamps: config.show_timestamps,
    };
    tui::run(&mut session, conversation, options)
}
