use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quizcards_core::model::{DeckSummary, Face};
use quizcards_core::wire::{DeckLoadPayload, parse_deck_list};
use services::config::{parse_save_policy, parse_url, with_trailing_slash};
use services::{
    ClientConfig, ConfigError, CredentialEncryptor, FormSubmitter, HttpFormSubmitter,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    Config(ConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<ConfigError> for ArgsError {
    fn from(err: ConfigError) -> Self {
        ArgsError::Config(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    config: ClientConfig,
    deck: Option<DeckLoadPayload>,
    deck_list: Vec<DeckSummary>,
    submitter: Arc<dyn FormSubmitter>,
}

impl UiApp for DesktopApp {
    fn config(&self) -> ClientConfig {
        self.config.clone()
    }

    fn deck(&self) -> Option<DeckLoadPayload> {
        self.deck.clone()
    }

    fn deck_list(&self) -> Vec<DeckSummary> {
        self.deck_list.clone()
    }

    fn submitter(&self) -> Arc<dyn FormSubmitter> {
        Arc::clone(&self.submitter)
    }

    // No password cipher ships with the client; sign-in stays disabled.
    fn credentials(&self) -> Option<CredentialEncryptor> {
        None
    }
}

struct Args {
    config: ClientConfig,
    deck_file: Option<PathBuf>,
    decks_file: Option<PathBuf>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--server <url>] [--media <url>] [--deck <file>] [--decks <file>]");
    eprintln!("                      [--min-cards <n>] [--start-with term|definition]");
    eprintln!();
    eprintln!("  --deck   deck JSON the editor, flashcards and quiz open on");
    eprintln!("  --decks  deck list JSON for the search page");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZCARDS_SERVER_URL, QUIZCARDS_MEDIA_URL, QUIZCARDS_MIN_CARDS,");
    eprintln!("  QUIZCARDS_START_WITH, QUIZCARDS_CSRF_TOKEN, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut config = ClientConfig::from_env()?;
        let mut server = None;
        let mut media = None;
        let mut deck_file = None;
        let mut decks_file = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--server" => {
                    let value = require_value(args, "--server")?;
                    server = Some(parse_url("--server", &value)?);
                }
                "--media" => {
                    let value = require_value(args, "--media")?;
                    media = Some(with_trailing_slash(parse_url("--media", &value)?));
                }
                "--deck" => deck_file = Some(PathBuf::from(require_value(args, "--deck")?)),
                "--decks" => decks_file = Some(PathBuf::from(require_value(args, "--decks")?)),
                "--min-cards" => {
                    let value = require_value(args, "--min-cards")?;
                    config.save_policy = parse_save_policy("--min-cards", &value)?;
                }
                "--start-with" => {
                    let value = require_value(args, "--start-with")?;
                    config.start_with = value.parse::<Face>().map_err(ConfigError::from)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        // Media follows the server unless it was configured explicitly.
        if let Some(server) = server {
            let derived = ClientConfig::for_server(server)?;
            config.server_url = derived.server_url;
            if std::env::var("QUIZCARDS_MEDIA_URL").is_err() {
                config.media_url = derived.media_url;
            }
        }
        if let Some(media) = media {
            config.media_url = media;
        }

        Ok(Self {
            config,
            deck_file,
            decks_file,
        })
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let deck = match &parsed.deck_file {
        Some(path) => Some(DeckLoadPayload::from_json(&tokio::fs::read_to_string(path).await?)?),
        None => None,
    };
    let deck_list = match &parsed.decks_file {
        Some(path) => parse_deck_list(&tokio::fs::read_to_string(path).await?)?,
        None => Vec::new(),
    };
    let submitter: Arc<dyn FormSubmitter> =
        Arc::new(HttpFormSubmitter::new(&parsed.config.server_url)?);

    info!(
        server = %parsed.config.server_url,
        media = %parsed.config.media_url,
        deck_loaded = deck.is_some(),
        decks = deck_list.len(),
        "starting quizcards"
    );

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        config: parsed.config,
        deck,
        deck_list,
        submitter,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quizcards")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
