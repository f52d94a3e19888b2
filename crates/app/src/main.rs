use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock, HostSink, PanelService};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use ui::{App, UiApp, build_app_context};
use vibely_core::protocol::{HostMessage, PanelMessage};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidOutDir { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidOutDir { raw } => write!(f, "invalid --out value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    model_label: String,
    panel_service: Arc<PanelService>,
    host: Arc<dyn HostSink>,
}

impl UiApp for DesktopApp {
    fn model_label(&self) -> String {
        self.model_label.clone()
    }

    fn panel_service(&self) -> Arc<PanelService> {
        Arc::clone(&self.panel_service)
    }

    fn host(&self) -> Arc<dyn HostSink> {
        Arc::clone(&self.host)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--out <dir>] [--model <name>]");
    eprintln!("  cargo run -p app -- stdio [--out <dir>] [--model <name>]");
    eprintln!();
    eprintln!("ui     opens the quiz panel (default)");
    eprintln!("stdio  speaks JSON lines on stdin/stdout to an editor host");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --out .");
    eprintln!();
    eprintln!("Environment (also read from .env):");
    eprintln!("  VIBELY_API_KEY or OPENAI_API_KEY, VIBELY_BASE_URL, VIBELY_MODEL,");
    eprintln!("  VIBELY_MAX_TOKENS, VIBELY_TEMPERATURE, VIBELY_TIMEOUT_SECS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Stdio,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "stdio" => Some(Self::Stdio),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    out_dir: PathBuf,
    model: Option<String>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut out_dir = PathBuf::from(".");
        let mut model = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out" => {
                    let value = require_value(args, "--out")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidOutDir { raw: value });
                    }
                    out_dir = PathBuf::from(value);
                }
                "--model" => model = Some(require_value(args, "--model")?),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { out_dir, model })
    }
}

fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .compact()
            .with_writer(std::io::stderr);

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init();
    });
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let services = AppServices::from_env(Clock::system(), parsed.out_dir, parsed.model)?;

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                model_label: services.config().model.clone(),
                panel_service: services.panel_service(),
                host: services.host(),
            });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Vibely")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Stdio => serve_stdio(&services).await,
    }
}

/// One `HostMessage` per input line, one `PanelMessage` per output line.
async fn serve_stdio(services: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let mut driver = services.driver();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let replies = match serde_json::from_str::<HostMessage>(&line) {
            Ok(message) => driver.handle_message(message).await,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring malformed host message");
                vec![PanelMessage::Rejected {
                    question_id: None,
                    reason: format!("malformed message: {err}"),
                }]
            }
        };
        for reply in replies {
            let mut encoded = serde_json::to_string(&reply)?;
            encoded.push('\n');
            stdout.write_all(encoded.as_bytes()).await?;
        }
        stdout.flush().await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
