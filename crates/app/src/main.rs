use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::Catalog;
use services::{Analytics, QuizConfig, ShareLauncher};
use tracing_subscriber::{EnvFilter, fmt as log_fmt, prelude::*};
use ui::{App, ScriptAnalyticsSink, SystemLauncher, UiApp, build_app_context};
use url::Url;

mod simulate;

use simulate::{CardPlan, simulate};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidAnswers { raw: String },
    InvalidCard { raw: String },
    InvalidPageUrl { raw: String },
    MissingAnswers,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidAnswers { raw } => write!(f, "invalid --answers value: {raw}"),
            ArgsError::InvalidCard { raw } => write!(f, "invalid --choose value: {raw}"),
            ArgsError::InvalidPageUrl { raw } => write!(f, "invalid --page-url value: {raw}"),
            ArgsError::MissingAnswers => write!(f, "simulate requires --answers"),
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
    config: Arc<QuizConfig>,
    catalog: Arc<Catalog>,
    embed_lead_form: bool,
}

impl UiApp for DesktopApp {
    fn config(&self) -> Arc<QuizConfig> {
        Arc::clone(&self.config)
    }

    fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    fn analytics(&self) -> Analytics {
        if self.config.analytics.enabled {
            Analytics::new(Arc::new(ScriptAnalyticsSink))
        } else {
            Analytics::disabled()
        }
    }

    fn launcher(&self) -> Arc<dyn ShareLauncher> {
        Arc::new(SystemLauncher)
    }

    fn embed_lead_form(&self) -> bool {
        self.embed_lead_form
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui       [--config <path>] [--page-url <url>] [--no-form]");
    eprintln!("  cargo run -p app -- simulate --answers a,b,c [--choose <card> | --skip-all]");
    eprintln!("                               [--config <path>] [--page-url <url>]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_CONFIG, QUIZ_PAGE_URL, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Simulate,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "simulate" => Some(Self::Simulate),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    config_path: Option<PathBuf>,
    page_url: Option<Url>,
    embed_lead_form: bool,
    answers: Option<Vec<usize>>,
    plan: Option<CardPlan>,
}

impl Args {
    fn parse(
        cmd: Command,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            config_path: std::env::var_os("QUIZ_CONFIG").map(PathBuf::from),
            page_url: std::env::var("QUIZ_PAGE_URL")
                .ok()
                .map(|raw| parse_page_url(&raw))
                .transpose()?,
            embed_lead_form: true,
            ..Self::default()
        };

        while let Some(arg) = args.next() {
            match (cmd, arg.as_str()) {
                (_, "--config") => {
                    parsed.config_path = Some(PathBuf::from(require_value(args, "--config")?));
                }
                (_, "--page-url") => {
                    parsed.page_url = Some(parse_page_url(&require_value(args, "--page-url")?)?);
                }
                (Command::Ui, "--no-form") => parsed.embed_lead_form = false,
                (Command::Simulate, "--answers") => {
                    parsed.answers = Some(parse_answers(&require_value(args, "--answers")?)?);
                }
                (Command::Simulate, "--choose") => {
                    let raw = require_value(args, "--choose")?;
                    let index = raw
                        .trim()
                        .parse()
                        .map_err(|_| ArgsError::InvalidCard { raw: raw.clone() })?;
                    parsed.plan = Some(CardPlan::Choose(index));
                }
                (Command::Simulate, "--skip-all") => parsed.plan = Some(CardPlan::SkipAll),
                (_, "--help" | "-h") => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        if cmd == Command::Simulate && parsed.answers.is_none() {
            return Err(ArgsError::MissingAnswers);
        }
        Ok(parsed)
    }
}

fn parse_page_url(raw: &str) -> Result<Url, ArgsError> {
    Url::parse(raw.trim()).map_err(|_| ArgsError::InvalidPageUrl {
        raw: raw.to_string(),
    })
}

fn parse_answers(raw: &str) -> Result<Vec<usize>, ArgsError> {
    raw.split(',')
        .map(|part| part.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ArgsError::InvalidAnswers {
            raw: raw.to_string(),
        })
}

fn load_config(args: &Args) -> Result<QuizConfig, Box<dyn std::error::Error>> {
    let mut config = match args.config_path.as_deref() {
        Some(path) => QuizConfig::load(path)?,
        None => QuizConfig::default(),
    };
    if let Some(url) = &args.page_url {
        config.set_page_url(url.as_str())?;
    }
    Ok(config)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(log_fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand launches the UI.
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

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();
    let config = load_config(&parsed)?;

    match cmd {
        Command::Ui => {
            tracing::info!(page_url = %config.page_url, "launching quiz window");
            let app = DesktopApp {
                config: Arc::new(config),
                catalog: Arc::new(Catalog::data_match()),
                embed_lead_form: parsed.embed_lead_form,
            };
            let app: Arc<dyn UiApp> = Arc::new(app);
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Find your perfect data match")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Simulate => {
            let answers = parsed.answers.unwrap_or_default();
            let plan = parsed.plan.unwrap_or(CardPlan::SkipAll);
            let report = simulate(&config, &answers, plan)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(cmd: Command, args: &[&str]) -> Result<Args, ArgsError> {
        let mut iter = args.iter().map(|arg| (*arg).to_string());
        Args::parse(cmd, &mut iter)
    }

    #[test]
    fn simulate_requires_answers() {
        assert!(matches!(
            parse(Command::Simulate, &["--skip-all"]),
            Err(ArgsError::MissingAnswers)
        ));
    }

    #[test]
    fn simulate_parses_answers_and_choice() {
        let args = parse(Command::Simulate, &["--answers", "2, 0,1", "--choose", "3"]).unwrap();
        assert_eq!(args.answers, Some(vec![2, 0, 1]));
        assert_eq!(args.plan, Some(CardPlan::Choose(3)));
    }

    #[test]
    fn malformed_answers_are_reported() {
        assert!(matches!(
            parse(Command::Simulate, &["--answers", "1,x,2"]),
            Err(ArgsError::InvalidAnswers { .. })
        ));
    }

    #[test]
    fn ui_rejects_simulate_flags() {
        assert!(matches!(
            parse(Command::Ui, &["--answers", "1,2,3"]),
            Err(ArgsError::UnknownArg(arg)) if arg == "--answers"
        ));
    }

    #[test]
    fn ui_can_disable_embedded_form() {
        let args = parse(Command::Ui, &["--no-form"]).unwrap();
        assert!(!args.embed_lead_form);
    }

    #[test]
    fn page_url_must_be_absolute() {
        assert!(matches!(
            parse(Command::Ui, &["--page-url", "not a url"]),
            Err(ArgsError::InvalidPageUrl { .. })
        ));
    }
}
