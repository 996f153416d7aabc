// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use flashgen::app_config::{self, Config, ModelProvider};
use flashgen::app_controller::{Controller, GenerationRequest};
use flashgen::flashcards::{Difficulty, Section};
use flashgen::shell;

/// CLI Wrapper for ModelProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliModelProvider {
    Gemini,
    Ollama,
    Anthropic,
}

impl From<CliModelProvider> for ModelProvider {
    fn from(cli_provider: CliModelProvider) -> Self {
        match cli_provider {
            CliModelProvider::Gemini => ModelProvider::Gemini,
            CliModelProvider::Ollama => ModelProvider::Ollama,
            CliModelProvider::Anthropic => ModelProvider::Anthropic,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Options shared by every command that talks to a model
#[derive(Args, Debug)]
struct CommonArgs {
    /// Model provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliModelProvider>,

    /// Model name, e.g. gemini-1.5-flash
    #[arg(short, long)]
    model: Option<String>,

    /// API key (otherwise GEMINI_API_KEY / ANTHROPIC_API_KEY or the config file)
    #[arg(long)]
    api_key: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Directory export files are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Study topic or subject, e.g. "Basic SQL Joins"
    #[arg(value_name = "TOPIC")]
    topic: String,

    /// Number of flashcards (4-30)
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Audience difficulty (beginner, intermediate, advanced)
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Output languages, comma separated (English is always included)
    #[arg(short = 'L', long, value_delimiter = ',')]
    languages: Option<Vec<String>>,

    /// Card content to show and export (definition, example, q&a)
    #[arg(short, long)]
    section: Option<Section>,

    /// Sampling temperature (0.0-1.0)
    #[arg(short, long)]
    temperature: Option<f32>,

    /// Skip the PDF export
    #[arg(long)]
    no_pdf: bool,

    /// Skip the Anki CSV export
    #[arg(long)]
    no_csv: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate flashcards for a topic, print them and write export files
    Generate(GenerateArgs),

    /// Start the interactive shell
    Interactive(CommonArgs),

    /// Generate shell completions for flashgen
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// flashgen - Multilingual Flashcard Generator
///
/// Generates study flashcards with an LLM, translates them and exports
/// PDF and Anki CSV files per language.
#[derive(Parser, Debug)]
#[command(name = "flashgen")]
#[command(version)]
#[command(about = "LLM-powered multilingual flashcard generator")]
#[command(long_about = "flashgen asks an LLM provider for study flashcards, translates them into several languages and exports them as PDF and Anki CSV files.

EXAMPLES:
    flashgen generate \"Basic SQL Joins\"                     # Use the config defaults
    flashgen generate -n 12 -d advanced \"Photosynthesis\"    # 12 advanced cards
    flashgen generate -L French,Urdu -s q&a \"Rust traits\"   # Q&A cards in French and Urdu
    flashgen generate -p ollama -m llama3.2 \"Git basics\"    # Use a local Ollama model
    flashgen interactive                                    # Start the interactive shell
    flashgen completions bash > flashgen.bash               # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically. API keys are read from --api-key, then from
    GEMINI_API_KEY / ANTHROPIC_API_KEY (a .env file is loaded), then from the
    config file.

SUPPORTED PROVIDERS:
    gemini    - Google Gemini API (requires API key, default)
    ollama    - Local Ollama server
    anthropic - Anthropic Claude API (requires API key)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI colour for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => ("", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, colour) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                colour,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    if dotenvy::dotenv().is_ok() {
        log::debug!("Loaded environment from .env");
    }

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "flashgen", &mut std::io::stdout());
            Ok(())
        }
        Commands::Generate(args) => run_generate(args).await,
        Commands::Interactive(args) => run_interactive(args).await,
    }
}

/// Load the config file and apply the command line overrides
fn load_config(options: &CommonArgs) -> Result<Config> {
    // Apply the command line level right away
    if let Some(cmd_log_level) = &options.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let config_path = Path::new(&options.config_path);
    let mut config = Config::load_or_create(config_path)
        .with_context(|| format!("Failed to load config file: {}", options.config_path))?;

    if let Some(provider) = &options.provider {
        config.provider = provider.clone().into();
    }
    if let Some(model) = &options.model {
        config.set_model(model.clone());
    }
    if let Some(output_dir) = &options.output_dir {
        config.export.output_dir = output_dir.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    config.resolve_api_key(options.api_key.clone());

    config.validate().context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    Ok(config)
}

async fn run_generate(args: GenerateArgs) -> Result<()> {
    let config = load_config(&args.common)?;

    let mut request = GenerationRequest::from_config(args.topic.clone(), &config);
    if let Some(count) = args.count {
        request.count = count;
    }
    if let Some(difficulty) = args.difficulty {
        request.difficulty = difficulty;
    }
    if let Some(languages) = args.languages {
        request.languages = languages;
    }
    if let Some(section) = args.section {
        request.section = section;
    }
    if let Some(temperature) = args.temperature {
        request.temperature = temperature;
    }
    request.export_pdf &= !args.no_pdf;
    request.export_csv &= !args.no_csv;
    request.validate().context("Invalid generation options")?;

    let mut controller = Controller::with_config(config)?;
    match controller.run(&request).await? {
        Some(outcome) => {
            print!("{}", outcome.rendered);
            for path in &outcome.written {
                info!("Saved {}", path.display());
            }
        }
        None => warn!("No flashcards returned. Adjust topic or try again."),
    }

    Ok(())
}

async fn run_interactive(args: CommonArgs) -> Result<()> {
    let config = load_config(&args)?;
    let controller = Controller::with_config(config)?;

    let stdin = std::io::stdin();
    let mut shell = shell::Shell::new(controller);
    shell.run(stdin.lock(), std::io::stdout()).await?;
    Ok(())
}
