use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Duration;

use crate::app_config::{validate_card_count, Config};
use crate::display;
use crate::errors::{AppError, ConfigError};
use crate::export::{self, ExportFormat, ExportRequest, PdfOptions};
use crate::flashcards::session::GeneratedSet;
use crate::flashcards::{Difficulty, LanguageDecks, Section, Session};
use crate::generation::FlashcardService;

// @module: Application controller for flashcard generation

/// Everything the user picks before triggering a generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub topic: String,
    pub count: usize,
    pub difficulty: Difficulty,
    pub languages: Vec<String>,
    pub section: Section,
    pub temperature: f32,
    pub export_pdf: bool,
    pub export_csv: bool,
}

impl GenerationRequest {
    /// Request for `topic` using the defaults of a configuration
    pub fn from_config(topic: impl Into<String>, config: &Config) -> Self {
        Self {
            topic: topic.into(),
            count: config.cards.count,
            difficulty: config.cards.difficulty,
            languages: config.cards.languages.clone(),
            section: config.cards.section,
            temperature: config.generation.temperature,
            export_pdf: config.export.pdf,
            export_csv: config.export.csv,
        }
    }

    /// Reject input that must not reach the model
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topic.trim().is_empty() {
            return Err(ConfigError::InvalidValue("topic must not be empty".to_string()));
        }
        validate_card_count(self.count)?;
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidValue(format!(
                "temperature must be between 0 and 1, got {}",
                self.temperature
            )));
        }
        Ok(())
    }

    /// Export formats enabled for this request
    pub fn formats(&self) -> Vec<ExportFormat> {
        let mut formats = Vec::new();
        if self.export_pdf {
            formats.push(ExportFormat::Pdf);
        }
        if self.export_csv {
            formats.push(ExportFormat::Csv);
        }
        formats
    }
}

/// Result of a full run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Terminal rendering of the cards
    pub rendered: String,
    /// Files written by the exporters
    pub written: Vec<PathBuf>,
}

/// Main application controller for flashcard generation
#[derive(Debug)]
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Model-backed generation
    service: FlashcardService,

    // @field: Result of the last successful generation
    session: Session,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        let service = FlashcardService::from_config(&config)?;
        Ok(Self::with_service(config, service))
    }

    /// Create a controller around an existing service
    pub fn with_service(config: Config, service: FlashcardService) -> Self {
        let session = Session::new(config.cards.section);
        Self {
            config,
            service,
            session,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn service(&self) -> &FlashcardService {
        &self.service
    }

    /// Generate base cards and translations and store them in the session.
    ///
    /// Returns `None` when the model returned no cards. The previous session
    /// content and section are kept unless generation succeeds.
    pub async fn generate(&mut self, request: &GenerationRequest) -> Result<Option<&GeneratedSet>, AppError> {
        request.validate()?;

        let spinner = Self::spinner(format!("Generating base English flashcards with {}...", self.service.provider_name()));
        let base = self
            .service
            .generate_base(&request.topic, request.count, request.difficulty, request.temperature)
            .await;
        spinner.finish_and_clear();

        let base = match base {
            Ok(cards) => cards,
            Err(e) => {
                if let Some(raw) = e.raw_excerpt() {
                    warn!("Raw model output:\n{}", raw);
                }
                return Err(e.into());
            }
        };

        if base.is_empty() {
            warn!("No flashcards returned. Adjust topic or try again.");
            return Ok(None);
        }

        let spinner = Self::spinner("Translating to selected languages...".to_string());
        let decks = self
            .service
            .translate(&base, &request.languages, request.temperature)
            .await;
        spinner.finish_and_clear();

        for deck in decks.iter() {
            debug!("{}: {} cards", deck.language, deck.cards.len());
        }

        self.session.replace(request.topic.trim(), decks);
        self.session.set_section(request.section);
        Ok(self.session.current())
    }

    /// Terminal rendering of the current session
    pub fn render_current(&self) -> Option<String> {
        self.session
            .current()
            .map(|set| display::render_decks(&set.decks, self.session.section()))
    }

    /// Write export files for the current session
    pub fn export_current(&self, formats: &[ExportFormat], unix_time: i64) -> Result<Vec<PathBuf>, AppError> {
        let set = match self.session.current() {
            Some(set) => set,
            None => {
                warn!("Nothing to export yet, generate flashcards first");
                return Ok(Vec::new());
            }
        };
        if formats.is_empty() {
            return Ok(Vec::new());
        }

        self.export_decks(&set.topic, &set.decks, formats, unix_time)
    }

    fn export_decks(
        &self,
        topic: &str,
        decks: &LanguageDecks,
        formats: &[ExportFormat],
        unix_time: i64,
    ) -> Result<Vec<PathBuf>, AppError> {
        let request = ExportRequest {
            topic,
            section: self.session.section(),
            formats: formats.to_vec(),
            output_dir: &self.config.export.output_dir,
            unix_time,
            pdf: PdfOptions {
                font_path: self.config.export.pdf_font_path.clone(),
            },
        };
        Ok(export::write_exports(decks, &request)?)
    }

    /// Generate, render and export in one go
    pub async fn run(&mut self, request: &GenerationRequest) -> Result<Option<RunOutcome>, AppError> {
        let start_time = std::time::Instant::now();

        if self.generate(request).await?.is_none() {
            return Ok(None);
        }

        let rendered = self.render_current().unwrap_or_default();
        let written = self.export_current(&request.formats(), chrono::Utc::now().timestamp())?;

        info!(
            "Flashcards ready in {:.1}s ({} file(s) written)",
            start_time.elapsed().as_secs_f64(),
            written.len()
        );
        self.log_usage_summary();

        Ok(Some(RunOutcome { rendered, written }))
    }

    /// Log the token usage accumulated so far
    pub fn log_usage_summary(&self) {
        debug!("{}", self.service.usage().summary());
    }

    fn spinner(message: String) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }
}
