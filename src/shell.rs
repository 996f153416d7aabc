/*!
 * Interactive prompt loop.
 *
 * The shell keeps a form (topic, count, difficulty, languages, section and
 * export toggles) and a controller. Each line is one command; errors are
 * reported and the loop keeps running until `quit` or end of input.
 */

use log::error;
use std::io::{BufRead, Write};

use crate::app_config::{MAX_CARD_COUNT, MIN_CARD_COUNT};
use crate::app_controller::{Controller, GenerationRequest};
use crate::errors::AppError;
use crate::flashcards::{Difficulty, Section};
use crate::language_utils::SUPPORTED_LANGUAGES;

const HELP: &str = "\
Commands:
  topic <text>             set the study topic
  count <n>                number of cards (4-30)
  difficulty <level>       beginner | intermediate | advanced
  languages <a, b, ...>    output languages (English is always included)
  section <name>           definition | example | q&a
  pdf on|off               toggle PDF export
  csv on|off               toggle Anki CSV export
  temperature <0.0-1.0>    sampling temperature
  settings                 show the current form
  generate                 generate, show and export flashcards
  show                     show the last generated flashcards
  export                   write export files for the last flashcards
  check                    check that the model provider is reachable
  help                     show this help
  quit                     leave the shell";

/// One parsed shell line
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Topic(String),
    Count(usize),
    Difficulty(Difficulty),
    Languages(Vec<String>),
    Section(Section),
    Pdf(bool),
    Csv(bool),
    Temperature(f32),
    Settings,
    Generate,
    Show,
    Export,
    Check,
    Help,
    Quit,
    Empty,
}

/// Parse one input line
pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellCommand::Empty);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "topic" => Ok(ShellCommand::Topic(rest.to_string())),
        "count" => {
            let count: usize = rest.parse().map_err(|_| format!("'{}' is not a number", rest))?;
            if !(MIN_CARD_COUNT..=MAX_CARD_COUNT).contains(&count) {
                return Err(format!("count must be between {} and {}", MIN_CARD_COUNT, MAX_CARD_COUNT));
            }
            Ok(ShellCommand::Count(count))
        }
        "difficulty" => rest
            .parse()
            .map(ShellCommand::Difficulty)
            .map_err(|e: crate::errors::ConfigError| e.to_string()),
        "languages" | "langs" => Ok(ShellCommand::Languages(
            rest.split(',')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        )),
        "section" => rest
            .parse()
            .map(ShellCommand::Section)
            .map_err(|e: crate::errors::ConfigError| e.to_string()),
        "pdf" => parse_toggle(rest).map(ShellCommand::Pdf),
        "csv" => parse_toggle(rest).map(ShellCommand::Csv),
        "temperature" | "temp" => {
            let value: f32 = rest.parse().map_err(|_| format!("'{}' is not a number", rest))?;
            if !(0.0..=1.0).contains(&value) {
                return Err("temperature must be between 0 and 1".to_string());
            }
            Ok(ShellCommand::Temperature(value))
        }
        "settings" => Ok(ShellCommand::Settings),
        "generate" | "run" => Ok(ShellCommand::Generate),
        "show" => Ok(ShellCommand::Show),
        "export" => Ok(ShellCommand::Export),
        "check" => Ok(ShellCommand::Check),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command '{}', type 'help'", other)),
    }
}

fn parse_toggle(value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Ok(true),
        "off" | "no" | "false" | "0" => Ok(false),
        other => Err(format!("expected on or off, got '{}'", other)),
    }
}

/// Interactive flashcard shell
pub struct Shell {
    controller: Controller,
    form: GenerationRequest,
}

impl Shell {
    pub fn new(controller: Controller) -> Self {
        let form = GenerationRequest::from_config("", controller.config());
        Self { controller, form }
    }

    pub fn form(&self) -> &GenerationRequest {
        &self.form
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Read commands until `quit` or end of input
    pub async fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<(), AppError> {
        writeln!(output, "Multilingual Flashcard Generator. Type 'help' for commands.")?;

        loop {
            write!(output, "flashgen> ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break;
            }

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(message) => {
                    writeln!(output, "{}", message)?;
                    continue;
                }
            };

            if command == ShellCommand::Quit {
                break;
            }
            self.execute(command, &mut output).await?;
        }

        self.controller.log_usage_summary();
        Ok(())
    }

    /// Apply one command. Generation and export failures are reported, not returned.
    pub async fn execute<W: Write>(&mut self, command: ShellCommand, output: &mut W) -> Result<(), AppError> {
        match command {
            ShellCommand::Topic(topic) => self.form.topic = topic,
            ShellCommand::Count(count) => self.form.count = count,
            ShellCommand::Difficulty(difficulty) => self.form.difficulty = difficulty,
            ShellCommand::Languages(languages) => self.form.languages = languages,
            ShellCommand::Section(section) => {
                self.form.section = section;
                self.controller.session_mut().set_section(section);
                if let Some(rendered) = self.controller.render_current() {
                    write!(output, "{}", rendered)?;
                }
            }
            ShellCommand::Pdf(enabled) => self.form.export_pdf = enabled,
            ShellCommand::Csv(enabled) => self.form.export_csv = enabled,
            ShellCommand::Temperature(value) => self.form.temperature = value,
            ShellCommand::Settings => write!(output, "{}", self.describe_form())?,
            ShellCommand::Generate => {
                if self.form.topic.trim().is_empty() {
                    writeln!(output, "Enter a topic first (topic <text>).")?;
                    return Ok(());
                }
                match self.controller.run(&self.form).await {
                    Ok(Some(outcome)) => {
                        write!(output, "{}", outcome.rendered)?;
                        for path in outcome.written {
                            writeln!(output, "Saved {}", path.display())?;
                        }
                    }
                    Ok(None) => writeln!(output, "No flashcards returned. Adjust topic or try again.")?,
                    Err(e) => {
                        error!("{}", e);
                        writeln!(output, "Generation failed: {}", e)?;
                    }
                }
            }
            ShellCommand::Show => match self.controller.render_current() {
                Some(rendered) => write!(output, "{}", rendered)?,
                None => writeln!(output, "No flashcards yet. Use 'generate'.")?,
            },
            ShellCommand::Export => {
                let unix_time = chrono::Utc::now().timestamp();
                match self.controller.export_current(&self.form.formats(), unix_time) {
                    Ok(paths) if paths.is_empty() => writeln!(output, "Nothing exported.")?,
                    Ok(paths) => {
                        for path in paths {
                            writeln!(output, "Saved {}", path.display())?;
                        }
                    }
                    Err(e) => {
                        error!("{}", e);
                        writeln!(output, "Export failed: {}", e)?;
                    }
                }
            }
            ShellCommand::Check => {
                let service = self.controller.service();
                match service.test_connection().await {
                    Ok(()) => writeln!(output, "{} is reachable.", service.provider_name())?,
                    Err(e) => {
                        error!("{}", e);
                        writeln!(output, "Connection check failed: {}", e)?;
                    }
                }
            }
            ShellCommand::Help => writeln!(output, "{}", HELP)?,
            ShellCommand::Quit | ShellCommand::Empty => {}
        }
        Ok(())
    }

    fn describe_form(&self) -> String {
        let form = &self.form;
        let toggle = |on: bool| if on { "on" } else { "off" };
        format!(
            "topic:       {}\ncount:       {}\ndifficulty:  {}\nlanguages:   {}\nsection:     {}\ntemperature: {:.2}\npdf:         {}\ncsv:         {}\n(known languages: {})\n",
            if form.topic.is_empty() { "(none)" } else { form.topic.as_str() },
            form.count,
            form.difficulty,
            form.languages.join(", "),
            form.section,
            form.temperature,
            toggle(form.export_pdf),
            toggle(form.export_csv),
            SUPPORTED_LANGUAGES.join(", "),
        )
    }
}
