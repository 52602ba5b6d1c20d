//! Pulse CLI - a line-oriented shell over the navigation engine.
//!
//! Plain text lines are utterances. Slash commands simulate touch (`/touch`),
//! navigate (`/back`, `/next`, ...) and inspect state. See [`commands::HELP`].
//!
//! ```text
//! stdin line -> Command::parse -> Navigator::{handle_utterance, dispatch} -> stdout
//! ```

mod commands;

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, Write};
use std::mem;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use pulse_engine::{
    Navigator, PulseConfig, ResolutionResult, ResolveOptions, RulePreprocessor, log_path,
};
use pulse_types::{Action, Effect, InteractionContext};

use commands::{Command, HELP};

/// Log to a file so output never interleaves with the shell. Without a
/// writable log file, events are dropped.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match open_log() {
        Ok((path, file)) => {
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .init();
            tracing::info!(path = %path.display(), "Logging initialized");
        }
        Err(err) => {
            registry.init();
            eprintln!("pulse: logging disabled: {err:#}");
        }
    }
}

/// Open the first writable log: beside the config, then `./.pulse/logs`.
fn open_log() -> Result<(PathBuf, File)> {
    let local = PathBuf::from(".pulse").join("logs").join("pulse.log");
    let mut last_err = None;
    for path in log_path().into_iter().chain([local]) {
        match append_to(&path) {
            Ok(file) => return Ok((path, file)),
            Err(err) => last_err = Some(err),
        }
    }
    Err(last_err.unwrap_or_else(|| anyhow!("no log location")))
}

fn append_to(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))
}

enum Flow {
    Continue,
    Quit,
}

struct Shell {
    navigator: Navigator<RulePreprocessor>,
    /// Element touched for the next utterance.
    context: InteractionContext,
}

impl Shell {
    fn new(options: ResolveOptions) -> Self {
        Self {
            navigator: Navigator::new(RulePreprocessor::new(), options),
            context: InteractionContext::Global,
        }
    }

    fn run(&mut self, input: impl BufRead, mut out: impl Write) -> Result<()> {
        writeln!(out, "{}", self.navigator.info())?;
        let mut lines = input.lines();
        loop {
            write!(out, "{}", self.prompt())?;
            out.flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            if let Flow::Quit = self.handle(&line?, &mut out)? {
                break;
            }
        }
        Ok(())
    }

    fn prompt(&self) -> String {
        if self.context.is_global() {
            "pulse> ".to_string()
        } else {
            format!("pulse [{}]> ", self.context.element_name())
        }
    }

    fn handle(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "error: {err:#}")?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Touch(touch) => match touch.context(self.navigator.info()) {
                Ok(context) => {
                    self.context = context;
                    writeln!(out, "touching {}", context.element_name())?;
                }
                Err(err) => writeln!(out, "error: {err:#}")?,
            },
            Command::Release => self.context = InteractionContext::Global,
            Command::Accept => match self.navigator.accept_prompt() {
                Some(effect) => self.report(effect, out)?,
                None => writeln!(out, "nothing to accept")?,
            },
            Command::Dismiss => self.navigator.dismiss_prompt(),
            Command::Back => self.dispatch(&Action::GoBack, out)?,
            Command::Overview => self.dispatch(&Action::GoToBrowseOverview, out)?,
            Command::Shift(direction) => {
                self.dispatch(&Action::ShiftAllRanges { direction }, out)?;
            }
            Command::Reset => {
                self.context = InteractionContext::Global;
                let effect = self.navigator.reset();
                self.report(effect, out)?;
            }
            Command::State => {
                let json = serde_json::to_string_pretty(self.navigator.info())?;
                writeln!(out, "{json}")?;
                writeln!(
                    out,
                    "back-stack depth: {}",
                    self.navigator.state().back_stack().len()
                )?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Utterance(text) => self.utter(&text, out)?,
        }
        Ok(Flow::Continue)
    }

    fn utter(&mut self, text: &str, out: &mut impl Write) -> Result<()> {
        let context = mem::take(&mut self.context);
        let result = match self.navigator.handle_utterance(text, &context) {
            Ok(result) => result,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                return Ok(());
            }
        };
        match &result {
            ResolutionResult::Effective(_) => {
                writeln!(out, "{result}")?;
                writeln!(out, "  {}", self.navigator.info())?;
            }
            ResolutionResult::NeedPromptingToGlobalCommand { .. } => {
                writeln!(out, "{result} (/yes to accept)")?;
            }
            ResolutionResult::Void(_)
            | ResolutionResult::Unapplicable(_)
            | ResolutionResult::Fail(_) => writeln!(out, "{result}")?,
        }
        Ok(())
    }

    fn dispatch(&mut self, action: &Action, out: &mut impl Write) -> Result<()> {
        let effect = self.navigator.dispatch(action);
        self.report(effect, out)
    }

    fn report(&self, effect: Effect, out: &mut impl Write) -> Result<()> {
        match effect {
            Effect::Effective => writeln!(out, "  {}", self.navigator.info())?,
            Effect::Void => writeln!(out, "nothing changed")?,
            Effect::Unapplicable => writeln!(out, "not applicable here")?,
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    init_tracing();

    let config = match PulseConfig::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(err) => {
            eprintln!("Ignoring config: {err}");
            PulseConfig::default()
        }
    };
    let options = ResolveOptions::from_config(&config);
    tracing::info!(today = %options.today, "Starting pulse");

    let mut shell = Shell::new(options);
    shell.run(io::stdin().lock(), io::stdout().lock())
}
