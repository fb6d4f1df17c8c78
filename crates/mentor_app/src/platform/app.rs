use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use mentor_core::{update, AppState, AppViewModel, AttachedFile, Msg};
use mentor_engine::BackendSettings;
use mentor_logging::{mentor_info, mentor_warn};

use super::effects::EffectRunner;
use super::ui::commands::{self, Command, HELP};
use super::ui::render;

const PROMPT: &str = "> ";

/// Everything the main loop reacts to.
pub enum AppEvent {
    /// A line typed by the user.
    Input(String),
    /// Stdin reached end of file.
    InputClosed,
    /// A message for the core from the engine or the clipboard.
    Core(Msg),
}

pub fn run_app(settings: BackendSettings) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(&settings, tx.clone())?;
    mentor_info!("Starting IDE Mentor Bot against {}", settings.base_url);

    spawn_input_reader(tx);

    let mut app = App::new(AppState::new(settings.base_url.clone()), runner);
    app.dispatch(Msg::Mounted);
    app.render();

    while let Ok(event) = rx.recv() {
        let keep_going = match event {
            AppEvent::Input(line) => app.handle_command(commands::parse(&line)),
            AppEvent::InputClosed => false,
            AppEvent::Core(msg) => {
                app.dispatch(msg);
                true
            }
        };
        if !keep_going {
            break;
        }
    }

    // In-flight requests are abandoned; their results have nowhere to go.
    app.dispatch(Msg::Unmounted);
    mentor_info!("IDE Mentor Bot stopped");
    Ok(())
}

fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(AppEvent::Input(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    mentor_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
        let _ = tx.send(AppEvent::InputClosed);
    });
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn new(state: AppState, runner: EffectRunner) -> Self {
        Self { state, runner }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        if was_dirty {
            self.render();
        }
    }

    fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Applies one prompt command. Returns `false` when the user wants out.
    fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Query(text) => self.dispatch(Msg::QueryChanged(text)),
            Command::File(None) => self.dispatch(Msg::FileSelected(None)),
            Command::File(Some(path)) => match pick_file(&path) {
                Ok(file) => self.dispatch(Msg::FileSelected(Some(file))),
                Err(reason) => self.say(&reason),
            },
            Command::Run => match run_blocked_reason(&self.view()) {
                Some(reason) => self.say(reason),
                None => self.dispatch(Msg::SubmitClicked),
            },
            Command::Retry => {
                if self.view().retry_enabled {
                    self.dispatch(Msg::RetryClicked);
                } else {
                    self.say("Already checking the backend connection.");
                }
            }
            Command::Copy => {
                if self.view().copy_visible {
                    self.dispatch(Msg::CopyClicked);
                } else {
                    self.say("There is no response to copy yet.");
                }
            }
            Command::Status => self.render(),
            Command::Help => self.say(HELP),
            Command::Quit => return false,
            Command::Empty => self.prompt(),
            Command::Unknown(word) => {
                self.say(&format!("Unknown command `{word}`. Type `help` for a list."))
            }
        }
        true
    }

    fn render(&self) {
        let screen = render::render(&self.view());
        self.say(&format!("\n{screen}"));
    }

    fn say(&self, text: &str) {
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{text}");
        let _ = write!(out, "{PROMPT}");
        let _ = out.flush();
    }

    fn prompt(&self) {
        let mut out = io::stdout().lock();
        let _ = write!(out, "{PROMPT}");
        let _ = out.flush();
    }
}

/// Form check for Run. The query is a required field, so any text counts,
/// whitespace included; the missing file is left to the core.
fn run_blocked_reason(view: &AppViewModel) -> Option<&'static str> {
    if view.query.is_empty() {
        Some("Please fill out the query.")
    } else if !view.submit_enabled {
        Some(render::submit_blocked_reason(view))
    } else {
        None
    }
}

/// Accepts a single existing regular file, like a required file input.
fn pick_file(path: &Path) -> Result<AttachedFile, String> {
    let metadata =
        std::fs::metadata(path).map_err(|err| format!("Cannot use {}: {err}", path.display()))?;
    if !metadata.is_file() {
        return Err(format!("{} is not a file.", path.display()));
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| format!("{} has no file name.", path.display()))?;
    Ok(AttachedFile::new(name, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_form(query: &str) -> AppViewModel {
        AppViewModel {
            connectivity: mentor_core::ConnectivityState::Connected,
            submit_enabled: true,
            query: query.to_string(),
            ..AppViewModel::default()
        }
    }

    #[test]
    fn run_requires_a_query_but_accepts_whitespace() {
        assert_eq!(
            run_blocked_reason(&ready_form("")),
            Some("Please fill out the query.")
        );
        assert_eq!(run_blocked_reason(&ready_form("   ")), None);
        assert_eq!(run_blocked_reason(&ready_form("why did tests fail")), None);
    }

    #[test]
    fn run_honours_submit_gating() {
        let view = AppViewModel {
            loading: true,
            submit_enabled: false,
            ..ready_form("q")
        };
        assert_eq!(
            run_blocked_reason(&view),
            Some("A request is already being processed.")
        );
    }

    #[test]
    fn pick_file_takes_name_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.zip");
        std::fs::write(&path, b"PK").unwrap();

        let file = pick_file(&path).unwrap();
        assert_eq!(file.name, "report.zip");
        assert_eq!(file.path, path);
    }

    #[test]
    fn pick_file_rejects_directories_and_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        assert!(pick_file(dir.path()).unwrap_err().contains("is not a file"));
        assert!(pick_file(&dir.path().join("missing.zip"))
            .unwrap_err()
            .starts_with("Cannot use"));
    }
}
