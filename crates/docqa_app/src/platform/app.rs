use std::borrow::Cow;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use docqa_core::{update, AppState, AppViewModel, Msg, QueryPhase, UploadPhase};
use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};

use super::config::{load_config, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::logging;
use super::ui;
use super::ui::input::InputAction;
use super::ui::render::{RenderCursor, TerminalCommand};

/// Everything the main loop reacts to.
pub enum AppEvent {
    /// A line typed on stdin.
    Line(String),
    /// Stdin reached end of input.
    InputClosed,
    /// A finished backend request, already mapped to a core message.
    Engine(Msg),
}

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let config = load_config(&config_path)?;
    logging::initialize(config.log_destination);
    engine_info!(
        "Starting docqa against {} (config {:?})",
        config.base_url,
        config_path
    );

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.backend_settings(), event_tx.clone())
        .context("failed to start backend engine")?;

    spawn_stdin_reader(event_tx);

    let mut app = App::new(runner);
    app.dispatch(Msg::Started);

    let mut input_closed = false;
    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Line(line) => match ui::input::parse_line(&line) {
                InputAction::Quit => break,
                InputAction::Dispatch(msgs) => {
                    for msg in msgs {
                        app.dispatch(msg);
                    }
                }
            },
            AppEvent::InputClosed => input_closed = true,
            AppEvent::Engine(msg) => app.dispatch(msg),
        }
        // Piped input: leave once stdin is drained and nothing is in flight.
        if input_closed && app.is_idle() {
            break;
        }
    }

    engine_info!("Exiting docqa");
    Ok(())
}

fn spawn_stdin_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || read_lines(io::stdin().lock(), &tx));
}

/// Forwards every line, then `InputClosed`. Bytes that are not UTF-8 are
/// replaced rather than ending the session.
fn read_lines(mut reader: impl BufRead, tx: &mpsc::Sender<AppEvent>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                if matches!(line, Cow::Owned(_)) {
                    engine_warn!("Replaced invalid UTF-8 in an input line");
                }
                let line = line.trim_end_matches(['\n', '\r']).to_string();
                if tx.send(AppEvent::Line(line)).is_err() {
                    return;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                engine_error!("Reading stdin failed: {}", err);
                break;
            }
        }
    }
    let _ = tx.send(AppEvent::InputClosed);
}

struct App {
    state: AppState,
    runner: EffectRunner,
    cursor: RenderCursor,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        let mut app = Self {
            state: AppState::new(),
            runner,
            cursor: RenderCursor::default(),
        };
        let view = app.state.view();
        app.enqueue_render(&view);
        app
    }

    fn dispatch(&mut self, msg: Msg) {
        engine_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let view = state.view();
        self.state = state;

        self.runner.enqueue(effects);
        if was_dirty {
            self.enqueue_render(&view);
        }
    }

    fn is_idle(&self) -> bool {
        self.state.query_phase() == QueryPhase::Idle
            && self.state.upload_phase() == UploadPhase::Idle
    }

    fn enqueue_render(&mut self, view: &AppViewModel) {
        let commands = ui::render::render(view, &mut self.cursor);
        let mut stdout = io::stdout().lock();
        let written = commands
            .into_iter()
            .try_for_each(|command| match command {
                TerminalCommand::PrintLine(line) => writeln!(stdout, "{line}"),
                TerminalCommand::ShowPrompt(prompt) => write!(stdout, "{prompt}"),
            })
            .and_then(|()| stdout.flush());
        if let Err(err) = written {
            engine_error!("Writing to the terminal failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::mpsc;

    use super::{read_lines, AppEvent};

    fn collect(input: &[u8]) -> (Vec<String>, bool) {
        let (tx, rx) = mpsc::channel();
        read_lines(Cursor::new(input.to_vec()), &tx);
        drop(tx);

        let mut lines = Vec::new();
        let mut closed = false;
        for event in rx {
            match event {
                AppEvent::Line(line) => lines.push(line),
                AppEvent::InputClosed => closed = true,
                AppEvent::Engine(_) => panic!("reader never emits engine events"),
            }
        }
        (lines, closed)
    }

    #[test]
    fn invalid_utf8_line_does_not_end_input() {
        let (lines, closed) = collect(b"\xff\nhello\n");
        assert_eq!(lines, vec!["\u{FFFD}".to_string(), "hello".to_string()]);
        assert!(closed);
    }

    #[test]
    fn latin1_text_is_kept_with_replacement() {
        let (lines, _) = collect(b"qu\xe9 es RAG?\r\n");
        assert_eq!(lines, vec!["qu\u{FFFD} es RAG?".to_string()]);
    }

    #[test]
    fn last_line_without_newline_is_forwarded() {
        let (lines, closed) = collect(b"first\nsecond");
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);
        assert!(closed);
    }

    #[test]
    fn empty_input_only_closes() {
        let (lines, closed) = collect(b"");
        assert!(lines.is_empty());
        assert!(closed);
    }
}
