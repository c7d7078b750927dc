use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use triage_core::{update, AppState, Msg, SubmissionState};
use triage_logging::{triage_info, triage_warn};

use super::config::AppConfig;
use super::effects::{AppEvent, EffectRunner};
use super::logging::{self, LogDestination};
use super::ui::commands::{self, Command, HELP_TEXT, PASTE_TERMINATOR};
use super::ui::render;
use super::ui::terminal::Terminal;

const RENDER_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::load(Path::new("."))
        .and_then(|config| config.with_env(|key| std::env::var(key).ok()))
        .context("loading configuration")?;
    logging::initialize(LogDestination::from_flag(config.log_to_terminal));

    let settings = config
        .submit_settings()
        .context("resolving analysis endpoint")?;
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(settings, event_tx.clone()).context("starting engine")?;

    spawn_input_reader(event_tx.clone())?;

    // Background tick to coalesce renders.
    thread::Builder::new()
        .name("triage-tick".to_string())
        .spawn(move || {
            while event_tx.send(AppEvent::Msg(Msg::Tick)).is_ok() {
                thread::sleep(RENDER_INTERVAL);
            }
        })?;

    let mut handler = AppEventHandler::new(runner, Terminal::new(io::stdout()));
    handler.start();
    while !handler.should_quit() {
        match event_rx.recv() {
            Ok(event) => handler.handle_event(event),
            Err(_) => break,
        }
    }
    handler.render_pending();
    triage_info!("Exiting");
    Ok(())
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("triage-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if event_tx.send(AppEvent::Input(line)).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        triage_warn!("Failed to read input: {}", err);
                        break;
                    }
                }
            }
            let _ = event_tx.send(AppEvent::InputClosed);
        })?;
    Ok(())
}

/// Translates terminal events into messages and drives the update loop.
struct AppEventHandler<W: Write> {
    state: AppState,
    runner: EffectRunner,
    terminal: Terminal<W>,
    paste_buffer: Option<Vec<String>>,
    input_closed: bool,
    quit_requested: bool,
}

impl<W: Write> AppEventHandler<W> {
    fn new(runner: EffectRunner, terminal: Terminal<W>) -> Self {
        Self {
            state: AppState::new(),
            runner,
            terminal,
            paste_buffer: None,
            input_closed: false,
            quit_requested: false,
        }
    }

    fn start(&mut self) {
        self.terminal
            .print_lines(&[HELP_TEXT.to_string(), String::new()]);
        self.terminal.print_lines(&render::render(&self.state.view()));
    }

    /// Quit on request, or once input is exhausted and nothing is in flight.
    fn should_quit(&self) -> bool {
        let in_flight = matches!(self.state.submission(), SubmissionState::InFlight(_));
        self.quit_requested || (self.input_closed && !in_flight)
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(line) => self.handle_line(line),
            AppEvent::InputClosed => {
                if let Some(lines) = self.paste_buffer.take() {
                    self.dispatch_msg(Msg::TextEdited(lines.join("\n")));
                }
                self.input_closed = true;
            }
            AppEvent::Msg(msg) => self.dispatch_msg(msg),
        }
    }

    fn handle_line(&mut self, line: String) {
        if self.terminal.take_picker_open() {
            self.dispatch_msg(commands::picker_answer(&line));
            return;
        }

        if let Some(buffer) = self.paste_buffer.as_mut() {
            if line.trim_end() == PASTE_TERMINATOR {
                let text = buffer.join("\n");
                self.paste_buffer = None;
                self.dispatch_msg(Msg::TextEdited(text));
            } else {
                buffer.push(line);
            }
            return;
        }

        match commands::parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Help)) => self.terminal.print_lines(&[HELP_TEXT.to_string()]),
            Ok(Some(Command::Quit)) => self.quit_requested = true,
            Ok(Some(Command::Paste)) => {
                self.paste_buffer = Some(Vec::new());
                self.terminal
                    .print_lines(&[format!("Paste text, end with '{PASTE_TERMINATOR}':")]);
            }
            Ok(Some(command)) => {
                for msg in command.into_msgs() {
                    self.dispatch_msg(msg);
                }
            }
            Err(err) => self.terminal.alert(&err.to_string()),
        }
    }

    /// Prints the view if anything changed since the last render.
    fn render_pending(&mut self) {
        if self.state.consume_dirty() {
            self.terminal.print_lines(&render::render(&self.state.view()));
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let render_due = matches!(msg, Msg::Tick);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        if render_due {
            self.render_pending();
        }
        self.runner.run(effects, &mut self.terminal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_engine::SubmitSettings;

    fn handler() -> AppEventHandler<Vec<u8>> {
        triage_logging::initialize_for_tests();
        let (event_tx, _event_rx) = mpsc::channel();
        let runner = EffectRunner::new(SubmitSettings::default(), event_tx).unwrap();
        AppEventHandler::new(runner, Terminal::new(Vec::new()))
    }

    #[test]
    fn edits_render_once_on_tick() {
        let mut handler = handler();
        handler.handle_event(AppEvent::Input("text Hello".to_string()));
        handler.handle_event(AppEvent::Input("text Hello, team".to_string()));
        handler.handle_event(AppEvent::Msg(Msg::Tick));
        handler.handle_event(AppEvent::Msg(Msg::Tick));

        let written = String::from_utf8(handler.terminal.into_inner()).unwrap();
        assert_eq!(written.matches("Text:").count(), 1);
        assert!(written.contains("Text: 11 chars"));
    }

    #[test]
    fn closed_input_quits_when_idle() {
        let mut handler = handler();
        assert!(!handler.should_quit());
        handler.handle_event(AppEvent::InputClosed);
        assert!(handler.should_quit());
    }
}
