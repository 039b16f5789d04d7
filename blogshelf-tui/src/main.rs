//! Blogshelf TUI entry point.

use blogshelf_core::{IdentityState, SharedIdentity};
use blogshelf_tui::api_client::RestClient;
use blogshelf_tui::config::TuiConfig;
use blogshelf_tui::error::TuiError;
use blogshelf_tui::events::TuiEvent;
use blogshelf_tui::state::{App, Effect};
use blogshelf_tui::telemetry;
use blogshelf_tui::views::render_view;
use crossterm::{
    event::{self, Event as CrosstermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    telemetry::init_logging(&config.log_path)?;

    let client = Arc::new(RestClient::new(&config)?);
    let identity = match &config.identity.email {
        Some(email) => IdentityState::signed_in(email.clone()),
        None => IdentityState::signed_out(),
    };
    let identity = Arc::new(SharedIdentity::new(identity));
    let mut app = App::new(client, identity, config.search_debounce());

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    let startup = app.start();
    run_effects(startup, &event_tx);

    let mut ticker = tokio::time::interval(config.tick_rate());

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        let event = tokio::select! {
            _ = ticker.tick() => TuiEvent::Tick,
            Some(event) = event_rx.recv() => event,
        };
        let effects = app.handle_event(event, Instant::now());
        if run_effects(effects, &event_tx) {
            break;
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}

/// Spawn requested work. Returns true when the app asked to quit.
fn run_effects(effects: Vec<Effect>, sender: &mpsc::Sender<TuiEvent>) -> bool {
    let mut quit = false;
    for effect in effects {
        match effect {
            Effect::Spawn(task) => {
                let sender = sender.clone();
                tokio::spawn(async move {
                    let event = task.await;
                    if sender.send(event).await.is_err() {
                        tracing::debug!("Event loop closed before task completed");
                    }
                });
            }
            Effect::Quit => quit = true,
        }
    }
    quit
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        sender.blocking_send(TuiEvent::Input(key))
                    }
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}
