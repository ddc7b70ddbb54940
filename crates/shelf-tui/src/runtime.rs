//! TUI runtime - owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! Async results come back through an inbox channel: each network effect is
//! spawned on the tokio runtime and sends its completion event to
//! `inbox_tx`; the loop drains `inbox_rx` every frame. Requests are never
//! cancelled and never deduplicated; each completion re-enters the reducer
//! in arrival order.

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use shelf_core::api::ApiClient;
use shelf_core::config::Config;
use shelf_core::session::Session;
use tokio::sync::mpsc;
use tracing::error;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence; also bounds how long the loop blocks on terminal input.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop, panic,
/// or quit.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    api: Arc<ApiClient>,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime and takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(config: Config, session: Session) -> Result<Self> {
        // Set up panic hook BEFORE entering the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let api = Arc::new(ApiClient::new(config.base_url.clone()));
        let state = AppState::new(config, session);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            api,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until quit.
    ///
    /// # Errors
    /// Returns an error on terminal I/O failure.
    pub fn run(&mut self) -> Result<()> {
        // A restored credential issues exactly one user fetch and one
        // item-list fetch before anything renders.
        let startup = self.state.startup_effects();
        self.execute_effects(startup);

        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                if !matches!(event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the inbox and the terminal, blocking until the
    /// next tick is due when nothing is pending.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            TICK_INTERVAL.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= TICK_INTERVAL {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async effect whose result re-enters the loop via the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    /// Clones the active credential for a spawned task; the error side feeds
    /// the normal failure path of the completion event.
    fn token(&self) -> Result<String, String> {
        self.state
            .session
            .credential()
            .map(str::to_string)
            .ok_or_else(|| "no active credential".to_string())
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }

            UiEffect::PersistCredential { token } => {
                if let Err(e) = self.state.session.establish(&token) {
                    error!(error = ?e, "failed to persist credential");
                }
            }
            UiEffect::ClearCredential => {
                if let Err(e) = self.state.session.clear() {
                    error!(error = ?e, "failed to clear credential");
                }
            }

            UiEffect::SubmitLogin { email, password } => {
                let api = Arc::clone(&self.api);
                self.spawn_effect(move || async move {
                    let result = api
                        .login(&email, &password)
                        .await
                        .map_err(|e| format!("{e:#}"));
                    UiEvent::LoginCompleted(result)
                });
            }

            UiEffect::FetchCurrentUser => {
                let api = Arc::clone(&self.api);
                let token = self.token();
                self.spawn_effect(move || async move {
                    let result = match token {
                        Ok(token) => api
                            .current_user(&token)
                            .await
                            .map_err(|e| format!("{e:#}")),
                        Err(e) => Err(e),
                    };
                    UiEvent::UserLoaded(result)
                });
            }

            UiEffect::FetchItems => {
                let api = Arc::clone(&self.api);
                let token = self.token();
                self.spawn_effect(move || async move {
                    let result = match token {
                        Ok(token) => api.list_items(&token).await.map_err(|e| format!("{e:#}")),
                        Err(e) => Err(e),
                    };
                    UiEvent::ItemsLoaded(result)
                });
            }

            UiEffect::CreateItem { name, description } => {
                let api = Arc::clone(&self.api);
                let token = self.token();
                self.spawn_effect(move || async move {
                    let result = match token {
                        Ok(token) => api
                            .create_item(&token, &name, &description)
                            .await
                            .map_err(|e| format!("{e:#}")),
                        Err(e) => Err(e),
                    };
                    UiEvent::ItemCreated(result)
                });
            }

            UiEffect::UpdateItem {
                id,
                name,
                description,
            } => {
                let api = Arc::clone(&self.api);
                let token = self.token();
                self.spawn_effect(move || async move {
                    let result = match token {
                        Ok(token) => api
                            .update_item(&token, id, &name, &description)
                            .await
                            .map_err(|e| format!("{e:#}")),
                        Err(e) => Err(e),
                    };
                    UiEvent::ItemUpdated(result)
                });
            }

            UiEffect::DeleteItem { id } => {
                let api = Arc::clone(&self.api);
                let token = self.token();
                self.spawn_effect(move || async move {
                    let result = match token {
                        Ok(token) => api
                            .delete_item(&token, id)
                            .await
                            .map(|()| id)
                            .map_err(|e| format!("{e:#}")),
                        Err(e) => Err(e),
                    };
                    UiEvent::ItemDeleted(result)
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
