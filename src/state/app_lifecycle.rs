//! Application lifecycle management.
//!
//! This module contains the core lifecycle methods for the `App`:
//! - `new()` / `with_parts()` - Create an application instance
//! - `run()` - Main event loop

use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::client::{HttpConfig, SolanaClient, WalletSession};
use crate::constants::TICK_RATE;
use crate::domain::RecipientList;
use crate::tui::Tui;
use crate::ui;

use super::platform::paths::default_keypair_path;
use super::{App, AppConfig, BalanceState, FormState, StartupOptions, TransferFlow, UiState};

// ============================================================================
// Lifecycle Methods
// ============================================================================

impl App {
    /// Creates a new App instance, loading configuration and the keypair from
    /// disk.
    ///
    /// A missing or unreadable keypair leaves the wallet disconnected; the
    /// app still starts.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built or saving the
    /// configuration was requested and failed.
    pub fn new(options: StartupOptions) -> Result<Self> {
        let mut config = AppConfig::load();
        options.apply_to(&mut config);
        if options.save_config {
            config.save()?;
        }

        let keypair_path = config
            .keypair_path
            .clone()
            .or_else(|| default_keypair_path().ok());
        let wallet = keypair_path
            .as_deref()
            .map_or_else(WalletSession::disconnected, WalletSession::load);

        let mut form = FormState::with_recipients(
            RecipientList::from_defaults(options.recipients.iter().cloned()),
            config.address_check(),
        );
        if let Some(total) = &options.split_total {
            form.set_split(true);
            form.set_total(total);
        }

        Self::with_parts(config, wallet, form)
    }

    /// Assembles an App from already-loaded parts.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_parts(config: AppConfig, wallet: WalletSession, form: FormState) -> Result<Self> {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let client = SolanaClient::new(config.effective_rpc_url(), &HttpConfig::default())?;

        tracing::info!(
            cluster = %config.cluster,
            rpc_url = client.rpc_url(),
            connected = wallet.is_connected(),
            "app initialized"
        );

        Ok(Self {
            form,
            transfer: TransferFlow::new(),
            ui: UiState::new(),
            config,
            wallet,
            balance: BalanceState::Unknown,
            exit: false,
            animation_tick: 0,
            message_tx,
            message_rx,
            client,
        })
    }

    /// Runs the main application loop.
    ///
    /// # Errors
    /// Returns an error if the terminal operations fail.
    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        self.announce_wallet();
        self.refresh_balance();

        let mut last_tick = Instant::now();

        while !self.exit {
            self.process_messages();

            let timeout = TICK_RATE
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::ZERO);

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key)
                        if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) =>
                    {
                        self.handle_key_event(key);
                    }
                    Event::Paste(text) => {
                        self.handle_paste(&text);
                    }
                    Event::Resize(_, _) => {
                        terminal.draw(|frame| ui::render(self, frame))?;
                    }
                    _ => {}
                }
            }

            if last_tick.elapsed() >= TICK_RATE {
                self.on_tick();
                terminal.draw(|frame| ui::render(self, frame))?;
                last_tick = Instant::now();
            }
        }

        Ok(())
    }

    /// Advances timers and animations by one tick.
    pub(crate) fn on_tick(&mut self) {
        self.animation_tick = self.animation_tick.wrapping_add(1);
        self.ui.tick();
    }

    /// Tells the user when no account could be loaded.
    fn announce_wallet(&mut self) {
        if self.wallet.is_connected() {
            return;
        }
        let reason = self
            .wallet
            .load_error()
            .unwrap_or("no keypair configured")
            .to_string();
        self.ui.show_message(format!(
            "No wallet connected: {reason}\n\nStart with --keypair <path> to send transfers."
        ));
    }
}
