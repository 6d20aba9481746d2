//! State management module for the SplitPay TUI application.
//!
//! The state is decomposed into:
//!
//! - [`FormState`] - Recipients, split mode and keyboard focus
//! - [`TransferFlow`] - Preview and confirm state machine
//! - [`UiState`] - Popups, toasts and transient indicators
//! - [`AppConfig`] - Persistent configuration with load/save capabilities
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                         App                           │
//! ├───────────────┬────────────────┬──────────────────────┤
//! │  FormState    │  TransferFlow  │       UiState        │
//! │  - recipients │  - phase       │  - popups            │
//! │  - split mode │  - preview     │  - toast             │
//! │  - focus      │  - outcome     │  - copied indicator  │
//! └───────────────┴────────────────┴──────────────────────┘
//! ```
//!
//! Background tasks never touch `App`; they report through [`AppMessage`].

use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::client::{SolanaClient, WalletSession};
use crate::domain::{Cluster, TransferPreview};

// ============================================================================
// Module Declarations
// ============================================================================

mod app_lifecycle;

pub mod config;
pub mod form;
pub mod platform;
pub mod transfer;
pub mod ui_state;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::AppConfig;
pub use form::{FormChange, FormField, FormState, FormValidation};
pub use transfer::{TransferFlow, TransferOutcome, TransferPhase};
pub use ui_state::{PopupState, UiState};

// ============================================================================
// App Message Types
// ============================================================================

/// Messages sent from background tasks to the main app loop.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// The submitted batch was quoted.
    PreviewReady(Box<TransferPreview>),
    /// Quoting the submitted batch failed.
    PreviewFailed(String),
    /// The confirmed batch was sent (signature) or failed (message).
    TransferSettled(Result<String, String>),
    /// Balance of the connected account was fetched.
    BalanceUpdated(Result<u64, String>),
}

// ============================================================================
// Startup Options
// ============================================================================

/// Options passed on the command line.
///
/// Everything here overrides [`AppConfig`] for this run only, unless
/// `save_config` asks to persist the overrides.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    /// Cluster to connect to.
    pub cluster: Option<Cluster>,
    /// RPC endpoint overriding the cluster default.
    pub rpc_url: Option<String>,
    /// Keypair file of the paying account.
    pub keypair_path: Option<PathBuf>,
    /// Prefilled `(address, amount)` rows.
    pub recipients: Vec<(String, String)>,
    /// Start in split mode with this total.
    pub split_total: Option<String>,
    /// Validate addresses structurally only.
    pub heuristic_addresses: bool,
    /// Write the overrides back to the config file.
    pub save_config: bool,
}

impl StartupOptions {
    /// Applies the overrides to `config`.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(cluster) = self.cluster {
            config.cluster = cluster;
            // A new cluster without a new URL means its default endpoint.
            if self.rpc_url.is_none() {
                config.rpc_url = None;
            }
        }
        if let Some(url) = &self.rpc_url {
            config.rpc_url = Some(url.clone());
        }
        if let Some(path) = &self.keypair_path {
            config.keypair_path = Some(path.clone());
        }
        if self.heuristic_addresses {
            config.strict_address_check = false;
        }
    }
}

// ============================================================================
// Balance
// ============================================================================

/// Last known balance of the connected account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BalanceState {
    /// Never fetched, or no account connected.
    #[default]
    Unknown,
    Loading,
    Loaded(u64),
    /// The node could not be reached or refused the query.
    Failed(String),
}

// ============================================================================
// Main App State
// ============================================================================

/// The main application state container.
///
/// # Example
///
/// ```ignore
/// use crate::state::{App, StartupOptions};
///
/// let app = App::new(StartupOptions::default())?;
/// ```
#[derive(Debug)]
pub struct App {
    // ========================================================================
    // Sub-states (decomposed concerns)
    // ========================================================================
    /// Recipients and split settings.
    pub form: FormState,

    /// Preview/confirm state machine.
    pub transfer: TransferFlow,

    /// UI state - popups, toasts, indicators.
    pub ui: UiState,

    // ========================================================================
    // App-level state
    // ========================================================================
    /// Effective configuration (file plus command-line overrides).
    pub config: AppConfig,

    /// The connected account, if a keypair was loaded.
    pub wallet: WalletSession,

    /// Balance of the connected account.
    pub balance: BalanceState,

    /// Whether the application should exit.
    pub exit: bool,

    /// Animation tick counter for the busy spinner.
    pub animation_tick: u64,

    // ========================================================================
    // Async Communication Channels
    // ========================================================================
    // Channel sends use `let _ = tx.send(...)`: the receiver only goes away
    // during shutdown.
    /// Sender for app messages (cloned for background tasks).
    pub(crate) message_tx: mpsc::UnboundedSender<AppMessage>,

    /// Receiver for app messages.
    pub(crate) message_rx: mpsc::UnboundedReceiver<AppMessage>,

    // ========================================================================
    // Ledger Client
    // ========================================================================
    /// JSON-RPC client for the configured endpoint.
    pub(crate) client: SolanaClient,
}

impl App {
    /// Cluster the app is connected to.
    #[must_use]
    pub fn cluster(&self) -> Cluster {
        self.config.cluster
    }

    /// The RPC endpoint in use.
    #[must_use]
    pub fn rpc_url(&self) -> &str {
        self.client.rpc_url()
    }
}

// ============================================================================
// Implementation Modules
// ============================================================================

// Message processing
mod app_messages;

// Command execution, input handling
mod app_commands;

// Submit, confirm, clipboard, browser actions
mod app_actions;

// ============================================================================
// Tests
// ============================================================================
