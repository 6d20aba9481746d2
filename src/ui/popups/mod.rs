//! Popup UI components for the SplitPay TUI.
//!
//! Popups are modal overlays drawn over the main UI. While one is shown it
//! receives all key input.

pub mod confirm;
pub mod help;
pub mod message;

pub use confirm::{render_quit as render_quit_confirm, render_transfer as render_transfer_confirm};
pub use help::render as render_help;
pub use message::render as render_message_popup;
