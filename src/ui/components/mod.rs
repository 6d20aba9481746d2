//! Reusable UI components for the SplitPay TUI.
//!
//! Components are stateless: they take what they draw as arguments and keep
//! nothing between frames.
//!
//! - [`toast`] - Toast notification overlay for non-blocking messages

pub mod toast;

pub use toast::render_toast;
