//! Platform-specific helpers.
//!
//! - [`clipboard`] - Clipboard access (external tools on Linux, else `arboard`)
//! - [`paths`] - Configuration, data and keypair locations

pub mod clipboard;
pub mod paths;

pub use clipboard::ClipboardManager;
pub use paths::AppPaths;
