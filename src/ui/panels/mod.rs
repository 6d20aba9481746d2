//! Panel rendering for the main content area.
//!
//! - **Recipients Panel**: the editable recipient rows with inline field
//!   errors
//! - **Summary Panel**: split mode, the batch total and the transfer status
//!
//! On wide terminals the two sit side by side; see
//! [`crate::ui::layout::calculate_panel_layout`].

pub mod recipients;
pub mod summary;

pub use recipients::render as render_recipients;
pub use summary::render as render_summary;
