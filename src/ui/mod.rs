//! User-facing console output.
//!
//! Diagnostics go through `log`; this module prints the lines a CI reader
//! looks for: the tag change, warnings, and the final outcome.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_error, display_proposed_tag, display_status,
    display_success,
};
