//! Scheduled update checks over an injected storage

pub mod state;
pub mod version_checker;

pub use state::{UpdateRecord, UpdateSettings};
pub use version_checker::{CheckerConfig, UpdateCheck, VersionChecker};
