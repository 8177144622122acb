//! Domain logic - pure version rules independent of storage and presentation

pub mod update;
pub mod version;

pub use update::UpdateType;
pub use version::{parse_version, ParsedVersion};
