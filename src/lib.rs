pub mod checker;
pub mod cli;
pub mod compare;
pub mod config;
pub mod domain;
pub mod error;
pub mod notice;
pub mod storage;
pub mod ui;

pub use compare::{compare_versions, needs_update, update_type};
pub use domain::{parse_version, ParsedVersion, UpdateType};
pub use error::{Result, UpdateNotifierError};
