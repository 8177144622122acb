//! Command-line workflows shared by the binary and tests

pub mod orchestration;
