//! Text extraction helpers used by the pipeline stages

pub mod tokens;
