// src/config/mod.rs
pub mod consts;
pub mod options;

pub use options::{AnalysisOptions, AppConfig, FilterOptions, SourceKind, SourceOptions, UnknownYearPolicy};
