// src/lib.rs
// #![allow(dead_code)]
// #![allow(unused)]

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;

pub mod csv;
pub mod file;
pub mod record;
pub mod store;

pub mod keywords;
pub mod segment;

pub mod progress;
pub mod scrape;
pub mod source;

pub mod analysis;
pub mod filter;
pub mod report;
