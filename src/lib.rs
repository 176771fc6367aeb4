pub mod backend;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod format_csv;
pub mod format_detect;
pub mod format_toon;
pub mod grid;
pub mod loader;
pub mod navigator;
pub mod output;
pub mod tui;
pub mod verbose;
