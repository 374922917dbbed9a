pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod education;
pub mod engine;
pub mod exit;
pub mod history;
pub mod logging;
pub mod normalize;
pub mod render;
pub mod tui;
pub mod ui;
