// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod analysis;
pub mod cli;
pub mod config;
pub mod core;
pub mod gui;
pub mod model;
pub mod progress;
pub mod scrape;
pub mod specs;
pub mod store;
