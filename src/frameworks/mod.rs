// Frameworks layer: process wiring, configuration and CLI.

pub mod cli;
pub mod config;
pub mod runner;
