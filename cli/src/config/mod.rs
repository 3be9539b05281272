//! Configuration discovery and resolution for the CLI

pub mod loader;

pub use loader::CliConfigLoader;
