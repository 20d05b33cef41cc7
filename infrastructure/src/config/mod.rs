//! Configuration file loading.

pub mod file_config;
pub mod loader;

pub use file_config::{FileConfig, FileEditorConfig, FileInterviewConfig};
pub use loader::ConfigLoader;
