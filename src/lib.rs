pub mod cli;
pub mod clipboard;
pub mod config;
pub mod extract;
pub mod host;
pub mod shlink;
pub mod utils;
pub mod workflow;
