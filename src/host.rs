//! Seams between the shortening workflow and the machine it runs on.

use anyhow::Result;
use tracing::{info, warn};

use crate::clipboard::{copy_to_clipboard, read_from_clipboard};
use crate::config::Settings;

pub trait Host {
    /// Current clipboard text; empty when there is none.
    fn read_clipboard(&mut self) -> String;

    fn write_clipboard(&mut self, text: &str) -> Result<()>;

    /// Show a short message to the user.
    fn notify(&mut self, message: &str);
}

pub trait SettingsProvider {
    fn settings(&self) -> Result<Settings>;
}

/// The real system clipboard, with messages written to stderr.
#[derive(Debug, Default)]
pub struct SystemHost {
    quiet: bool,
}

impl SystemHost {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Host for SystemHost {
    fn read_clipboard(&mut self) -> String {
        match read_from_clipboard() {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "Clipboard unreadable, treating as empty");
                String::new()
            }
        }
    }

    fn write_clipboard(&mut self, text: &str) -> Result<()> {
        copy_to_clipboard(text)
    }

    fn notify(&mut self, message: &str) {
        info!(message = %message, "Notification");
        if !self.quiet {
            eprintln!("{message}");
        }
    }
}
