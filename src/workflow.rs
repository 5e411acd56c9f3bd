use std::process::ExitCode;
use tracing::{debug, error, info};

use crate::extract::extract;
use crate::host::{Host, SettingsProvider};
use crate::shlink::{ShlinkClient, ShortUrl, ShortenError, ShortenRequest};

pub const MSG_NO_URL: &str = "No URL found in clipboard";
pub const MSG_SHORTENED: &str = "URL shortened";
pub const MSG_NOT_COPIED: &str = "Could not copy short URL to clipboard";

/// What one trigger ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoUrlFound,
    Shortened(ShortUrl),
    /// Shortened, but the clipboard could not be written.
    NotCopied(ShortUrl),
    /// The user-facing failure message.
    Failed(String),
}

impl Outcome {
    pub fn short_url(&self) -> Option<&ShortUrl> {
        match self {
            Outcome::Shortened(short) | Outcome::NotCopied(short) => Some(short),
            _ => None,
        }
    }

    /// 0 shortened, 1 nothing to shorten, 2 failure.
    pub fn code(&self) -> u8 {
        match self {
            Outcome::Shortened(_) => 0,
            Outcome::NoUrlFound => 1,
            Outcome::NotCopied(_) | Outcome::Failed(_) => 2,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

pub fn failure_message(err: &ShortenError) -> String {
    match err {
        ShortenError::HttpError { status } => format!("Could not shorten URL ({status})"),
        other => format!("Could not shorten URL ({}: {other})", other.kind()),
    }
}

/// Clipboard in, short URL out. Each call is independent; settings are
/// fetched from the provider every time.
pub struct Workflow<H, S> {
    host: H,
    settings: S,
}

impl<H: Host, S: SettingsProvider> Workflow<H, S> {
    pub fn new(host: H, settings: S) -> Self {
        Self { host, settings }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub async fn run(&mut self) -> Outcome {
        let text = self.host.read_clipboard();
        self.run_with_text(&text).await
    }

    /// Shorten `text` as if it had been read from the clipboard.
    pub async fn run_with_text(&mut self, text: &str) -> Outcome {
        let Some(url) = extract(text) else {
            debug!(len = text.len(), "No URL in text");
            self.host.notify(MSG_NO_URL);
            return Outcome::NoUrlFound;
        };
        debug!(url = %url, "Found URL");

        let settings = match self.settings.settings() {
            Ok(settings) => settings,
            Err(e) => {
                let message = format!("Could not load settings: {e:#}");
                return self.fail(message);
            }
        };

        let request = match ShortenRequest::new(text, settings.instance_url, settings.api_key) {
            Ok(request) => request,
            Err(e) => return self.fail(failure_message(&e)),
        };

        let client = match ShlinkClient::new(settings.timeout) {
            Ok(client) => client,
            Err(e) => return self.fail(format!("Could not shorten URL ({e:#})")),
        };

        let short = match client.shorten(&request).await {
            Ok(short) => short,
            Err(e) => return self.fail(failure_message(&e)),
        };

        if let Err(e) = self.host.write_clipboard(&short.short_url) {
            error!(error = %format!("{e:#}"), "Failed to write short URL to clipboard");
            self.host.notify(MSG_NOT_COPIED);
            return Outcome::NotCopied(short);
        }

        info!(short_url = %short.short_url, "Short URL copied to clipboard");
        self.host.notify(MSG_SHORTENED);
        Outcome::Shortened(short)
    }

    fn fail(&mut self, message: String) -> Outcome {
        error!(message = %message, "Shortening failed");
        self.host.notify(&message);
        Outcome::Failed(message)
    }
}
