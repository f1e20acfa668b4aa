use dotenvy::dotenv;
use regex::Regex;
use sino_core::config::FlowSettings;
use sino_transport_telegram::config::{BotSettings, TelegramSettings};
use sino_transport_telegram::runner::run_bot;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Regex patterns for redacting bot tokens
struct RedactionPatterns {
    token_url: Regex,
    token_bare: Regex,
    token_prefixed: Regex,
}

impl RedactionPatterns {
    /// Initialize all regex patterns
    ///
    /// # Errors
    ///
    /// Returns an error if any regex pattern is invalid
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            token_url: Regex::new(r"(https?://[^/]+/bot)([0-9]+:[A-Za-z0-9_-]+)(/['\s]*)")?,
            token_bare: Regex::new(r"([0-9]{8,10}:[A-Za-z0-9_-]{35})")?,
            token_prefixed: Regex::new(r"(bot[0-9]{8,10}:)[A-Za-z0-9_-]+")?,
        })
    }

    fn redact(&self, input: &str) -> String {
        let output = self
            .token_url
            .replace_all(input, "$1[TELEGRAM_TOKEN]$3")
            .to_string();
        let output = self
            .token_bare
            .replace_all(&output, "[TELEGRAM_TOKEN]")
            .to_string();
        self.token_prefixed
            .replace_all(&output, "$1[TELEGRAM_TOKEN]")
            .to_string()
    }
}

struct RedactingWriter<W: Write> {
    inner: W,
    patterns: Arc<RedactionPatterns>,
}

impl<W: Write> RedactingWriter<W> {
    const fn new(inner: W, patterns: Arc<RedactionPatterns>) -> Self {
        Self { inner, patterns }
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        let redacted = self.patterns.redact(&s);
        self.inner.write_all(redacted.as_bytes())?;
        // The caller's buffer was consumed in full even if the redacted text differs in length.
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

struct RedactingMakeWriter<F> {
    make_inner: F,
    patterns: Arc<RedactionPatterns>,
}

impl<F> RedactingMakeWriter<F> {
    const fn new(make_inner: F, patterns: Arc<RedactionPatterns>) -> Self {
        Self {
            make_inner,
            patterns,
        }
    }
}

impl<'a, F, W> tracing_subscriber::fmt::MakeWriter<'a> for RedactingMakeWriter<F>
where
    F: Fn() -> W + 'static,
    W: Write,
{
    type Writer = RedactingWriter<W>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter::new((self.make_inner)(), self.patterns.clone())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // Redaction must be ready before the first log line
    let patterns = Arc::new(RedactionPatterns::new().map_err(|e| {
        eprintln!("Failed to compile regex patterns: {e}");
        e
    })?);

    init_logging(patterns);

    info!("Starting Sino partner bot...");

    let settings = init_settings();

    run_bot(settings).await;

    Ok(())
}

fn is_debug_mode(value: Option<&str>) -> bool {
    matches!(value, Some("true" | "1"))
}

fn init_logging(patterns: Arc<RedactionPatterns>) {
    let make_writer = RedactingMakeWriter::new(io::stderr, patterns);

    let debug_mode = is_debug_mode(std::env::var("DEBUG_MODE").ok().as_deref());

    let filter = if debug_mode {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(
                "sino_core=info,sino_transport_telegram=info,sino_telegram_bot=info,teloxide=warn,hyper=warn,h2=error,reqwest=warn,tokio=warn",
            )
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(make_writer))
        .init();
}

fn init_settings() -> Arc<BotSettings> {
    let flow_settings = match FlowSettings::new() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load flow configuration: {}", e);
            std::process::exit(1);
        }
    };
    let telegram_settings = match TelegramSettings::new() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load telegram configuration: {}", e);
            std::process::exit(1);
        }
    };

    match BotSettings::new(flow_settings, telegram_settings) {
        Ok(settings) => {
            info!("Configuration loaded successfully.");
            Arc::new(settings)
        }
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_redaction() {
        let patterns = RedactionPatterns::new().expect("patterns compile");
        let token = "123456789:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsawq";

        let url = format!("POST https://api.telegram.org/bot{token}/sendMessage");
        let redacted = patterns.redact(&url);
        assert!(!redacted.contains(token));
        assert!(redacted.contains("[TELEGRAM_TOKEN]"));

        let bare = patterns.redact(&format!("token={token} loaded"));
        assert_eq!(bare, "token=[TELEGRAM_TOKEN] loaded");
    }

    #[test]
    fn test_writer_redacts() {
        let patterns = Arc::new(RedactionPatterns::new().expect("patterns compile"));
        let mut writer = RedactingWriter::new(Vec::new(), patterns);
        let line = b"bot123456789:secret-value failed\n";
        assert_eq!(writer.write(line).expect("write"), line.len());
        let out = String::from_utf8(writer.inner).expect("utf8");
        assert_eq!(out, "bot123456789:[TELEGRAM_TOKEN] failed\n");
    }

    #[test]
    fn test_debug_mode_flag() {
        assert!(is_debug_mode(Some("true")));
        assert!(is_debug_mode(Some("1")));
        assert!(!is_debug_mode(Some("yes")));
        assert!(!is_debug_mode(None));
    }
}
