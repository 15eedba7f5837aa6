//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips the escape codes when the
//! stream is not a terminal, so styling here is unconditional.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use supports_hyperlinks::Stream;
use terminal_link::Link;

/// Check mark for completed steps
pub const CHECK: &str = "✓";

/// Separator printed before each command and prompt
pub const SEPARATOR: &str = "--------------------------";

/// Semantic styles for CLI output
pub trait Stylize: std::fmt::Display {
    /// De-emphasized text (paths, hints)
    fn muted(&self) -> String {
        self.to_string().dimmed().to_string()
    }

    /// Bold text (labels)
    fn emphasis(&self) -> String {
        self.to_string().bold().to_string()
    }

    /// Highlighted values (names, numbers)
    fn accent(&self) -> String {
        self.to_string().cyan().to_string()
    }

    /// Positive outcome
    fn success(&self) -> String {
        self.to_string().green().to_string()
    }

    /// Warnings and stderr echo
    fn warn(&self) -> String {
        self.to_string().yellow().to_string()
    }

    /// Fatal errors
    fn error(&self) -> String {
        self.to_string().red().bold().to_string()
    }
}

impl<T: std::fmt::Display + ?Sized> Stylize for T {}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Spinner used while waiting on the API
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// `text` as a terminal hyperlink to `url` where supported, plain otherwise
pub fn link(text: &str, url: &str) -> String {
    if !url.is_empty() && supports_hyperlinks::on(Stream::Stdout) {
        Link::new(text, url).to_string()
    } else {
        text.to_string()
    }
}
