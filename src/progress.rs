//! Progress reporting
//!
//! Every operator-visible message goes through [`ProgressCallback`] so the
//! merge flow never writes to stdout directly. The CLI prints; tests record.

/// Receives the audit trail of a merge run
pub trait ProgressCallback: Send + Sync {
    /// An informational message (resolved values, notices, fallbacks)
    fn on_message(&self, message: &str);

    /// A shell command is about to run in `directory`
    fn on_command(&self, command: &str, directory: &str);

    /// One line of a command's stdout
    fn on_stdout(&self, line: &str);

    /// One line of a command's stderr
    fn on_stderr(&self, line: &str);

    /// A problem the run reports but survives (or is about to stop on)
    fn on_error(&self, message: &str);
}

/// Progress sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_message(&self, _message: &str) {}
    fn on_command(&self, _command: &str, _directory: &str) {}
    fn on_stdout(&self, _line: &str) {}
    fn on_stderr(&self, _line: &str) {}
    fn on_error(&self, _message: &str) {}
}
