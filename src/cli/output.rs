//! Terminal and workflow-command output for release operations
//!
//! Inside GitHub Actions, warnings and errors are written as workflow commands
//! (`::warning::`, `::error::`) so the runner turns them into annotations.
//! Elsewhere they are coloured terminal lines.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    quiet: bool,
    actions: bool,
}

impl OutputManager {
    /// Create a new output manager, detecting the Actions runner from `GITHUB_ACTIONS`
    pub fn new(quiet: bool) -> Self {
        let actions = std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true");
        Self::with_mode(quiet, actions)
    }

    /// Create an output manager with an explicit workflow-command mode
    pub fn with_mode(quiet: bool, actions: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            quiet,
            actions,
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "{}", message);
        let _ = self.bufwtr.print(&buffer);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
        let _ = write!(&mut buffer, "✓");
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, " {}", message);
        let _ = self.bufwtr.print(&buffer);
    }

    /// Print a warning (an annotation when running in Actions)
    pub fn warn(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.actions {
            println!("{}", workflow_command("warning", message));
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true));
        let _ = write!(&mut buffer, "⚠");
        let _ = buffer.reset();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
        let _ = writeln!(&mut buffer, " {}", message);
        let _ = buffer.reset();
        let _ = self.bufwtr.print(&buffer);
    }

    /// Print an error message (always shown)
    pub fn error(&self, message: &str) {
        if self.actions {
            println!("{}", workflow_command("error", message));
            return;
        }

        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();

        if buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true)).is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red))).is_err()
            || writeln!(&mut buffer, " {}", message).is_err()
            || buffer.reset().is_err()
            || bufwtr.print(&buffer).is_err()
        {
            // Stderr failed - fallback to stdout as last resort
            println!("[STDERR ERROR] ✗ {}", message);
        }
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) {
        if self.quiet {
            return;
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "    {}", message);
        let _ = self.bufwtr.print(&buffer);
    }

    /// Record a step output
    ///
    /// Appended as `name=value` to `output_file` (the runner's `GITHUB_OUTPUT`);
    /// printed to stdout when there is no such file.
    pub fn set_output(&self, output_file: Option<&Path>, name: &str, value: &str) -> std::io::Result<()> {
        match output_file {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                writeln!(file, "{}={}", name, value)
            }
            None => {
                println!("{}={}", name, value);
                Ok(())
            }
        }
    }
}

/// Format a workflow command line, escaping the message as the runner expects
fn workflow_command(command: &str, message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::{}::{}", command, escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_workflow_command_escaping() {
        assert_eq!(workflow_command("warning", "plain"), "::warning::plain");
        assert_eq!(
            workflow_command("error", "100% broken\nsecond line"),
            "::error::100%25 broken%0Asecond line"
        );
    }

    #[test]
    fn test_set_output_appends_to_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("output");
        std::fs::write(&path, "previous=1\n").unwrap();

        let output = OutputManager::with_mode(true, true);
        output.set_output(Some(path.as_path()), "release_id", "123456").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "previous=1\nrelease_id=123456\n");
    }
}
