//! Opening mail composition targets.

use std::io::Write;

/// Hands a `mailto:` target to whatever composes the message.
pub trait Launcher: Send + Sync {
    fn open(&self, target: &str) -> std::io::Result<()>;
}

/// Prints the target on stdout so it can be piped to `xdg-open` or similar.
#[derive(Debug, Default)]
pub struct StdoutLauncher;

impl Launcher for StdoutLauncher {
    fn open(&self, target: &str) -> std::io::Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", target)?;
        out.flush()
    }
}
