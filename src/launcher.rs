//! Hand links off to the desktop's URL opener.

use anyhow::{Context, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::config::Opener;

/// How long to wait for the opener to report a failure before leaving it running
pub const OPENER_GRACE: Duration = Duration::from_millis(500);

/// Platform default opener command
pub fn default_opener() -> Opener {
    let argv: &[&str] = if cfg!(target_os = "macos") {
        &["open"]
    } else if cfg!(windows) {
        &["rundll32", "url.dll,FileProtocolHandler"]
    } else {
        &["xdg-open"]
    };
    Opener::Argv(argv.iter().map(|s| s.to_string()).collect())
}

/// Open `url` with `opener` (or the platform default), without waiting for the
/// destination. An opener that exits quickly with an error is reported; one that
/// is still running after the grace period is detached.
pub async fn open_url(url: &str, opener: Option<&Opener>) -> Result<()> {
    let default = default_opener();
    let mut argv = opener.unwrap_or(&default).argv();
    if argv.is_empty() {
        anyhow::bail!("Opener command is empty");
    }
    let program = argv.remove(0);

    let mut child = Command::new(&program)
        .args(&argv)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Could not run {}", program))?;

    match timeout(OPENER_GRACE, child.wait()).await {
        Ok(status) => {
            let status = status.with_context(|| format!("Could not wait for {}", program))?;
            if !status.success() {
                anyhow::bail!("{} exited with {}", program, status);
            }
            Ok(())
        }
        Err(_) => {
            // Browsers launched directly stay in the foreground; the child is
            // dropped without being killed and reaped by the runtime later
            tracing::debug!("{} still running after {:?}, detaching", program, OPENER_GRACE);
            Ok(())
        }
    }
}
