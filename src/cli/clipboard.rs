use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::config::ClipboardConfig;
use crate::error::{Error, Result};

/// Pipe `text` into the configured clipboard program.
pub fn copy(config: &ClipboardConfig, text: &str) -> Result<()> {
    let (program, args) = config
        .command
        .split_first()
        .ok_or_else(|| Error::Clipboard("no clipboard command configured".to_string()))?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .map_err(|e| Error::Clipboard(format!("{}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| Error::Clipboard(format!("{}: {}", program, e)))?;
    }
    let status = child
        .wait()
        .map_err(|e| Error::Clipboard(format!("{}: {}", program, e)))?;
    if !status.success() {
        return Err(Error::Clipboard(format!("{} exited with {}", program, status)));
    }
    debug!(program = %program, "copied to clipboard");
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn config(command: &[&str]) -> ClipboardConfig {
        ClipboardConfig {
            command: command.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_copy_through_cat() {
        copy(&config(&["cat"]), "v2-A-L-I").unwrap();
    }

    #[test]
    fn test_failures() {
        assert!(matches!(copy(&config(&[]), "x"), Err(Error::Clipboard(_))));
        assert!(matches!(
            copy(&config(&["definitely-not-a-clipboard-tool"]), "x"),
            Err(Error::Clipboard(_))
        ));
        assert!(matches!(copy(&config(&["sh", "-c", "cat >/dev/null; exit 3"]), "x"), Err(Error::Clipboard(_))));
    }
}
