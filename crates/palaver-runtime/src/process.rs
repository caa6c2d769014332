//! Process replacement.
//!
//! Restart is a full cold restart: the current process image is discarded
//! and a new process starts with the identical argument vector. On Unix
//! this is a direct `exec` (no intermediate supervisor process, same pid
//! and terminal context). On other targets the replacement is spawned and
//! the current process returns from `run` to exit normally, which keeps
//! single-instance semantics and exit-code behavior.

use std::ffi::OsString;
use std::process::Command;

use tracing::info;

/// Captures the current process's argument vector for later replacement.
pub fn current_argv() -> Vec<OsString> {
    std::env::args_os().collect()
}

/// Builds the command that re-invokes the program.
///
/// `argv[0]` is the program path; the rest are passed through unchanged.
pub fn replacement_command(argv: &[OsString]) -> Command {
    let program = argv.first().cloned().unwrap_or_else(|| "palaver".into());
    let mut command = Command::new(program);
    command.args(&argv[1.min(argv.len())..]);
    command
}

/// Replaces the running process with a fresh invocation of itself.
///
/// On Unix this only returns on failure. By this point the transport has
/// already disconnected, so a failure here is fatal: there is nothing to
/// fall back to.
#[cfg(unix)]
pub fn replace_process(argv: &[OsString]) -> std::io::Result<()> {
    use std::os::unix::process::CommandExt;

    info!(program = ?argv.first(), "Replacing process image");
    let err = replacement_command(argv).exec();
    Err(err)
}

/// Replaces the running process with a fresh invocation of itself.
///
/// Non-Unix substitute: spawns the replacement and lets the current
/// process exit normally.
#[cfg(not(unix))]
pub fn replace_process(argv: &[OsString]) -> std::io::Result<()> {
    info!(program = ?argv.first(), "Spawning replacement process");
    replacement_command(argv).spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replacement_preserves_program_and_args() {
        let argv: Vec<OsString> = ["/usr/local/bin/palaver", "--config", "bot.json"]
            .iter()
            .map(OsString::from)
            .collect();

        let command = replacement_command(&argv);
        assert_eq!(command.get_program(), "/usr/local/bin/palaver");
        let args: Vec<_> = command.get_args().map(|a| a.to_os_string()).collect();
        assert_eq!(args, vec![OsString::from("--config"), OsString::from("bot.json")]);
    }

    #[test]
    fn replacement_with_no_args() {
        let argv = vec![OsString::from("palaver")];
        let command = replacement_command(&argv);
        assert_eq!(command.get_program(), "palaver");
        assert_eq!(command.get_args().count(), 0);
    }
}
