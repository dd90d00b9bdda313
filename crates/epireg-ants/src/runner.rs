use std::process::{Command, ExitStatus};

use crate::{config::ToolConfig, error::AntsError, invocation::Invocation};

/// Builds the process command for an invocation.
///
/// Standard streams are inherited so the tool's own progress output reaches
/// the terminal untouched.
pub fn command(inv: &Invocation, config: &ToolConfig) -> Command {
    let mut cmd = Command::new(config.program_path(&inv.program));
    cmd.args(&inv.args);
    if let Some(dir) = config.work_dir() {
        cmd.current_dir(dir);
    }
    cmd
}

/// Spawns the invocation and blocks until it exits.
///
/// The exit status is returned as is; a failing tool is not an error here.
pub fn run(inv: &Invocation, config: &ToolConfig) -> Result<ExitStatus, AntsError> {
    let program = config.program_path(&inv.program);
    log::info!("Running: {}", inv.command_line());
    if let Some(dir) = config.work_dir() {
        log::debug!("Working directory: {}", dir.display());
    }

    let now = std::time::Instant::now();
    let status = command(inv, config)
        .status()
        .map_err(|source| AntsError::SpawnFailed { program, source })?;

    log::debug!(
        "{} finished with {} in {:?}",
        inv.program,
        status,
        now.elapsed()
    );

    Ok(status)
}

/// Spawns the invocation and fails unless it exits successfully.
pub fn run_checked(inv: &Invocation, config: &ToolConfig) -> Result<(), AntsError> {
    let status = run(inv, config)?;
    if status.success() {
        Ok(())
    } else {
        Err(AntsError::CommandFailed {
            command: inv.command_line(),
            code: exit_code(status),
        })
    }
}

/// Runs the invocations in order, stopping at the first failure.
pub fn run_all(invs: &[Invocation], config: &ToolConfig) -> Result<(), AntsError> {
    for inv in invs {
        run_checked(inv, config)?;
    }
    Ok(())
}

/// Exit code as a shell would report it.
///
/// A child terminated by a signal maps to `128 + signal` on Unix.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
