//! Shared plumbing for the `epireg` and `epi-to-anat` binaries.

use std::path::PathBuf;

use epireg_ants::{runner, AntsError, Invocation, ToolConfig};

/// An error type for command line options.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CliError {
    /// Error when `--json` is given without `--dry-run`.
    #[error("--json requires --dry-run")]
    JsonWithoutDryRun,
}

/// Options every command accepts.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Print the command instead of running it.
    pub dry_run: bool,
    /// With `dry_run`, print the invocation as JSON.
    pub json: bool,
    /// Directory of the ANTs binaries.
    pub ants_path: Option<PathBuf>,
    /// Working directory of the spawned tools.
    pub workdir: Option<PathBuf>,
}

impl RunOptions {
    /// Collects the shared options, rejecting `json` without `dry_run`.
    pub fn new(
        dry_run: bool,
        json: bool,
        ants_path: Option<PathBuf>,
        workdir: Option<PathBuf>,
    ) -> Result<Self, CliError> {
        if json && !dry_run {
            return Err(CliError::JsonWithoutDryRun);
        }
        Ok(Self {
            dry_run,
            json,
            ants_path,
            workdir,
        })
    }

    /// Resolves the tool configuration, reading `ANTSPATH` when no directory was given.
    pub fn tool_config(&self) -> ToolConfig {
        ToolConfig::from_env(self.ants_path.clone(), self.workdir.clone())
    }
}

/// Prints the invocations for a dry run.
pub fn print_plan(plan: &[Invocation], json: bool) -> Result<(), AntsError> {
    for inv in plan {
        if json {
            println!("{}", inv.to_json()?);
        } else {
            println!("{inv}");
        }
    }
    Ok(())
}

/// Runs a single invocation and returns the exit code to forward.
pub fn execute(inv: &Invocation, opts: &RunOptions) -> Result<i32, AntsError> {
    if opts.dry_run {
        print_plan(std::slice::from_ref(inv), opts.json)?;
        return Ok(0);
    }

    let config = opts.tool_config();
    let status = runner::run(inv, &config)?;
    let code = runner::exit_code(status);
    if code != 0 {
        log::warn!("{} exited with code {}", inv.program, code);
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::{execute, CliError, RunOptions};
    use epireg_ants::{epi_to_anat_invocation, AntsError, EpiToAnatInputs};
    use std::path::{Path, PathBuf};

    #[test]
    fn dry_run_spawns_nothing() -> Result<(), AntsError> {
        let inputs = EpiToAnatInputs::new("epi.nii.gz", "anat.nii.gz", "mask.nii.gz")?;
        let inv = epi_to_anat_invocation(&inputs)?;
        let opts = RunOptions {
            dry_run: true,
            ants_path: Some(PathBuf::from("/nonexistent")),
            ..Default::default()
        };
        assert_eq!(execute(&inv, &opts)?, 0);
        Ok(())
    }

    #[test]
    fn json_requires_dry_run() {
        assert_eq!(
            RunOptions::new(false, true, None, None).err(),
            Some(CliError::JsonWithoutDryRun)
        );
        assert!(RunOptions::new(true, true, None, None).is_ok());
        assert!(RunOptions::new(false, false, None, None).is_ok());
    }

    #[test]
    fn explicit_ants_path_is_used() {
        let opts = RunOptions {
            ants_path: Some(PathBuf::from("/opt/ants/bin")),
            workdir: Some(PathBuf::from("/scratch")),
            ..Default::default()
        };
        let config = opts.tool_config();
        assert_eq!(config.bin_dir(), Some(Path::new("/opt/ants/bin")));
        assert_eq!(config.work_dir(), Some(Path::new("/scratch")));
    }
}
