//! Tool configuration resolved once at startup.
//!
//! Library code never reads the process environment after a [`ToolConfig`]
//! has been built; binaries resolve it at the top of `main` and pass it down.

use std::path::{Path, PathBuf};

/// Environment variable pointing at the directory of the ANTs binaries.
pub const ANTSPATH_ENV: &str = "ANTSPATH";

/// Where the ANTs binaries live and where they should run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolConfig {
    bin_dir: Option<PathBuf>,
    work_dir: Option<PathBuf>,
}

impl ToolConfig {
    /// Creates a configuration from explicit values.
    ///
    /// An empty `bin_dir` is treated as unset so that `PATH` lookup applies.
    pub fn new(bin_dir: Option<PathBuf>, work_dir: Option<PathBuf>) -> Self {
        Self {
            bin_dir: bin_dir.filter(|dir| !dir.as_os_str().is_empty()),
            work_dir,
        }
    }

    /// Resolves the binary directory from `override_dir`, falling back to
    /// the `ANTSPATH` environment variable.
    pub fn from_env(override_dir: Option<PathBuf>, work_dir: Option<PathBuf>) -> Self {
        let bin_dir = override_dir.or_else(|| std::env::var_os(ANTSPATH_ENV).map(PathBuf::from));
        Self::new(bin_dir, work_dir)
    }

    /// Directory of the ANTs binaries, if not taken from `PATH`.
    pub fn bin_dir(&self) -> Option<&Path> {
        self.bin_dir.as_deref()
    }

    /// Working directory of the spawned tools, if not the current one.
    pub fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_deref()
    }

    /// Resolves the path used to spawn `program`.
    pub fn program_path(&self, program: &str) -> PathBuf {
        match &self.bin_dir {
            Some(dir) => dir.join(program),
            None => PathBuf::from(program),
        }
    }

    /// Resolves `path` against the working directory of the spawned tools.
    pub fn in_work_dir(&self, path: impl AsRef<Path>) -> PathBuf {
        match &self.work_dir {
            Some(dir) => dir.join(path),
            None => path.as_ref().to_path_buf(),
        }
    }
}
