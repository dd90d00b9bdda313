use std::fmt;

use crate::{
    config::ToolConfig,
    error::AntsError,
    invocation::Invocation,
    registration::Interpolation,
    runner,
};

/// Name of the ANTs transform application program.
pub const ANTS_APPLY_TRANSFORMS: &str = "antsApplyTransforms";

/// Name of the ANTs motion parameter extraction program.
pub const ANTS_MOTION_CORR_STATS: &str = "antsMotionCorrStats";

/// A transform file passed to `antsApplyTransforms`, optionally inverted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRef {
    /// Transform file path.
    pub path: String,
    /// Apply the inverse of the transform.
    pub inverse: bool,
}

impl TransformRef {
    /// A transform applied as is.
    pub fn forward(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            inverse: false,
        }
    }

    /// A transform applied inverted.
    pub fn inverse(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            inverse: true,
        }
    }
}

impl std::str::FromStr for TransformRef {
    type Err = String;

    /// Parses `path`, `[path,0]` or `[path,1]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(inner) = s.strip_prefix('[').and_then(|s| s.strip_suffix(']')) else {
            if s.is_empty() {
                return Err("empty transform path".to_string());
            }
            return Ok(Self::forward(s));
        };
        match inner.rsplit_once(',').map(|(p, f)| (p.trim(), f.trim())) {
            Some((path, "1")) if !path.is_empty() => Ok(Self::inverse(path)),
            Some((path, "0")) if !path.is_empty() => Ok(Self::forward(path)),
            _ => Err(format!("invalid transform: {s}. Expected path or [path,0|1]")),
        }
    }
}

impl fmt::Display for TransformRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverse {
            write!(f, "[{},1]", self.path)
        } else {
            f.write_str(&self.path)
        }
    }
}

/// Extraction of the rigid matrix of one volume from motion parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionCorrStats {
    /// CSV written by `antsMotionCorr`.
    pub params_csv: String,
    /// Index of the volume in the time series.
    pub volume: usize,
}

impl MotionCorrStats {
    /// Matrix file written for the volume.
    pub fn matrix(&self) -> String {
        format!("motcorr_vol{}.mat", self.volume)
    }

    /// Renders the `antsMotionCorrStats` command.
    pub fn to_invocation(&self) -> Invocation {
        let mut inv = Invocation::new(ANTS_MOTION_CORR_STATS);
        inv.flag("-m", self.params_csv.as_str())
            .flag("-o", self.matrix())
            .flag("-t", self.volume.to_string());
        inv
    }
}

/// Resampling of one volume through a chain of transforms.
#[derive(Debug, Clone, PartialEq)]
pub struct AntsApplyTransforms {
    /// Volume to resample.
    pub input: String,
    /// Image defining the output space.
    pub reference: String,
    /// Output file.
    pub output: String,
    /// Transforms, in the order they are passed on the command line.
    pub transforms: Vec<TransformRef>,
    /// Motion parameters applied after the listed transforms, if any.
    pub motion: Option<MotionCorrStats>,
    /// Resampling interpolation.
    pub interpolation: Interpolation,
}

impl AntsApplyTransforms {
    /// Creates a resampling with fifth order B-spline interpolation.
    pub fn new(
        input: impl Into<String>,
        reference: impl Into<String>,
        output: impl Into<String>,
        transforms: Vec<TransformRef>,
    ) -> Result<Self, AntsError> {
        let this = Self {
            input: input.into(),
            reference: reference.into(),
            output: output.into(),
            transforms,
            motion: None,
            interpolation: Interpolation::BSpline(5),
        };
        for (role, path) in [
            ("input", &this.input),
            ("reference", &this.reference),
            ("output", &this.output),
        ] {
            if path.trim().is_empty() {
                return Err(AntsError::EmptyPath(role));
            }
        }
        Ok(this)
    }

    /// Appends the motion correction matrix of `volume` from `params_csv`.
    pub fn with_motion(mut self, params_csv: impl Into<String>, volume: usize) -> Self {
        self.motion = Some(MotionCorrStats {
            params_csv: params_csv.into(),
            volume,
        });
        self
    }

    /// Renders the `antsApplyTransforms` command.
    pub fn to_invocation(&self) -> Result<Invocation, AntsError> {
        let interpolation = self.interpolation.validate()?;

        let mut inv = Invocation::new(ANTS_APPLY_TRANSFORMS);
        inv.flag("-i", self.input.as_str());
        for transform in &self.transforms {
            inv.flag("-t", transform.to_string());
        }
        if let Some(motion) = &self.motion {
            inv.flag("-t", motion.matrix());
        }
        inv.flag("-n", interpolation.to_string())
            .flag("-r", self.reference.as_str())
            .flag("-o", self.output.as_str());

        Ok(inv)
    }

    /// All commands needed, in order: the motion matrix extraction first
    /// when motion parameters are set, then the resampling.
    pub fn plan(&self) -> Result<Vec<Invocation>, AntsError> {
        let mut plan = Vec::with_capacity(2);
        if let Some(motion) = &self.motion {
            plan.push(motion.to_invocation());
        }
        plan.push(self.to_invocation()?);
        Ok(plan)
    }

    /// Runs the plan, failing on the first step that exits non-zero.
    pub fn run(&self, config: &ToolConfig) -> Result<(), AntsError> {
        runner::run_all(&self.plan()?, config)
    }
}
