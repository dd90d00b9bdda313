use std::path::PathBuf;

use crate::{
    config::ToolConfig,
    error::AntsError,
    invocation::Invocation,
    metric::{Metric, SamplingStrategy},
    runner,
    schedule::{Convergence, Schedule},
    transform::Transform,
};

/// Name of the ANTs motion correction program.
pub const ANTS_MOTION_CORR: &str = "antsMotionCorr";

/// Default directory receiving the motion correction outputs.
pub const DEFAULT_OUTPUT_DIR: &str = "ants_mc_tmp";

/// Rigid realignment of every volume of a 4D EPI onto a reference volume.
#[derive(Debug, Clone, PartialEq)]
pub struct AntsMotionCorr {
    /// Reference volume the time series is realigned to.
    pub reference: String,
    /// 4D time series to realign.
    pub input: String,
    output_dir: String,
    /// Transform estimated per volume.
    pub transform: Transform,
    /// Metric between the reference and each volume.
    pub metric: Metric,
    /// Multi-resolution schedule.
    pub schedule: Schedule,
    /// Number of volumes averaged to build the template.
    pub n_images: u32,
}

/// Files written by a motion correction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionCorrOutputs {
    /// Motion corrected time series.
    pub corrected: PathBuf,
    /// Average of the corrected time series.
    pub average: PathBuf,
    /// Six rigid parameters per volume, as CSV.
    pub params_csv: PathBuf,
}

impl AntsMotionCorr {
    /// Creates the realignment with the default rigid schedule.
    pub fn new(reference: impl Into<String>, input: impl Into<String>) -> Result<Self, AntsError> {
        let reference = reference.into();
        let input = input.into();
        if reference.trim().is_empty() {
            return Err(AntsError::EmptyPath("reference"));
        }
        if input.trim().is_empty() {
            return Err(AntsError::EmptyPath("input"));
        }

        Ok(Self {
            metric: Metric::mutual_information(reference.as_str(), input.as_str(), 20)
                .with_sampling(SamplingStrategy::None),
            reference,
            input,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            transform: Transform::Rigid { gradient_step: 0.1 },
            schedule: Schedule::new(
                Convergence::iterations(&[100, 50, 30]),
                &[2.0, 1.0, 0.0],
                &[4, 2, 1],
            )?,
            n_images: 10,
        })
    }

    /// Directory receiving the outputs, relative to the working directory.
    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }

    /// Sets the output directory, rejecting a blank one.
    pub fn with_output_dir(mut self, output_dir: impl Into<String>) -> Result<Self, AntsError> {
        let output_dir = output_dir.into();
        if output_dir.trim().is_empty() {
            return Err(AntsError::EmptyPath("output directory"));
        }
        self.output_dir = output_dir;
        Ok(self)
    }

    fn output_prefix(&self) -> String {
        format!("{}/motcorr", self.output_dir)
    }

    /// Output files, relative to the working directory.
    pub fn outputs(&self) -> MotionCorrOutputs {
        let prefix = self.output_prefix();
        MotionCorrOutputs {
            corrected: PathBuf::from(format!("{prefix}.nii.gz")),
            average: PathBuf::from(format!("{prefix}_avg.nii.gz")),
            params_csv: PathBuf::from(format!("{prefix}MOCOparams.csv")),
        }
    }

    /// Renders the `antsMotionCorr` command.
    pub fn to_invocation(&self) -> Invocation {
        let prefix = self.output_prefix();
        let mut inv = Invocation::new(ANTS_MOTION_CORR);
        inv.flag("-d", "3")
            .flag(
                "-o",
                format!("[{prefix},{prefix}.nii.gz,{prefix}_avg.nii.gz]"),
            )
            .flag("-m", self.metric.to_string())
            .flag("-t", self.transform.to_string())
            .flag("-i", self.schedule.iterations_arg())
            .flag("-u", "1")
            .flag("-e", "1")
            .flag("-l", "1")
            .flag("-s", self.schedule.smoothing_arg())
            .flag("-f", self.schedule.shrink_arg())
            .flag("-n", self.n_images.to_string());
        inv
    }

    /// Prepares the output directory and runs the realignment.
    ///
    /// On a second pass the outputs of the first pass are moved to
    /// `first_<output_dir>` so the two runs never overwrite each other. A
    /// `first_<output_dir>` left over from an earlier run is replaced.
    pub fn run(&self, config: &ToolConfig, second_pass: bool) -> Result<MotionCorrOutputs, AntsError> {
        let output_dir = config.in_work_dir(&self.output_dir);
        if second_pass {
            let first_dir = config.in_work_dir(format!("first_{}", self.output_dir));
            if first_dir.exists() {
                log::info!("Removing stale {}", first_dir.display());
                std::fs::remove_dir_all(&first_dir)?;
            }
            log::debug!(
                "Moving {} to {}",
                output_dir.display(),
                first_dir.display()
            );
            std::fs::rename(&output_dir, &first_dir)?;
        }
        std::fs::create_dir_all(&output_dir)?;

        runner::run_checked(&self.to_invocation(), config)?;

        Ok(self.outputs())
    }
}

#[cfg(test)]
mod tests {
    use super::AntsMotionCorr;
    use crate::error::AntsError;
    use std::path::PathBuf;

    #[test]
    fn default_command() -> Result<(), AntsError> {
        let mc = AntsMotionCorr::new("median.nii.gz", "bold.nii.gz")?;
        assert_eq!(
            mc.to_invocation().command_line(),
            "antsMotionCorr -d 3 \
             -o [ants_mc_tmp/motcorr,ants_mc_tmp/motcorr.nii.gz,ants_mc_tmp/motcorr_avg.nii.gz] \
             -m MI[median.nii.gz,bold.nii.gz,1,20,None] -t Rigid[0.1] -i 100x50x30 \
             -u 1 -e 1 -l 1 -s 2x1x0 -f 4x2x1 -n 10"
        );
        Ok(())
    }

    #[test]
    fn output_paths() -> Result<(), AntsError> {
        let mc = AntsMotionCorr::new("ref.nii.gz", "bold.nii.gz")?.with_output_dir("mc")?;
        assert_eq!(mc.output_dir(), "mc");
        let outputs = mc.outputs();
        assert_eq!(outputs.corrected, PathBuf::from("mc/motcorr.nii.gz"));
        assert_eq!(outputs.average, PathBuf::from("mc/motcorr_avg.nii.gz"));
        assert_eq!(outputs.params_csv, PathBuf::from("mc/motcorrMOCOparams.csv"));
        Ok(())
    }

    #[test]
    fn rejects_blank_output_dir() -> Result<(), AntsError> {
        let mc = AntsMotionCorr::new("ref.nii.gz", "bold.nii.gz")?;
        assert!(matches!(
            mc.clone().with_output_dir(""),
            Err(AntsError::EmptyPath("output directory"))
        ));
        assert!(matches!(
            mc.with_output_dir("  "),
            Err(AntsError::EmptyPath("output directory"))
        ));
        Ok(())
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            AntsMotionCorr::new("ref.nii.gz", ""),
            Err(AntsError::EmptyPath("input"))
        ));
    }
}
