use std::fmt;

use crate::{error::AntsError, invocation::Invocation, stage::Stage};

/// Name of the ANTs registration program.
pub const ANTS_REGISTRATION: &str = "antsRegistration";

/// Interpolation used to resample the final warped image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Trilinear interpolation.
    Linear,
    /// Nearest neighbor interpolation.
    NearestNeighbor,
    /// B-spline interpolation of the given order (2 to 5).
    BSpline(u8),
}

impl Interpolation {
    /// Checks that the interpolation parameters are accepted by the ANTs tools.
    pub fn validate(self) -> Result<Self, AntsError> {
        match self {
            Interpolation::BSpline(order) if !(2..=5).contains(&order) => {
                Err(AntsError::InvalidSplineOrder(order))
            }
            _ => Ok(self),
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interpolation::Linear => write!(f, "Linear"),
            Interpolation::NearestNeighbor => write!(f, "NearestNeighbor"),
            Interpolation::BSpline(order) => write!(f, "BSpline[{order}]"),
        }
    }
}

/// Output naming for a registration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutput {
    /// Prefix of the transform files written by the tool.
    pub transform_prefix: String,
    /// File name of the warped moving image.
    pub warped_image: String,
}

impl Default for RegistrationOutput {
    fn default() -> Self {
        Self {
            transform_prefix: "output_".to_string(),
            warped_image: "output_warped_image.nii.gz".to_string(),
        }
    }
}

impl fmt::Display for RegistrationOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.transform_prefix, self.warped_image)
    }
}

/// A multi-stage `antsRegistration` command.
#[derive(Debug, Clone, PartialEq)]
pub struct AntsRegistration {
    /// Image dimensionality.
    pub dimensionality: u8,
    /// Ask the tool for verbose progress output.
    pub verbose: bool,
    /// Output naming.
    pub output: RegistrationOutput,
    /// Stages applied in sequence, each starting from the previous result.
    pub stages: Vec<Stage>,
    /// Final resampling interpolation.
    pub interpolation: Interpolation,
    /// Collapse the output transforms into as few files as possible (`-z`).
    pub collapse_output_transforms: bool,
    /// Match the moving histogram to the fixed one before registering (`-u`).
    pub use_histogram_matching: bool,
    /// Write a composite transform holding the displacement field (`-a`).
    pub write_composite_transform: bool,
}

impl AntsRegistration {
    /// Renders the command, validating the stage list and interpolation.
    pub fn to_invocation(&self) -> Result<Invocation, AntsError> {
        if self.stages.is_empty() {
            return Err(AntsError::NoStages);
        }
        let interpolation = self.interpolation.validate()?;

        let mut inv = Invocation::new(ANTS_REGISTRATION);
        inv.flag("-d", self.dimensionality.to_string());
        if self.verbose {
            inv.arg("--verbose");
        }
        inv.flag("-o", self.output.to_string());
        for stage in &self.stages {
            stage.append_args(&mut inv);
        }
        inv.flag("--interpolation", interpolation.to_string())
            .flag("-z", flag_value(self.collapse_output_transforms))
            .flag("-u", flag_value(self.use_histogram_matching))
            .flag("-a", flag_value(self.write_composite_transform));

        Ok(inv)
    }
}

fn flag_value(enabled: bool) -> &'static str {
    if enabled {
        "1"
    } else {
        "0"
    }
}
