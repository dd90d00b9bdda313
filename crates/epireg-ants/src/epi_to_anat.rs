use crate::{
    error::AntsError,
    invocation::Invocation,
    metric::{Metric, SamplingStrategy},
    registration::{AntsRegistration, Interpolation, RegistrationOutput},
    schedule::{Convergence, Schedule},
    stage::{MaskPair, Stage},
    transform::Transform,
};

const HISTOGRAM_BINS: u32 = 64;

/// The three images of an EPI to anatomical registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpiToAnatInputs {
    epi: String,
    anat: String,
    mask: String,
}

impl EpiToAnatInputs {
    /// Creates the inputs, rejecting empty paths.
    ///
    /// # Arguments
    ///
    /// * `epi` - Functional image, registered as the moving image.
    /// * `anat` - Anatomical image, used as the fixed image.
    /// * `mask` - Brain mask restricting the metric on the later stages.
    pub fn new(
        epi: impl Into<String>,
        anat: impl Into<String>,
        mask: impl Into<String>,
    ) -> Result<Self, AntsError> {
        let inputs = Self {
            epi: epi.into(),
            anat: anat.into(),
            mask: mask.into(),
        };
        for (role, path) in [
            ("EPI", &inputs.epi),
            ("anatomical", &inputs.anat),
            ("mask", &inputs.mask),
        ] {
            if path.trim().is_empty() {
                return Err(AntsError::EmptyPath(role));
            }
        }
        Ok(inputs)
    }

    /// Path of the EPI image.
    pub fn epi(&self) -> &str {
        &self.epi
    }

    /// Path of the anatomical image.
    pub fn anat(&self) -> &str {
        &self.anat
    }

    /// Path of the mask image.
    pub fn mask(&self) -> &str {
        &self.mask
    }
}

/// Builds the fixed four stage Rigid, Similarity, Affine, SyN registration
/// of an EPI onto an anatomical image.
///
/// The anatomical image is the fixed image and the EPI the moving image of
/// every metric. The rigid stage runs unmasked over six levels; the other
/// stages run over three levels with the mask in the moving slot (similarity)
/// or in both slots (affine and SyN).
pub fn epi_to_anat(inputs: &EpiToAnatInputs) -> Result<AntsRegistration, AntsError> {
    let mattes = || Metric::mattes(inputs.anat(), inputs.epi(), HISTOGRAM_BINS);
    let three_levels = |convergence| Schedule::new(convergence, &[1.0, 0.5, 0.0], &[3, 2, 1]);

    let stages = vec![
        Stage {
            transform: Transform::Rigid { gradient_step: 0.1 },
            metric: mattes().with_sampling(SamplingStrategy::None),
            schedule: Schedule::new(
                Convergence::iterations(&[1000, 500, 250, 100, 50, 25]),
                &[8.0, 4.0, 2.0, 1.0, 0.5, 0.0],
                &[6, 5, 4, 3, 2, 1],
            )?,
            masks: MaskPair::none(),
        },
        Stage {
            transform: Transform::Similarity { gradient_step: 0.1 },
            metric: mattes(),
            schedule: three_levels(Convergence::iterations(&[100, 50, 25]))?,
            masks: MaskPair::moving_only(inputs.mask()),
        },
        Stage {
            transform: Transform::Affine { gradient_step: 0.1 },
            metric: mattes(),
            schedule: three_levels(Convergence::iterations(&[100, 50, 25]))?,
            masks: MaskPair::both(inputs.mask()),
        },
        Stage {
            transform: Transform::SyN {
                gradient_step: 0.2,
                update_field_variance: 3.0,
                total_field_variance: 0.0,
            },
            metric: mattes(),
            schedule: three_levels(Convergence::with_threshold(&[100, 70, 50], 1e-6, 6))?,
            masks: MaskPair::both(inputs.mask()),
        },
    ];

    Ok(AntsRegistration {
        dimensionality: 3,
        verbose: true,
        output: RegistrationOutput::default(),
        stages,
        interpolation: Interpolation::BSpline(5),
        collapse_output_transforms: true,
        use_histogram_matching: false,
        write_composite_transform: true,
    })
}

/// Renders the EPI to anatomical `antsRegistration` command.
pub fn epi_to_anat_invocation(inputs: &EpiToAnatInputs) -> Result<Invocation, AntsError> {
    epi_to_anat(inputs)?.to_invocation()
}
