use std::fmt;

/// Geometric transform family optimized by one registration stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Rotation and translation.
    Rigid {
        /// Gradient step.
        gradient_step: f32,
    },
    /// Rigid plus isotropic scaling.
    Similarity {
        /// Gradient step.
        gradient_step: f32,
    },
    /// Full affine.
    Affine {
        /// Gradient step.
        gradient_step: f32,
    },
    /// Symmetric normalization (deformable).
    SyN {
        /// Gradient step.
        gradient_step: f32,
        /// Variance of the Gaussian regularizing the update field.
        update_field_variance: f32,
        /// Variance of the Gaussian regularizing the total field.
        total_field_variance: f32,
    },
}

impl Transform {
    /// Name of the transform family as the ANTs tools spell it.
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Rigid { .. } => "Rigid",
            Transform::Similarity { .. } => "Similarity",
            Transform::Affine { .. } => "Affine",
            Transform::SyN { .. } => "SyN",
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Rigid { gradient_step }
            | Transform::Similarity { gradient_step }
            | Transform::Affine { gradient_step } => {
                write!(f, "{}[{gradient_step}]", self.name())
            }
            Transform::SyN {
                gradient_step,
                update_field_variance,
                total_field_variance,
            } => write!(
                f,
                "SyN[{gradient_step},{update_field_variance},{total_field_variance}]"
            ),
        }
    }
}
