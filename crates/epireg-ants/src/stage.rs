use std::fmt;

use crate::{invocation::Invocation, metric::Metric, schedule::Schedule, transform::Transform};

/// Masks restricting where a stage's metric is evaluated.
///
/// Renders as `[fixed,moving]` with `NULL` in unmasked slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskPair {
    /// Mask in the fixed image space.
    pub fixed: Option<String>,
    /// Mask in the moving image space.
    pub moving: Option<String>,
}

impl MaskPair {
    /// No masking on either image.
    pub fn none() -> Self {
        Self::default()
    }

    /// The same mask on both images.
    pub fn both(mask: impl Into<String>) -> Self {
        let mask = mask.into();
        Self {
            fixed: Some(mask.clone()),
            moving: Some(mask),
        }
    }

    /// A mask in the second (moving) slot only.
    pub fn moving_only(mask: impl Into<String>) -> Self {
        Self {
            fixed: None,
            moving: Some(mask.into()),
        }
    }
}

impl fmt::Display for MaskPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{}]",
            self.fixed.as_deref().unwrap_or("NULL"),
            self.moving.as_deref().unwrap_or("NULL")
        )
    }
}

/// One registration stage: transform, metric, schedule and masks.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    /// Transform optimized by this stage.
    pub transform: Transform,
    /// Similarity metric driving the optimization.
    pub metric: Metric,
    /// Multi-resolution schedule.
    pub schedule: Schedule,
    /// Metric masks.
    pub masks: MaskPair,
}

impl Stage {
    /// Appends `-t -m -c -s -f --masks` for this stage.
    pub fn append_args(&self, inv: &mut Invocation) {
        inv.flag("-t", self.transform.to_string())
            .flag("-m", self.metric.to_string())
            .flag("-c", self.schedule.convergence().to_string())
            .flag("-s", self.schedule.smoothing_arg())
            .flag("-f", self.schedule.shrink_arg())
            .flag("--masks", self.masks.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{MaskPair, Stage};
    use crate::{
        error::AntsError,
        invocation::Invocation,
        metric::Metric,
        schedule::{Convergence, Schedule},
        transform::Transform,
    };

    #[test]
    fn mask_pairs() {
        assert_eq!(MaskPair::none().to_string(), "[NULL,NULL]");
        assert_eq!(MaskPair::moving_only("m").to_string(), "[NULL,m]");
        assert_eq!(MaskPair::both("m").to_string(), "[m,m]");
    }

    #[test]
    fn stage_args_order() -> Result<(), AntsError> {
        let stage = Stage {
            transform: Transform::Affine { gradient_step: 0.1 },
            metric: Metric::mattes("f", "m", 64),
            schedule: Schedule::new(
                Convergence::iterations(&[100, 50, 25]),
                &[1.0, 0.5, 0.0],
                &[3, 2, 1],
            )?,
            masks: MaskPair::both("mask"),
        };
        let mut inv = Invocation::new("antsRegistration");
        stage.append_args(&mut inv);
        assert_eq!(
            inv.args,
            vec![
                "-t",
                "Affine[0.1]",
                "-m",
                "Mattes[f,m,1,64]",
                "-c",
                "100x50x25",
                "-s",
                "1x0.5x0",
                "-f",
                "3x2x1",
                "--masks",
                "[mask,mask]",
            ]
        );
        Ok(())
    }
}
