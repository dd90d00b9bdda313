use std::fmt;

use crate::error::AntsError;

/// Iteration counts per resolution level with an optional convergence test.
///
/// The test, when present, is a threshold on the slope of the energy profile
/// evaluated over a window of iterations.
#[derive(Debug, Clone, PartialEq)]
pub struct Convergence {
    iterations: Vec<u32>,
    test: Option<(f64, u32)>,
}

impl Convergence {
    /// Iteration counts only; the tool's default convergence test applies.
    pub fn iterations(iterations: &[u32]) -> Self {
        Self {
            iterations: iterations.to_vec(),
            test: None,
        }
    }

    /// Iteration counts with an explicit threshold and window size.
    pub fn with_threshold(iterations: &[u32], threshold: f64, window: u32) -> Self {
        Self {
            iterations: iterations.to_vec(),
            test: Some((threshold, window)),
        }
    }

    /// Maximum iterations per level, coarsest first.
    pub fn iteration_counts(&self) -> &[u32] {
        &self.iterations
    }

    /// Convergence threshold, if set.
    pub fn threshold(&self) -> Option<f64> {
        self.test.map(|(threshold, _)| threshold)
    }

    /// Window size of the convergence test, if set.
    pub fn window(&self) -> Option<u32> {
        self.test.map(|(_, window)| window)
    }
}

impl fmt::Display for Convergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let iterations = join_levels(&self.iterations);
        match self.test {
            Some((threshold, window)) => write!(f, "[{iterations},{threshold:e},{window}]"),
            None => f.write_str(&iterations),
        }
    }
}

/// A multi-resolution schedule: one iteration count, smoothing sigma and
/// shrink factor per level.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    convergence: Convergence,
    smoothing_sigmas: Vec<f32>,
    shrink_factors: Vec<u32>,
}

impl Schedule {
    /// Creates a schedule, checking that every list has the same number of levels.
    pub fn new(
        convergence: Convergence,
        smoothing_sigmas: &[f32],
        shrink_factors: &[u32],
    ) -> Result<Self, AntsError> {
        let iterations = convergence.iterations.len();
        if iterations == 0 {
            return Err(AntsError::EmptySchedule);
        }
        if iterations != smoothing_sigmas.len() || iterations != shrink_factors.len() {
            return Err(AntsError::ScheduleMismatch {
                iterations,
                sigmas: smoothing_sigmas.len(),
                shrink: shrink_factors.len(),
            });
        }

        Ok(Self {
            convergence,
            smoothing_sigmas: smoothing_sigmas.to_vec(),
            shrink_factors: shrink_factors.to_vec(),
        })
    }

    /// Number of resolution levels.
    pub fn levels(&self) -> usize {
        self.convergence.iterations.len()
    }

    /// The convergence settings.
    pub fn convergence(&self) -> &Convergence {
        &self.convergence
    }

    /// Iteration counts rendered as `AxBxC`, without convergence test.
    pub fn iterations_arg(&self) -> String {
        join_levels(&self.convergence.iterations)
    }

    /// Smoothing sigmas rendered as `AxBxC`.
    pub fn smoothing_arg(&self) -> String {
        join_levels(&self.smoothing_sigmas)
    }

    /// Shrink factors rendered as `AxBxC`.
    pub fn shrink_arg(&self) -> String {
        join_levels(&self.shrink_factors)
    }
}

fn join_levels<T: fmt::Display>(levels: &[T]) -> String {
    levels
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join("x")
}

#[cfg(test)]
mod tests {
    use super::{Convergence, Schedule};
    use crate::error::AntsError;

    #[test]
    fn plain_iterations() {
        let c = Convergence::iterations(&[100, 50, 25]);
        assert_eq!(c.to_string(), "100x50x25");
    }

    #[test]
    fn threshold_and_window() {
        let c = Convergence::with_threshold(&[100, 70, 50], 1e-6, 6);
        assert_eq!(c.to_string(), "[100x70x50,1e-6,6]");
        assert_eq!(c.iteration_counts(), &[100, 70, 50]);
        assert_eq!(c.threshold(), Some(1e-6));
        assert_eq!(c.window(), Some(6));

        let plain = Convergence::iterations(&[10]);
        assert_eq!(plain.threshold(), None);
        assert_eq!(plain.window(), None);
    }

    #[test]
    fn schedule_levels() -> Result<(), AntsError> {
        let s = Schedule::new(
            Convergence::iterations(&[1000, 500, 250, 100, 50, 25]),
            &[8.0, 4.0, 2.0, 1.0, 0.5, 0.0],
            &[6, 5, 4, 3, 2, 1],
        )?;
        assert_eq!(s.levels(), 6);
        assert_eq!(s.iterations_arg(), "1000x500x250x100x50x25");
        assert_eq!(s.smoothing_arg(), "8x4x2x1x0.5x0");
        assert_eq!(s.shrink_arg(), "6x5x4x3x2x1");
        Ok(())
    }

    #[test]
    fn schedule_mismatch() {
        let res = Schedule::new(Convergence::iterations(&[10, 5]), &[1.0], &[2, 1]);
        assert!(matches!(
            res,
            Err(AntsError::ScheduleMismatch {
                iterations: 2,
                sigmas: 1,
                shrink: 2
            })
        ));
    }

    #[test]
    fn schedule_empty() {
        let res = Schedule::new(Convergence::iterations(&[]), &[], &[]);
        assert!(matches!(res, Err(AntsError::EmptySchedule)));
    }
}
