use std::fmt;

/// Point sampling strategy used by a similarity metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplingStrategy {
    /// Dense sampling; rendered literally as `None` in the ANTs grammar.
    None,
    /// Regular grid sampling with the given fraction of points.
    Regular(f32),
    /// Random sampling with the given fraction of points.
    Random(f32),
}

impl fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingStrategy::None => write!(f, "None"),
            SamplingStrategy::Regular(p) => write!(f, "Regular,{p}"),
            SamplingStrategy::Random(p) => write!(f, "Random,{p}"),
        }
    }
}

/// Mutual information formulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    /// Mattes mutual information.
    Mattes,
    /// Joint histogram mutual information.
    MutualInformation,
}

impl MetricKind {
    fn tag(self) -> &'static str {
        match self {
            MetricKind::Mattes => "Mattes",
            MetricKind::MutualInformation => "MI",
        }
    }
}

/// An image similarity metric between a fixed and a moving image.
///
/// Renders as `Mattes[fixed,moving,weight,bins]` with an optional trailing
/// sampling strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    /// Metric formulation.
    pub kind: MetricKind,
    /// Fixed (reference) image path.
    pub fixed: String,
    /// Moving image path.
    pub moving: String,
    /// Metric weight.
    pub weight: f32,
    /// Number of histogram bins.
    pub bins: u32,
    /// Sampling strategy; omitted from the rendering when `None`.
    pub sampling: Option<SamplingStrategy>,
}

impl Metric {
    /// Mattes mutual information with unit weight.
    pub fn mattes(fixed: impl Into<String>, moving: impl Into<String>, bins: u32) -> Self {
        Self {
            kind: MetricKind::Mattes,
            fixed: fixed.into(),
            moving: moving.into(),
            weight: 1.0,
            bins,
            sampling: None,
        }
    }

    /// Joint histogram mutual information with unit weight.
    pub fn mutual_information(
        fixed: impl Into<String>,
        moving: impl Into<String>,
        bins: u32,
    ) -> Self {
        Self {
            kind: MetricKind::MutualInformation,
            ..Self::mattes(fixed, moving, bins)
        }
    }

    /// Sets the sampling strategy.
    pub fn with_sampling(mut self, sampling: SamplingStrategy) -> Self {
        self.sampling = Some(sampling);
        self
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{},{},{},{}",
            self.kind.tag(),
            self.fixed,
            self.moving,
            self.weight,
            self.bins
        )?;
        if let Some(sampling) = &self.sampling {
            write!(f, ",{sampling}")?;
        }
        write!(f, "]")
    }
}
