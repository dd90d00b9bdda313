#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for building and running ANTs commands.
pub mod error;

/// Tool location and working directory configuration.
pub mod config;

/// Rendered external commands.
///
/// An [`invocation::Invocation`] is a program name plus its exact argument list.
pub mod invocation;

/// Similarity metrics (`Mattes[...]`, `MI[...]`).
pub mod metric;

/// Transform families optimized by a registration stage.
pub mod transform;

/// Multi-resolution schedules and convergence criteria.
pub mod schedule;

/// Registration stages and metric masks.
pub mod stage;

/// Multi-stage `antsRegistration` commands.
pub mod registration;

/// The fixed EPI to anatomical registration.
///
/// See [`epi_to_anat::epi_to_anat`] for the stage layout.
pub mod epi_to_anat;

/// Rigid motion correction of 4D time series with `antsMotionCorr`.
pub mod motion_corr;

/// Resampling through transform chains with `antsApplyTransforms`.
pub mod apply_transforms;

/// Spawning invocations and forwarding their exit status.
pub mod runner;

pub use config::ToolConfig;
pub use epi_to_anat::{epi_to_anat, epi_to_anat_invocation, EpiToAnatInputs};
pub use error::AntsError;
pub use invocation::Invocation;
