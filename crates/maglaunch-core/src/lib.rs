//! # maglaunch-core
//!
//! The deterministic parameter engine for the maglaunch launcher.
//!
//! This crate owns the static declaration of the nf-core/magmap input
//! parameters and everything that can be computed from them without
//! touching the network or the filesystem:
//!
//! - [`params`]: typed parameter declarations and the ordered,
//!   name-unique registry
//! - [`command`]: derivation of the pipeline runner command line
//! - [`form`]: grouping of declarations into input-form sections
//!
//! The pipeline itself (assembly, classification, QC) is external;
//! nothing in this crate computes over sequence data.

pub mod command;
pub mod error;
pub mod form;
pub mod params;

pub use command::{build_command, get_flag, PIPELINE_SCRIPT, RUNNER_PATH, RUN_CONFIG, RUN_PROFILE};
pub use error::ParamError;
pub use form::{render_form, render_text, FormField, FormSection};
pub use params::{magmap_registry, ParamDecl, ParamRegistry, ParamType, ParamValue};
