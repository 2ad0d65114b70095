//! Ground-control-point survey builder.
//!
//! Walks a directory of scanned-object photographs, detects the colored
//! circular floor markers in each one, and correlates the sightings with the
//! markers' known 3D positions into a `surveydata` XML document that anchors
//! the downstream photogrammetric reconstruction.
//!
//! ## Quickstart
//!
//! ```no_run
//! use gcp_survey::{build_correlation_document, survey_xml_string, SurveyConfig};
//!
//! # fn main() -> Result<(), gcp_survey::SurveyError> {
//! let config = SurveyConfig::default();
//! let document = build_correlation_document("scan-042/images".as_ref(), &config)?;
//! print!("{}", survey_xml_string(&document));
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `gcp_survey::core`: layout model, geometry, document types.
//! - `gcp_survey::detect`: per-image extraction/filtering/classification.
//! - [`build_correlation_document`] / [`write_survey_file`]: the batch run.

pub use gcp_survey_core as core;
pub use gcp_survey_detect as detect;

mod survey;
mod xml;

pub use gcp_survey_core::{
    init_with_level, marker_positions, CorrelationDocument, MarkerDefinition, MarkerEntry,
    MarkerLayout, Observation,
};
pub use gcp_survey_detect::{MarkerDetector, MarkerDetectorParams};
pub use survey::{build_correlation_document, list_image_files, SurveyConfig};
pub use xml::{survey_xml_string, write_survey_file, write_survey_xml};

use std::path::PathBuf;

/// Errors produced by the survey pipeline.
///
/// Per-image problems never show up here; an unreadable photograph only
/// costs its own observations. The fatal case is an unusable input
/// directory, and a failed output write still leaves the caller holding the
/// in-memory document.
#[derive(thiserror::Error, Debug)]
pub enum SurveyError {
    #[error("cannot list image directory {path}")]
    ImageDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write survey document to {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot read detector params from {path}")]
    ParamsRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid detector params in {path}")]
    ParamsParse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
