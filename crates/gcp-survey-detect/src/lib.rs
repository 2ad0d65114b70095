//! Per-image fiducial marker detection for ground-control-point surveys.
//!
//! One photograph goes through three stages:
//! - [`detect_candidate_shapes`]: morphological cleanup, adaptive Canny edge
//!   detection and contour/hull analysis produce [`CandidateShape`]s.
//! - [`select_best_markers`]: a confidence-relaxation search keeps up to three
//!   well-shaped, non-overlapping candidates.
//! - [`classify_candidate`]: HSV statistics sampled inside each survivor map
//!   it to a marker clock label.
//!
//! [`MarkerDetector`] chains the stages for one decoded image.

mod candidate;
mod classify;
mod detector;
mod extract;
mod filter;
mod hsv;
mod morphology;

pub use candidate::{BoundingEllipse, CandidateShape};
pub use classify::{classify_candidate, classify_stats};
pub use detector::{ImageMarker, MarkerDetector, MarkerDetectorParams};
pub use extract::detect_candidate_shapes;
pub use filter::select_best_markers;
pub use hsv::{roi_stats, HsvImage, RoiStats};
pub use morphology::{gray_close, gray_open};
