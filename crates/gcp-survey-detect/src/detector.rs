//! End-to-end marker detection for one decoded image.

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::classify::classify_candidate;
use crate::extract::detect_candidate_shapes;
use crate::filter::select_best_markers;
use crate::hsv::HsvImage;

/// Tunables of the per-image detection pipeline.
///
/// The defaults reproduce the production scanner setup; they are overridable
/// from JSON for difficult lighting.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerDetectorParams {
    /// Radius of the elliptical opening element (background noise).
    pub open_radius: u32,
    /// Radius of the elliptical closing element (foreground noise).
    pub close_radius: u32,
    /// Gain of the resolution-adaptive Canny threshold:
    /// `low = edge_gain * (rows*cols)^(-1/4)`.
    pub edge_gain: f64,
    /// A contour is kept only if its perimeter exceeds
    /// `sqrt(rows*cols) / min_perimeter_divisor`.
    pub min_perimeter_divisor: f64,
    /// Minimum number of convex-hull vertices for a candidate.
    pub min_hull_vertices: usize,
    /// Bounding-rect area must exceed `image_area / min_area_divisor`.
    pub min_area_divisor: f64,
    /// Bounding-rect area must stay below `image_area / max_area_divisor`.
    pub max_area_divisor: f64,
    /// Number of tolerance steps in the relaxation search.
    pub relaxation_steps: u32,
    /// The ellipse-fit residual bound at step `t` is `t / residual_scale`.
    pub residual_scale: f64,
    /// Hard cap on accepted candidates per image. Triangulation needs three
    /// observations; further low-confidence ones hurt more than they help.
    pub max_markers: usize,
}

impl Default for MarkerDetectorParams {
    fn default() -> Self {
        Self {
            open_radius: 2,
            close_radius: 1,
            edge_gain: 1250.0,
            min_perimeter_divisor: 6.0,
            min_hull_vertices: 5,
            min_area_divisor: 200.0,
            max_area_divisor: 20.0,
            relaxation_steps: 99,
            residual_scale: 2000.0,
            max_markers: 3,
        }
    }
}

/// One identified marker in one image: clock label plus pixel position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMarker {
    pub label: u8,
    pub xpixel: i32,
    pub ypixel: i32,
}

/// Runs extract -> filter -> classify over single images.
pub struct MarkerDetector {
    params: MarkerDetectorParams,
}

impl MarkerDetector {
    pub fn new(params: MarkerDetectorParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &MarkerDetectorParams {
        &self.params
    }

    /// Detect and classify markers in one decoded image.
    ///
    /// Returns zero to `max_markers` entries; an image without recognizable
    /// markers simply contributes nothing.
    pub fn detect(&self, image: &DynamicImage) -> Vec<ImageMarker> {
        let gray = image.to_luma8();
        let candidates = detect_candidate_shapes(&gray, &self.params);
        let accepted = select_best_markers(&candidates, gray.dimensions(), &self.params);
        if accepted.is_empty() {
            return Vec::new();
        }

        let hsv = HsvImage::from_rgb(&image.to_rgb8());
        accepted
            .into_iter()
            .map(|candidate| {
                let (xpixel, ypixel) = candidate.center_px();
                ImageMarker {
                    label: classify_candidate(candidate, &hsv),
                    xpixel,
                    ypixel,
                }
            })
            .collect()
    }
}
