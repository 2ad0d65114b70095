//! Physical layout of the floor markers around the scanned object.
//!
//! The markers sit flat on the floor, evenly spaced on a circle centred on the
//! turntable axis. Their positions are fully determined by the layout
//! constants, so the 3D ground truth is computed once per run and consulted
//! read-only afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Immutable description of the marker circle.
///
/// The default matches the production scanner: 12 markers in clock positions
/// on a 35 mm circle, 15 mm below the coordinate origin.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MarkerLayout {
    /// Number of markers on the circle (clock positions).
    pub marker_count: u8,
    /// Radius of the marker circle in millimeters.
    pub circle_radius_mm: f64,
    /// Floor elevation in millimeters. The markers lie flat, so every marker
    /// shares this Z regardless of its azimuth.
    pub floor_z_mm: f64,
}

impl Default for MarkerLayout {
    fn default() -> Self {
        Self {
            marker_count: 12,
            circle_radius_mm: 35.0,
            floor_z_mm: -15.0,
        }
    }
}

impl MarkerLayout {
    /// Angular spacing between neighbouring markers, in degrees.
    #[inline]
    pub fn azimuth_step_deg(&self) -> f64 {
        360.0 / f64::from(self.marker_count)
    }
}

/// Known ground truth for one marker.
///
/// `label` is the human-facing clock position (1..=12); `marker_id` is the
/// wire identifier used in the survey document. Label 12 aliases to marker id
/// 0 (clock wrap), all other labels keep their own number.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkerDefinition {
    pub marker_id: u8,
    pub label: u8,
    /// Position in millimeters, local scanner coordinate system.
    pub x_mm: f64,
    pub y_mm: f64,
    pub z_mm: f64,
    pub azimuth_deg: f64,
    pub azimuth_rad: f64,
}

/// Compute the fixed 3D position of every marker in the layout.
///
/// Returns a map keyed by clock label (1..=marker_count). For each label the
/// azimuth is `label * (360 / marker_count)` degrees, the X/Y position is the
/// polar-to-cartesian projection on the layout circle, and Z is the floor
/// constant. Azimuth increases strictly with label.
pub fn marker_positions(layout: &MarkerLayout) -> BTreeMap<u8, MarkerDefinition> {
    let mut positions = BTreeMap::new();
    for label in 1..=layout.marker_count {
        let azimuth_deg = f64::from(label) * layout.azimuth_step_deg();
        let azimuth_rad = azimuth_deg.to_radians();
        positions.insert(
            label,
            MarkerDefinition {
                marker_id: label % layout.marker_count,
                label,
                x_mm: layout.circle_radius_mm * azimuth_rad.cos(),
                y_mm: layout.circle_radius_mm * azimuth_rad.sin(),
                z_mm: layout.floor_z_mm,
                azimuth_deg,
                azimuth_rad,
            },
        );
    }
    positions
}
