//! Observation and correlation-document data model.

use serde::{Deserialize, Serialize};

use crate::layout::MarkerDefinition;

/// One sighting of a marker in one image.
///
/// Immutable once created. `image_name` is the bare file name of the source
/// photograph, not a path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub marker_id: u8,
    pub image_name: String,
    pub xpixel: i32,
    pub ypixel: i32,
}

impl Observation {
    /// Canonical ordering key: (marker_id, image_name, xpixel, ypixel).
    #[inline]
    pub fn sort_key(&self) -> (u8, &str, i32, i32) {
        (self.marker_id, &self.image_name, self.xpixel, self.ypixel)
    }
}

/// A marker's ground truth together with every sighting of it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MarkerEntry {
    pub definition: MarkerDefinition,
    /// Observations sorted by [`Observation::sort_key`].
    pub observations: Vec<Observation>,
}

/// The correlation document: 3D ground truth joined with 2D sightings,
/// one entry per marker that was seen at least once.
///
/// Entries are ordered by ascending `marker_id`. Built once per run,
/// write-once.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CorrelationDocument {
    pub entries: Vec<MarkerEntry>,
}

impl CorrelationDocument {
    /// Total number of observations across all markers.
    pub fn observation_count(&self) -> usize {
        self.entries.iter().map(|e| e.observations.len()).sum()
    }
}
