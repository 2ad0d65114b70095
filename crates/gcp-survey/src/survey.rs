//! Cross-image aggregation into the correlation document.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use gcp_survey_core::{
    marker_positions, CorrelationDocument, MarkerEntry, MarkerLayout, Observation,
};
use gcp_survey_detect::{MarkerDetector, MarkerDetectorParams};

use crate::SurveyError;

/// Full configuration of one survey run: the physical marker layout plus the
/// per-image detector tunables.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    pub layout: MarkerLayout,
    pub detector: MarkerDetectorParams,
}

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "JPG", "jpeg", "JPEG"];

/// List the photographs of a scan directory, sorted by file name.
///
/// Only files directly inside `dir` with a jpg/JPG/jpeg/JPEG extension are
/// considered; the lexicographic file-name order is the canonical processing
/// order of the batch.
pub fn list_image_files(dir: &Path) -> Result<Vec<PathBuf>, SurveyError> {
    let entries = std::fs::read_dir(dir).map_err(|source| SurveyError::ImageDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| SurveyError::ImageDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let has_image_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e));
        if has_image_ext {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Run the whole pipeline over a scan directory.
///
/// Every image is processed in sorted-name order; observations are pooled,
/// sorted by `(marker_id, image, x, y)` and grouped per marker with its 3D
/// ground truth attached. Markers never seen are omitted. Deterministic:
/// identical input bytes produce an identical document.
///
/// Unreadable images are logged and skipped; the only error is an unusable
/// input directory.
pub fn build_correlation_document(
    dir: &Path,
    config: &SurveyConfig,
) -> Result<CorrelationDocument, SurveyError> {
    let files = list_image_files(dir)?;
    log::info!("surveying {} image(s) in {}", files.len(), dir.display());

    let detector = MarkerDetector::new(config.detector);
    let mut observations = Vec::new();

    for path in &files {
        let image_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let image = match image::open(path) {
            Ok(image) => image,
            Err(err) => {
                log::warn!("skipping unreadable image {}: {err}", path.display());
                continue;
            }
        };

        let markers = detector.detect(&image);
        if markers.len() < config.detector.max_markers {
            log::warn!(
                "only {} marker(s) found in {image_name}, wanted {}",
                markers.len(),
                config.detector.max_markers
            );
        }
        for marker in markers {
            observations.push(Observation {
                marker_id: marker.label % config.layout.marker_count,
                image_name: image_name.clone(),
                xpixel: marker.xpixel,
                ypixel: marker.ypixel,
            });
        }
    }

    observations.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    let definitions = marker_positions(&config.layout);
    let by_id: BTreeMap<u8, _> = definitions.values().map(|d| (d.marker_id, *d)).collect();

    let mut groups: BTreeMap<u8, Vec<Observation>> = BTreeMap::new();
    for obs in observations {
        groups.entry(obs.marker_id).or_default().push(obs);
    }

    let entries = groups
        .into_iter()
        .filter_map(|(marker_id, observations)| {
            let definition = by_id.get(&marker_id).copied()?;
            Some(MarkerEntry {
                definition,
                observations,
            })
        })
        .collect();

    let document = CorrelationDocument { entries };
    log::info!(
        "correlated {} observation(s) across {} marker(s)",
        document.observation_count(),
        document.entries.len()
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_is_a_fatal_precondition() {
        let err = list_image_files(Path::new("/nonexistent/scan/images")).unwrap_err();
        assert!(matches!(err, SurveyError::ImageDir { .. }));
    }

    #[test]
    fn listing_filters_extensions_and_sorts_by_name() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.jpg", "a.JPEG", "c.jpeg", "d.JPG", "notes.txt", "e.png"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        let files = list_image_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a.JPEG", "b.jpg", "c.jpeg", "d.JPG"]);
    }

    #[test]
    fn listing_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("nested.jpg"), b"x").unwrap();
        assert!(list_image_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn unreadable_images_contribute_nothing_but_do_not_fail() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.jpg"), b"not a jpeg").unwrap();
        let doc = build_correlation_document(dir.path(), &SurveyConfig::default()).unwrap();
        assert!(doc.entries.is_empty());
    }
}
