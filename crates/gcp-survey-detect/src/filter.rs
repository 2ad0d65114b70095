//! Confidence-based candidate selection.

use crate::candidate::CandidateShape;
use crate::detector::MarkerDetectorParams;

/// Select up to `params.max_markers` candidates by relaxation search.
///
/// The ellipse-fit tolerance sweeps an ascending range; at every step each
/// candidate is screened for plausible size, for how tightly its hull fills
/// its bounding ellipse, and for overlap with already accepted candidates.
/// The strictest matches win; the tolerance only relaxes while fewer than
/// `max_markers` candidates have been accepted. Returning fewer than
/// `max_markers` is normal for images that show fewer clean markers.
pub fn select_best_markers<'a>(
    candidates: &'a [CandidateShape],
    (width, height): (u32, u32),
    params: &MarkerDetectorParams,
) -> Vec<&'a CandidateShape> {
    let image_area = f64::from(width) * f64::from(height);
    let min_rect_area = image_area / params.min_area_divisor;
    let max_rect_area = image_area / params.max_area_divisor;

    let mut accepted: Vec<&CandidateShape> = Vec::new();

    'relax: for tolerance in 1..=params.relaxation_steps {
        for candidate in candidates {
            let rect_area = candidate.ellipse.rect_area();
            if rect_area <= min_rect_area || rect_area >= max_rect_area {
                continue;
            }

            // A true foreshortened circle fills pi/4 of its bounding
            // rectangle; the residual bound tightens to t/residual_scale.
            let ellipse_area =
                std::f64::consts::PI * candidate.ellipse.width * candidate.ellipse.height / 4.0;
            let residual = (ellipse_area - candidate.hull_area).abs() / candidate.hull_area;
            if residual >= f64::from(tolerance) / params.residual_scale {
                continue;
            }

            // Overlap rejection against everything accepted so far, with the
            // candidate's own bounding-box scale as the exclusion radius.
            let min_spacing = rect_area.sqrt() / 2.0;
            let (cx, cy) = candidate.center_px();
            let overlaps = accepted.iter().any(|other| {
                let (ox, oy) = other.center_px();
                let dx = f64::from(ox - cx);
                let dy = f64::from(oy - cy);
                (dx * dx + dy * dy).sqrt() < min_spacing
            });
            if overlaps {
                continue;
            }

            log::debug!(
                "accepted candidate at ({cx}, {cy}), residual {residual:.4} at tolerance {tolerance}"
            );
            accepted.push(candidate);
            if accepted.len() >= params.max_markers {
                break 'relax;
            }
        }
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::BoundingEllipse;
    use gcp_survey_core::EnclosingCircle;
    use nalgebra::Point2;

    const DIMS: (u32, u32) = (800, 800);

    /// A synthetic candidate whose hull area is derived from the desired
    /// ellipse-fit residual.
    fn candidate(cx: f64, cy: f64, side: f64, residual: f64) -> CandidateShape {
        let ellipse_area = std::f64::consts::PI * side * side / 4.0;
        CandidateShape {
            hull: Vec::new(),
            ellipse: BoundingEllipse {
                center: Point2::new(cx, cy),
                width: side,
                height: side,
                angle_deg: 0.0,
            },
            circle: EnclosingCircle {
                center: Point2::new(cx, cy),
                radius: side / 2.0,
            },
            hull_area: ellipse_area / (1.0 + residual),
        }
    }

    #[test]
    fn never_returns_more_than_max_markers() {
        let candidates: Vec<_> = (0..6)
            .map(|i| candidate(100.0 + 200.0 * f64::from(i), 100.0, 80.0, 0.001))
            .collect();
        let accepted = select_best_markers(&candidates, DIMS, &MarkerDetectorParams::default());
        assert_eq!(accepted.len(), 3);
    }

    #[test]
    fn tighter_fits_are_accepted_before_looser_ones() {
        // The loose candidate comes first in discovery order but only passes
        // at a high tolerance; the tight one must win the first slot.
        let candidates = vec![
            candidate(100.0, 100.0, 80.0, 0.030),
            candidate(400.0, 400.0, 80.0, 0.001),
        ];
        let accepted = select_best_markers(&candidates, DIMS, &MarkerDetectorParams::default());
        assert_eq!(accepted.len(), 2);
        assert_eq!(accepted[0].center_px(), (400, 400));
        assert_eq!(accepted[1].center_px(), (100, 100));
    }

    #[test]
    fn overlapping_candidates_are_rejected() {
        // Second candidate sits within sqrt(w*h)/2 = 40px of the first.
        let candidates = vec![
            candidate(200.0, 200.0, 80.0, 0.001),
            candidate(230.0, 200.0, 80.0, 0.001),
        ];
        let accepted = select_best_markers(&candidates, DIMS, &MarkerDetectorParams::default());
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].center_px(), (200, 200));
    }

    #[test]
    fn accepted_centers_respect_minimum_spacing() {
        let candidates: Vec<_> = (0..5)
            .map(|i| candidate(120.0 + 45.0 * f64::from(i), 300.0, 80.0, 0.001))
            .collect();
        let accepted = select_best_markers(&candidates, DIMS, &MarkerDetectorParams::default());
        for (i, a) in accepted.iter().enumerate() {
            for b in &accepted[i + 1..] {
                let (ax, ay) = a.center_px();
                let (bx, by) = b.center_px();
                let dist = f64::from((ax - bx).pow(2) + (ay - by).pow(2)).sqrt();
                assert!(dist >= a.ellipse.rect_area().sqrt() / 2.0);
            }
        }
    }

    #[test]
    fn size_outliers_never_pass() {
        // 800x800 image: rect area must stay inside (3200, 32000).
        let candidates = vec![
            candidate(100.0, 100.0, 40.0, 0.001), // 1600 px^2, too small
            candidate(400.0, 400.0, 200.0, 0.001), // 40000 px^2, too large
        ];
        let accepted = select_best_markers(&candidates, DIMS, &MarkerDetectorParams::default());
        assert!(accepted.is_empty());
    }

    #[test]
    fn hopeless_fits_exhaust_the_tolerance_range() {
        // Residual 0.08 needs tolerance 160; the range stops at 99.
        let candidates = vec![candidate(200.0, 200.0, 80.0, 0.08)];
        let accepted = select_best_markers(&candidates, DIMS, &MarkerDetectorParams::default());
        assert!(accepted.is_empty());
    }

    #[test]
    fn empty_input_is_fine() {
        let accepted = select_best_markers(&[], DIMS, &MarkerDetectorParams::default());
        assert!(accepted.is_empty());
    }
}
