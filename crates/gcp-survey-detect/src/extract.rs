//! Shape extraction: from a grayscale photograph to candidate marker shapes.

use gcp_survey_core::{min_enclosing_circle, polygon_area, polygon_perimeter};
use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::edges::canny;
use imageproc::filter::box_filter;
use imageproc::geometry::{convex_hull, min_area_rect};
use imageproc::point::Point;
use nalgebra::Point2;

use crate::candidate::{BoundingEllipse, CandidateShape};
use crate::detector::MarkerDetectorParams;
use crate::morphology::{gray_close, gray_open};

/// Extract candidate marker shapes from a grayscale image.
///
/// The markers carry a black outer edge with a white inner ring, so after
/// morphological cleanup their boundaries show up as strong, closed Canny
/// edges. Every contour long enough to be marker-scale whose convex hull has
/// at least five vertices (a foreshortened circle never degenerates below a
/// pentagon) becomes a [`CandidateShape`].
///
/// The Canny threshold adapts to resolution as `edge_gain * (w*h)^(-1/4)`
/// with the hysteresis high bound at three times the low bound.
pub fn detect_candidate_shapes(
    gray: &GrayImage,
    params: &MarkerDetectorParams,
) -> Vec<CandidateShape> {
    let (width, height) = gray.dimensions();
    if width < 3 || height < 3 {
        return Vec::new();
    }

    let cleaned = gray_close(&gray_open(gray, params.open_radius), params.close_radius);

    let pixels = f64::from(width) * f64::from(height);
    let low = params.edge_gain * pixels.powf(-0.25);

    // A light blur keeps single mismatched pixels from breaking edge lines.
    let blurred = box_filter(&cleaned, 1, 1);
    let edges = canny(&blurred, low as f32, (low * 3.0) as f32);

    let min_perimeter = pixels.sqrt() / params.min_perimeter_divisor;
    let mut candidates = Vec::new();

    for contour in find_contours::<i32>(&edges) {
        let outline = to_f64_points(&contour.points);
        if polygon_perimeter(&outline) <= min_perimeter {
            continue;
        }

        let hull_px = convex_hull(contour.points.as_slice());
        if hull_px.len() < params.min_hull_vertices {
            continue;
        }

        let rect = min_area_rect(&hull_px);
        let hull = to_f64_points(&hull_px);
        let hull_area = polygon_area(&hull);
        if hull_area <= 0.0 {
            continue;
        }

        let circle = min_enclosing_circle(&hull);
        candidates.push(CandidateShape {
            ellipse: rect_to_ellipse(&rect),
            circle,
            hull,
            hull_area,
        });
    }

    log::debug!(
        "{}x{} image: {} candidate shape(s), canny low threshold {:.1}",
        width,
        height,
        candidates.len(),
        low
    );
    candidates
}

fn to_f64_points(points: &[Point<i32>]) -> Vec<Point2<f64>> {
    points
        .iter()
        .map(|p| Point2::new(f64::from(p.x), f64::from(p.y)))
        .collect()
}

fn rect_to_ellipse(corners: &[Point<i32>; 4]) -> BoundingEllipse {
    let [p0, p1, p2, _] = corners;
    let side = |a: &Point<i32>, b: &Point<i32>| {
        let dx = f64::from(b.x - a.x);
        let dy = f64::from(b.y - a.y);
        (dx * dx + dy * dy).sqrt()
    };
    let cx = corners.iter().map(|p| f64::from(p.x)).sum::<f64>() / 4.0;
    let cy = corners.iter().map(|p| f64::from(p.y)).sum::<f64>() / 4.0;
    BoundingEllipse {
        center: Point2::new(cx, cy),
        width: side(p0, p1),
        height: side(p1, p2),
        angle_deg: f64::from(p1.y - p0.y)
            .atan2(f64::from(p1.x - p0.x))
            .to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn white_with_dark_disk(size: u32, cx: i32, cy: i32, radius: i32) -> GrayImage {
        let mut img = GrayImage::from_pixel(size, size, Luma([255]));
        imageproc::drawing::draw_filled_circle_mut(&mut img, (cx, cy), radius, Luma([20]));
        img
    }

    #[test]
    fn blank_image_yields_no_candidates() {
        let img = GrayImage::from_pixel(400, 400, Luma([255]));
        assert!(detect_candidate_shapes(&img, &MarkerDetectorParams::default()).is_empty());
    }

    #[test]
    fn dark_disk_is_extracted_with_accurate_geometry() {
        let img = white_with_dark_disk(400, 200, 180, 40);
        let candidates = detect_candidate_shapes(&img, &MarkerDetectorParams::default());
        assert!(!candidates.is_empty());

        let best = candidates
            .iter()
            .min_by(|a, b| {
                let da = (a.circle.center.x - 200.0).abs() + (a.circle.center.y - 180.0).abs();
                let db = (b.circle.center.x - 200.0).abs() + (b.circle.center.y - 180.0).abs();
                da.partial_cmp(&db).unwrap()
            })
            .unwrap();
        let (px, py) = best.center_px();
        assert!((px - 200).abs() <= 2, "center x {px}");
        assert!((py - 180).abs() <= 2, "center y {py}");
        assert!((best.circle.radius - 40.0).abs() <= 3.0);
        // Hull of a disk: area close to pi r^2, near-square bounding rect.
        let expected_area = std::f64::consts::PI * 40.0 * 40.0;
        assert!((best.hull_area - expected_area).abs() / expected_area < 0.1);
        assert!((best.ellipse.width - best.ellipse.height).abs() < 8.0);
    }

    #[test]
    fn noise_scale_blobs_are_rejected() {
        // A 4px blob has a hull but fails the perimeter screen.
        let img = white_with_dark_disk(400, 200, 200, 4);
        assert!(detect_candidate_shapes(&img, &MarkerDetectorParams::default()).is_empty());
    }
}
