//! Transient per-image candidate shapes.

use gcp_survey_core::EnclosingCircle;
use nalgebra::Point2;

/// Minimum-area rotated rectangle around a hull, interpreted as the bounding
/// ellipse of a foreshortened circular marker.
#[derive(Clone, Copy, Debug)]
pub struct BoundingEllipse {
    pub center: Point2<f64>,
    /// First side length of the rotated rectangle.
    pub width: f64,
    /// Second side length of the rotated rectangle.
    pub height: f64,
    pub angle_deg: f64,
}

impl BoundingEllipse {
    /// Shorter of the two axes.
    #[inline]
    pub fn minor_axis(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Area of the rotated bounding rectangle.
    #[inline]
    pub fn rect_area(&self) -> f64 {
        self.width * self.height
    }
}

/// One contour that survived the shape screens of the extractor.
///
/// Lives only while its source image is being processed; classification turns
/// the accepted candidates into observations and the rest is dropped.
#[derive(Clone, Debug)]
pub struct CandidateShape {
    /// Convex hull of the source contour, in pixel coordinates.
    pub hull: Vec<Point2<f64>>,
    pub ellipse: BoundingEllipse,
    /// Minimal circle enclosing the hull. Its centre is the reported marker
    /// position.
    pub circle: EnclosingCircle,
    /// Area of the hull polygon.
    pub hull_area: f64,
}

impl CandidateShape {
    /// Marker centre rounded to integer pixel coordinates.
    #[inline]
    pub fn center_px(&self) -> (i32, i32) {
        (
            (self.circle.center.x + 0.5).floor() as i32,
            (self.circle.center.y + 0.5).floor() as i32,
        )
    }
}
