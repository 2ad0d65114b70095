//! HSV conversion and region-of-interest color statistics.
//!
//! Hue stays far more stable than RGB when a marker falls into shadow or
//! picks up a color cast, so marker identity is decided in HSV space. The
//! conversion follows the OpenCV 8-bit convention: H in `0..180` (degrees
//! halved), S and V in `0..256`.

use image::RgbImage;

/// An RGB image converted to 8-bit HSV triples, row-major.
#[derive(Clone, Debug)]
pub struct HsvImage {
    width: u32,
    height: u32,
    data: Vec<[u8; 3]>,
}

impl HsvImage {
    /// Convert an RGB image to HSV.
    pub fn from_rgb(rgb: &RgbImage) -> Self {
        let (width, height) = rgb.dimensions();
        let data = rgb.pixels().map(|p| rgb_to_hsv(p.0)).collect();
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// HSV triple at (x, y). Panics if out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        debug_assert!(x < self.width && y < self.height);
        self.data[y as usize * self.width as usize + x as usize]
    }
}

/// Convert one RGB pixel to OpenCV-convention HSV.
pub fn rgb_to_hsv([r, g, b]: [u8; 3]) -> [u8; 3] {
    let rf = f32::from(r);
    let gf = f32::from(g);
    let bf = f32::from(b);
    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { 255.0 * delta / max } else { 0.0 };

    let h_deg = if delta <= 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / delta
    } else {
        240.0 + 60.0 * (rf - gf) / delta
    };
    let h_deg = if h_deg < 0.0 { h_deg + 360.0 } else { h_deg };

    [
        ((h_deg / 2.0).round() as u32 % 180) as u8,
        (s.round() as u32).min(255) as u8,
        (v.round() as u32).min(255) as u8,
    ]
}

/// Per-channel mean and population standard deviation of an HSV region.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RoiStats {
    pub hue_mean: f64,
    pub hue_std_dev: f64,
    pub saturation_mean: f64,
    pub saturation_std_dev: f64,
    pub value_mean: f64,
    pub value_std_dev: f64,
}

/// Statistics of the square region with half side `half_side` centred at
/// `(cx, cy)`, clamped to the image bounds.
///
/// An empty region (centre far outside the image, or a zero half side)
/// yields all-zero statistics.
pub fn roi_stats(hsv: &HsvImage, (cx, cy): (i32, i32), half_side: f64) -> RoiStats {
    let x1 = (f64::from(cx) - half_side + 0.5) as i64;
    let x2 = (f64::from(cx) + half_side + 0.5) as i64;
    let y1 = (f64::from(cy) - half_side + 0.5) as i64;
    let y2 = (f64::from(cy) + half_side + 0.5) as i64;

    let x1 = x1.clamp(0, i64::from(hsv.width())) as u32;
    let x2 = x2.clamp(0, i64::from(hsv.width())) as u32;
    let y1 = y1.clamp(0, i64::from(hsv.height())) as u32;
    let y2 = y2.clamp(0, i64::from(hsv.height())) as u32;

    let mut count = 0u64;
    let mut sum = [0.0f64; 3];
    let mut sum_sq = [0.0f64; 3];
    for y in y1..y2 {
        for x in x1..x2 {
            let px = hsv.get(x, y);
            for c in 0..3 {
                let v = f64::from(px[c]);
                sum[c] += v;
                sum_sq[c] += v * v;
            }
            count += 1;
        }
    }
    if count == 0 {
        return RoiStats::default();
    }

    let n = count as f64;
    let mean = [sum[0] / n, sum[1] / n, sum[2] / n];
    let std_dev = |c: usize| (sum_sq[c] / n - mean[c] * mean[c]).max(0.0).sqrt();
    RoiStats {
        hue_mean: mean[0],
        hue_std_dev: std_dev(0),
        saturation_mean: mean[1],
        saturation_std_dev: std_dev(1),
        value_mean: mean[2],
        value_std_dev: std_dev(2),
    }
}
