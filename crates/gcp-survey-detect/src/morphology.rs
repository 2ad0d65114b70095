//! Grayscale morphology with small elliptical structuring elements.
//!
//! Opening suppresses bright speckle in the background, closing fills dark
//! speckle inside the foreground. Border pixels are treated as replicated.

use image::GrayImage;

/// Offsets of an elliptical structuring element with the given radius.
fn ellipse_offsets(radius: u32) -> Vec<(i32, i32)> {
    let r = radius as i32;
    let axis = f64::from(radius) + 0.5;
    let mut offsets = Vec::new();
    for dy in -r..=r {
        for dx in -r..=r {
            let nx = f64::from(dx) / axis;
            let ny = f64::from(dy) / axis;
            if nx * nx + ny * ny <= 1.0 {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

fn apply<F>(img: &GrayImage, offsets: &[(i32, i32)], pick: F) -> GrayImage
where
    F: Fn(u8, u8) -> u8,
{
    let (width, height) = img.dimensions();
    let mut out = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let mut acc = img.get_pixel(x, y)[0];
            for &(dx, dy) in offsets {
                let sx = (x as i32 + dx).clamp(0, width as i32 - 1) as u32;
                let sy = (y as i32 + dy).clamp(0, height as i32 - 1) as u32;
                acc = pick(acc, img.get_pixel(sx, sy)[0]);
            }
            out.put_pixel(x, y, image::Luma([acc]));
        }
    }
    out
}

fn erode(img: &GrayImage, offsets: &[(i32, i32)]) -> GrayImage {
    apply(img, offsets, u8::min)
}

fn dilate(img: &GrayImage, offsets: &[(i32, i32)]) -> GrayImage {
    apply(img, offsets, u8::max)
}

/// Morphological opening (erode then dilate) with an elliptical element.
pub fn gray_open(img: &GrayImage, radius: u32) -> GrayImage {
    let offsets = ellipse_offsets(radius);
    dilate(&erode(img, &offsets), &offsets)
}

/// Morphological closing (dilate then erode) with an elliptical element.
pub fn gray_close(img: &GrayImage, radius: u32) -> GrayImage {
    let offsets = ellipse_offsets(radius);
    erode(&dilate(img, &offsets), &offsets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn radius_one_element_is_a_diamond() {
        let mut offsets = ellipse_offsets(1);
        offsets.sort_unstable();
        assert_eq!(offsets, vec![(-1, 0), (0, -1), (0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn opening_removes_isolated_bright_pixel() {
        let mut img = GrayImage::from_pixel(9, 9, Luma([0]));
        img.put_pixel(4, 4, Luma([255]));
        let opened = gray_open(&img, 1);
        assert_eq!(opened.get_pixel(4, 4)[0], 0);
    }

    #[test]
    fn closing_fills_isolated_dark_pixel() {
        let mut img = GrayImage::from_pixel(9, 9, Luma([200]));
        img.put_pixel(4, 4, Luma([0]));
        let closed = gray_close(&img, 1);
        assert_eq!(closed.get_pixel(4, 4)[0], 200);
    }

    #[test]
    fn opening_preserves_large_structures() {
        // A 5x5 bright block survives a radius-1 opening intact.
        let mut img = GrayImage::from_pixel(11, 11, Luma([0]));
        for y in 3..8 {
            for x in 3..8 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        let opened = gray_open(&img, 1);
        assert_eq!(opened.get_pixel(5, 5)[0], 255);
        assert_eq!(opened.get_pixel(4, 4)[0], 255);
    }
}
