//! Raster operations used by the interlacer: crop, resample, composite.
//!
//! All three delegate to `image::imageops` and are deterministic.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::image_pipeline::raster::types::{Dimensions, Region};

/// Background the output canvas starts from.
pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Opaque white canvas of the given size.
pub fn blank_canvas(dims: Dimensions) -> RgbaImage {
    RgbaImage::from_pixel(dims.width, dims.height, BACKGROUND)
}

/// Copies `region` out of `image`.
///
/// The region is clamped to the image bounds.
pub fn crop(image: &RgbaImage, region: Region) -> RgbaImage {
    imageops::crop_imm(image, region.x, region.y, region.width, region.height).to_image()
}

/// Crops `image` to `target` keeping the center.
pub fn center_crop(image: RgbaImage, target: Dimensions) -> RgbaImage {
    let source = Dimensions::of(&image);
    if source == target {
        return image;
    }
    crop(&image, Region::centered(source, target))
}

/// Point-samples (nearest neighbour) `region` of `image` as if it were
/// resized to `target`, producing only the top-left `visible` part.
///
/// Sampling always uses the full `target` ratio; `visible` only limits how
/// much of the result is materialized, so slices that run past the canvas
/// edge cost no more than their on-canvas pixels.
pub fn resample_region(
    image: &RgbaImage,
    region: Region,
    target: Dimensions,
    visible: Dimensions,
) -> RgbaImage {
    let band = crop(image, region);
    let (band_width, band_height) = band.dimensions();
    let width = visible.width.min(target.width);
    let height = visible.height.min(target.height);

    RgbaImage::from_fn(width, height, |x, y| {
        *band.get_pixel(
            nearest(x, target.width, band_width),
            nearest(y, target.height, band_height),
        )
    })
}

/// Source index sampled by output index `out` when `src_len` pixels are
/// stretched to `out_len`.
fn nearest(out: u32, out_len: u32, src_len: u32) -> u32 {
    let src = (2 * out as u128 + 1) * src_len as u128 / (2 * out_len as u128);
    src.min(src_len as u128 - 1) as u32
}

/// Draws `slice` over `canvas` with its top-left corner at `(x, y)`.
///
/// Alpha is blended over what is already on the canvas; anything outside the
/// canvas is clipped.
pub fn composite(canvas: &mut RgbaImage, slice: &RgbaImage, x: i64, y: i64) {
    imageops::overlay(canvas, slice, x, y);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn striped(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]))
    }

    #[test]
    fn test_center_crop_keeps_middle() {
        let cropped = center_crop(striped(10, 6), Dimensions::new(4, 2));
        assert_eq!(cropped.dimensions(), (4, 2));
        assert_eq!(cropped.get_pixel(0, 0).0, [3, 2, 0, 255]);
        assert_eq!(cropped.get_pixel(3, 1).0, [6, 3, 0, 255]);
    }

    #[test]
    fn test_center_crop_same_size_is_noop() {
        let img = striped(5, 5);
        let cropped = center_crop(img.clone(), Dimensions::new(5, 5));
        assert_eq!(cropped, img);
    }

    #[test]
    fn test_resample_region_halves_width() {
        let img = striped(20, 4);
        let region = Region { x: 0, y: 0, width: 20, height: 4 };
        let slice = resample_region(&img, region, Dimensions::new(10, 4), Dimensions::new(10, 4));
        assert_eq!(slice.dimensions(), (10, 4));
        for x in 0..10 {
            let sampled = slice.get_pixel(x, 0).0[0] as u32;
            assert!(sampled >= 2 * x && sampled <= 2 * x + 1);
        }
    }

    #[test]
    fn test_resample_region_reads_from_offset() {
        let img = striped(30, 2);
        let region = Region { x: 20, y: 0, width: 10, height: 2 };
        let slice = resample_region(&img, region, Dimensions::new(10, 2), Dimensions::new(10, 2));
        assert_eq!(slice.get_pixel(0, 0).0[0], 20);
        assert_eq!(slice.get_pixel(9, 1).0[0], 29);
    }

    #[test]
    fn test_resample_region_visible_part_keeps_full_ratio() {
        let img = striped(20, 2);
        let region = Region { x: 0, y: 0, width: 20, height: 2 };
        let full = resample_region(&img, region, Dimensions::new(10, 2), Dimensions::new(10, 2));
        let part = resample_region(&img, region, Dimensions::new(10, 2), Dimensions::new(3, 2));

        assert_eq!(part.dimensions(), (3, 2));
        for x in 0..3 {
            assert_eq!(part.get_pixel(x, 1), full.get_pixel(x, 1));
        }
    }

    #[test]
    fn test_resample_region_huge_target_only_allocates_visible() {
        let img = striped(100, 4);
        let region = Region { x: 0, y: 0, width: 100, height: 4 };
        let slice = resample_region(
            &img,
            region,
            Dimensions::new(200_000_000, 4),
            Dimensions::new(100, 4),
        );

        assert_eq!(slice.dimensions(), (100, 4));
        assert!(slice.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_composite_clips_past_edge() {
        let mut canvas = blank_canvas(Dimensions::new(5, 5));
        let slice = RgbaImage::from_pixel(4, 5, Rgba([0, 0, 0, 255]));
        composite(&mut canvas, &slice, 3, 0);
        assert_eq!(canvas.get_pixel(2, 0), &BACKGROUND);
        assert_eq!(canvas.get_pixel(3, 0).0, [0, 0, 0, 255]);
        assert_eq!(canvas.get_pixel(4, 4).0, [0, 0, 0, 255]);

        composite(&mut canvas, &slice, 10, 0);
        assert_eq!(canvas.get_pixel(0, 0), &BACKGROUND);
    }

    #[test]
    fn test_composite_transparent_shows_background() {
        let mut canvas = blank_canvas(Dimensions::new(2, 2));
        let slice = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        composite(&mut canvas, &slice, 0, 0);
        assert_eq!(canvas.get_pixel(1, 1), &BACKGROUND);
    }
}
