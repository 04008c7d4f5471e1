//! Band arithmetic for interlacing.
//!
//! The interlace axis is walked in bands of `num_images * thickness` pixels.
//! Inside each band every source contributes one slice: its own copy of the
//! whole band, squeezed down to `thickness` pixels and placed at
//! `band_start + index * thickness`.
//!
//! The last band may be shorter than a full step. It is still squeezed to
//! `thickness`, so it is compressed by a smaller ratio than the full bands
//! and its trailing slices may fall partly or wholly past the canvas edge.
//! Slices starting past the edge are not planned at all, and the rest only
//! keep their on-canvas part in `visible`.

use crate::image_pipeline::raster::types::{Axis, Dimensions, Region};

/// Where one slice comes from and where it lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlicePlacement {
    /// Index of the source image
    pub source_index: usize,
    /// Band extracted from the (cropped) source
    pub region: Region,
    /// Size the band is resampled to
    pub target: Dimensions,
    /// Part of `target`, from its top-left corner, that lands on the canvas
    pub visible: Dimensions,
    /// Top-left corner on the output canvas
    pub offset: (i64, i64),
}

/// Distance between consecutive band starts.
pub fn band_step(num_images: usize, thickness: u32) -> u64 {
    num_images as u64 * thickness as u64
}

/// Every slice of an interlacing run, band by band, source by source.
///
/// Returns nothing when there are no images or the thickness is zero.
pub fn plan_slices(
    dims: Dimensions,
    axis: Axis,
    num_images: usize,
    thickness: u32,
) -> Vec<SlicePlacement> {
    let step = band_step(num_images, thickness);
    if step == 0 {
        return Vec::new();
    }

    let length = match axis {
        Axis::Vertical => dims.width as u64,
        Axis::Horizontal => dims.height as u64,
    };

    let mut placements = Vec::new();
    let mut start = 0u64;
    while start < length {
        // start < length <= u32::MAX, so both fit in u32
        let band_extent = step.min(length - start) as u32;
        let band_start = start as u32;

        for index in 0..num_images {
            let along = start + index as u64 * thickness as u64;
            if along >= length {
                break;
            }
            // along < length <= u32::MAX
            let visible_extent = (thickness as u64).min(length - along) as u32;
            let along = along as i64;
            let placement = match axis {
                Axis::Vertical => SlicePlacement {
                    source_index: index,
                    region: Region {
                        x: band_start,
                        y: 0,
                        width: band_extent,
                        height: dims.height,
                    },
                    target: Dimensions::new(thickness, dims.height),
                    visible: Dimensions::new(visible_extent, dims.height),
                    offset: (along, 0),
                },
                Axis::Horizontal => SlicePlacement {
                    source_index: index,
                    region: Region {
                        x: 0,
                        y: band_start,
                        width: dims.width,
                        height: band_extent,
                    },
                    target: Dimensions::new(dims.width, thickness),
                    visible: Dimensions::new(dims.width, visible_extent),
                    offset: (0, along),
                },
            };
            placements.push(placement);
        }

        start += step;
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_images_vertical_full_bands() {
        let plan = plan_slices(Dimensions::new(100, 100), Axis::Vertical, 2, 10);
        assert_eq!(plan.len(), 10);

        let offsets: Vec<i64> = plan.iter().map(|p| p.offset.0).collect();
        assert_eq!(offsets, (0..10).map(|i| i * 10).collect::<Vec<_>>());

        for (i, p) in plan.iter().enumerate() {
            assert_eq!(p.source_index, i % 2);
            assert_eq!(p.region.width, 20);
            assert_eq!(p.region.height, 100);
            assert_eq!(p.region.x, (i as u32 / 2) * 20);
            assert_eq!(p.target, Dimensions::new(10, 100));
            assert_eq!(p.visible, p.target);
            assert_eq!(p.offset.1, 0);
        }
    }

    #[test]
    fn test_full_band_covers_exactly_one_step() {
        let plan = plan_slices(Dimensions::new(95, 40), Axis::Vertical, 3, 5);
        let step = band_step(3, 5) as i64;
        for band in plan.chunks(3).filter(|b| b[0].region.width as i64 == step) {
            let covered: i64 = band.iter().map(|p| p.target.width as i64).sum();
            assert_eq!(covered, step);
            assert_eq!(band[2].offset.0 + 5 - band[0].offset.0, step);
        }
    }

    #[test]
    fn test_final_partial_band_is_still_squeezed_to_thickness() {
        let plan = plan_slices(Dimensions::new(95, 10), Axis::Vertical, 2, 10);
        let last_band = &plan[plan.len() - 2..];
        for p in last_band {
            assert_eq!(p.region.x, 80);
            assert_eq!(p.region.width, 15);
            assert_eq!(p.target.width, 10);
        }
        assert_eq!(last_band[1].offset.0, 90);
        assert_eq!(last_band[0].visible.width, 10);
        assert_eq!(last_band[1].visible.width, 5);
    }

    #[test]
    fn test_slice_larger_than_image() {
        let plan = plan_slices(Dimensions::new(5, 5), Axis::Vertical, 2, 10);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].region.width, 5);
        assert_eq!(plan[0].target.width, 10);
        assert_eq!(plan[0].visible.width, 5);
    }

    #[test]
    fn test_huge_thickness_plans_only_on_canvas_slices() {
        let plan = plan_slices(Dimensions::new(100, 100), Axis::Horizontal, 2, 200_000_000);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].source_index, 0);
        assert_eq!(plan[0].region.height, 100);
        assert_eq!(plan[0].target, Dimensions::new(100, 200_000_000));
        assert_eq!(plan[0].visible, Dimensions::new(100, 100));
    }

    #[test]
    fn test_trailing_slices_past_edge_are_dropped() {
        let plan = plan_slices(Dimensions::new(85, 10), Axis::Vertical, 2, 10);
        let last = plan.last().unwrap();
        assert_eq!(last.offset.0, 80);
        assert_eq!(last.source_index, 0);
        assert_eq!(last.visible.width, 5);
        assert!(plan.iter().all(|p| p.offset.0 < 85));
    }

    #[test]
    fn test_horizontal_bands_are_rows() {
        let plan = plan_slices(Dimensions::new(30, 50), Axis::Horizontal, 2, 10);
        assert_eq!(plan.len(), 6);
        for (i, p) in plan.iter().enumerate() {
            assert_eq!(p.region.x, 0);
            assert_eq!(p.region.width, 30);
            assert_eq!(p.target, Dimensions::new(30, 10));
            assert_eq!(p.offset, (0, i as i64 * 10));
        }
        assert_eq!(plan[4].region.y, 40);
        assert_eq!(plan[4].region.height, 10);
    }

    #[test]
    fn test_degenerate_inputs_plan_nothing() {
        assert!(plan_slices(Dimensions::new(10, 10), Axis::Vertical, 2, 0).is_empty());
        assert!(plan_slices(Dimensions::new(10, 10), Axis::Vertical, 0, 5).is_empty());
    }
}
