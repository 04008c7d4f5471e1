//! Raster data types

use image::RgbaImage;

/// Width and height of a raster, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn of(image: &RgbaImage) -> Self {
        Self::new(image.width(), image.height())
    }

    /// Smallest width and smallest height across all images.
    ///
    /// Returns `None` for an empty iterator.
    pub fn common<I>(all: I) -> Option<Self>
    where
        I: IntoIterator<Item = Dimensions>,
    {
        all.into_iter().reduce(|acc, d| Self {
            width: acc.width.min(d.width),
            height: acc.height.min(d.height),
        })
    }
}

/// Rectangle in source image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Region of size `target` centered inside `source`.
    ///
    /// When the discarded margin is odd the extra pixel is taken from the
    /// right/bottom edge.
    pub fn centered(source: Dimensions, target: Dimensions) -> Self {
        let width = target.width.min(source.width);
        let height = target.height.min(source.height);
        Self {
            x: (source.width - width) / 2,
            y: (source.height - height) / 2,
            width,
            height,
        }
    }
}

/// Direction in which the strips alternate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Full-height strips placed side by side
    #[default]
    Vertical,
    /// Full-width strips stacked top to bottom
    Horizontal,
}

/// Composited output canvas together with its resolution tag
#[derive(Debug, Clone)]
pub struct InterlacedImage {
    pub pixels: RgbaImage,
    /// Pixels per inch, identical on both axes
    pub ppi: u32,
}

impl InterlacedImage {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::of(&self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_takes_minimum_per_axis() {
        let dims = [
            Dimensions::new(100, 100),
            Dimensions::new(90, 120),
            Dimensions::new(110, 95),
        ];
        assert_eq!(Dimensions::common(dims), Some(Dimensions::new(90, 95)));
        assert_eq!(Dimensions::common(Vec::new()), None);
    }

    #[test]
    fn test_centered_region_even_margin() {
        let region = Region::centered(Dimensions::new(110, 95), Dimensions::new(90, 95));
        assert_eq!(region, Region { x: 10, y: 0, width: 90, height: 95 });
    }

    #[test]
    fn test_centered_region_odd_margin_extra_pixel_from_bottom_right() {
        let region = Region::centered(Dimensions::new(11, 8), Dimensions::new(8, 5));
        assert_eq!(region, Region { x: 1, y: 1, width: 8, height: 5 });
    }
}
