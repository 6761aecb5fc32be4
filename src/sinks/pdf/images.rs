//! The profile photo.
//!
//! Photos are decoded up front into raw 8-bit RGB (plus an optional alpha
//! plane) so that layout can only start once the image is known to be good.

use image::{DynamicImage, GenericImageView, ImageResult};
use std::path::Path;

/// A decoded photo, ready to be embedded.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfilePhoto {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB triples
    pub rgb: Vec<u8>,
    /// One byte per pixel, only present when the source had transparency
    pub alpha: Option<Vec<u8>>,
}

impl ProfilePhoto {
    /// Load a PNG or JPEG from a path or `file://` URL.
    pub fn load(location: &str) -> ImageResult<ProfilePhoto> {
        let path = location.strip_prefix("file://").unwrap_or(location);
        let image = image::open(Path::new(path))?;
        log::debug!(
            "Loaded photo {} ({}x{})",
            path,
            image.width(),
            image.height()
        );
        Ok(ProfilePhoto::from_image(&image))
    }

    pub fn from_image(image: &DynamicImage) -> ProfilePhoto {
        let (width, height) = image.dimensions();
        let alpha = if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            Some(rgba.pixels().map(|p| p.0[3]).collect())
        } else {
            None
        };
        ProfilePhoto {
            width,
            height,
            rgb: image.to_rgb8().into_raw(),
            alpha,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Size that fits in a `box_size` square without distortion.
    pub fn fit_within(&self, box_size: f32) -> (f32, f32) {
        let aspect_ratio = self.aspect_ratio();
        if aspect_ratio >= 1.0 {
            (box_size, box_size / aspect_ratio)
        } else {
            (box_size * aspect_ratio, box_size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn loads_png_from_file_url() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        let path = dir.path().join("photo.png");
        RgbImage::from_pixel(4, 2, Rgb([10, 20, 30]))
            .save(&path)
            .expect("can write png");

        let photo = ProfilePhoto::load(&format!("file://{}", path.display()))
            .expect("can load photo");
        assert_eq!((photo.width, photo.height), (4, 2));
        assert_eq!(photo.rgb.len(), 4 * 2 * 3);
        assert_eq!(&photo.rgb[..3], &[10, 20, 30]);
        assert!(photo.alpha.is_none());
        assert_eq!(photo.fit_within(84.0), (84.0, 42.0));
    }

    #[test]
    fn keeps_transparency() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 2, Rgba([1, 2, 3, 128])));
        let photo = ProfilePhoto::from_image(&image);
        assert_eq!(photo.alpha, Some(vec![128, 128]));
        assert_eq!(photo.fit_within(84.0), (42.0, 84.0));
    }

    #[test]
    fn missing_or_corrupt_photos_fail() {
        let dir = tempfile::tempdir().expect("can create temp dir");
        assert!(ProfilePhoto::load(&dir.path().join("nope.png").display().to_string()).is_err());

        let path = dir.path().join("bad.jpg");
        std::fs::write(&path, b"not a jpeg").expect("can write file");
        assert!(ProfilePhoto::load(&path.display().to_string()).is_err());
    }
}
