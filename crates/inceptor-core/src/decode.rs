/*!
Decoding and resizing source images into [`PixelGrid`]s.
*/

use crate::{
    error::{InceptorError, Result},
    grid::PixelGrid,
};
use image::imageops::{self, FilterType};
use std::path::Path;

/// Load the image at `path`, resize it to exactly `width × height` with a
/// bilinear filter, and convert it to a grid of `0..=255` channel values.
///
/// The format is sniffed from the file contents, so the extension doesn't matter.
///
/// # Errors
///
/// * [`InceptorError::Io`] if the file cannot be opened.
/// * [`InceptorError::Decode`] if the contents aren't a supported image.
pub fn load_grid(path: &Path, width: u32, height: u32) -> Result<PixelGrid> {
    let io_error = |source| InceptorError::Io {
        path: path.to_owned(),
        source,
    };

    let decoded = image::io::Reader::open(path)
        .map_err(io_error)?
        .with_guessed_format()
        .map_err(io_error)?
        .decode()
        .map_err(|source| InceptorError::Decode {
            path: path.to_owned(),
            source,
        })?;

    log::debug!(
        "decoded {:?} ({}x{}), resizing to {}x{}",
        path,
        decoded.width(),
        decoded.height(),
        width,
        height
    );

    let rgb = decoded.to_rgb8();
    let resized = if rgb.dimensions() == (width, height) {
        rgb
    } else {
        imageops::resize(&rgb, width, height, FilterType::Triangle)
    };

    Ok(PixelGrid::from_rgb_image(&resized))
}

#[cfg(test)]
mod tests {
    use super::load_grid;
    use crate::{error::InceptorError, pixel::Pixel};
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn decodes_exact_size_without_resampling() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradient.png");

        let image = RgbImage::from_fn(4, 3, |x, y| Rgb([x as u8 * 10, y as u8 * 20, 7]));
        image.save(&path).unwrap();

        let grid = load_grid(&path, 4, 3).unwrap();
        assert_eq!(grid.dims(), [3, 4]);
        assert_eq!(grid.get(3, 2), Some(Pixel::new(30.0, 40.0, 7.0)));
    }

    #[test]
    fn resizes_to_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.png");
        RgbImage::from_pixel(40, 10, Rgb([90, 60, 30]))
            .save(&path)
            .unwrap();

        let grid = load_grid(&path, 8, 8).unwrap();
        assert_eq!(grid.dims(), [8, 8]);
        assert!(grid
            .pixels()
            .iter()
            .all(|p| *p == Pixel::new(90.0, 60.0, 30.0)));
    }

    #[test]
    fn drops_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translucent.png");
        RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 0]))
            .save(&path)
            .unwrap();

        let grid = load_grid(&path, 2, 2).unwrap();
        assert_eq!(grid.get(0, 0), Some(Pixel::new(10.0, 20.0, 30.0)));
    }

    #[test]
    fn ignores_extension() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("photo.png");
        RgbImage::from_pixel(2, 2, Rgb([1, 2, 3])).save(&png).unwrap();

        let renamed = dir.path().join("photo");
        std::fs::rename(&png, &renamed).unwrap();

        assert!(load_grid(&renamed, 2, 2).is_ok());
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        assert!(matches!(
            load_grid(&path, 2, 2),
            Err(InceptorError::Decode { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_grid(&dir.path().join("nope.jpg"), 2, 2),
            Err(InceptorError::Io { .. })
        ));
    }
}
