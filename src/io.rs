use std::path::Path;

use thiserror::Error;

use crate::buffer::PixelBuffer;

/// Errors that can occur while reading or writing image files
#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("Failed to decode or encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to access image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image has no pixels")]
    Empty,

    #[error("Pixel data does not match a {width}x{height} image")]
    InvalidDimensions { width: u32, height: u32 },
}

pub type ImageIoResult<T> = Result<T, ImageIoError>;

/// Extensions offered for opening, in the order tried by the file picker
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "bmp", "jpg", "jpeg", "tga"];

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Decodes an image file of any supported format into a buffer
pub fn load_image(path: &Path) -> ImageIoResult<PixelBuffer> {
    let decoded = image::open(path)?;
    log::info!(
        "Loaded {} ({}x{})",
        path.display(),
        decoded.width(),
        decoded.height()
    );
    into_buffer(decoded)
}

/// Decodes image bytes, guessing the format from their content
pub fn load_image_from_memory(bytes: &[u8]) -> ImageIoResult<PixelBuffer> {
    into_buffer(image::load_from_memory(bytes)?)
}

fn into_buffer(decoded: image::DynamicImage) -> ImageIoResult<PixelBuffer> {
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(ImageIoError::Empty);
    }
    Ok(PixelBuffer::from_rgba_image(decoded.to_rgba8()))
}

/// Encodes the buffer, picking the format from the file extension.
/// Formats without alpha drop it.
pub fn save_image(buffer: &PixelBuffer, path: &Path) -> ImageIoResult<()> {
    let rgba = buffer
        .to_rgba_image()
        .ok_or(ImageIoError::InvalidDimensions {
            width: buffer.width(),
            height: buffer.height(),
        })?;
    let format = image::ImageFormat::from_path(path)?;
    match format {
        image::ImageFormat::Jpeg | image::ImageFormat::Bmp => {
            image::DynamicImage::ImageRgba8(rgba)
                .to_rgb8()
                .save_with_format(path, format)?;
        }
        _ => rgba.save_with_format(path, format)?,
    }
    log::info!("Saved {}x{} image to {}", buffer.width(), buffer.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::Point;

    #[test]
    fn test_png_save_and_load_keeps_pixels() {
        let mut buffer = PixelBuffer::new(3, 2, Color::WHITE);
        buffer.set(Point::new(1, 1), Color::RED.with_alpha(128)).unwrap();
        let path = std::env::temp_dir().join("pixel_paint_io_test.png");
        save_image(&buffer, &path).unwrap();
        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.as_raw(), buffer.as_raw());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported(Path::new("picture.PNG")));
        assert!(is_supported(Path::new("dir/scan.tga")));
        assert!(!is_supported(Path::new("notes.txt")));
        assert!(!is_supported(Path::new("no_extension")));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(matches!(
            load_image_from_memory(b"definitely not an image"),
            Err(ImageIoError::Image(_))
        ));
    }
}
