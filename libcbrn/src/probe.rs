//! Image probing: file type sniffing and pixel dimensions.
//!
//! The file type is detected from content, not from the file name. Anything
//! that cannot be identified comes back as [`ProbeResult::NotImage`] rather
//! than an error; only I/O failures are errors.

use crate::error::ProbeError;
use crate::page::Size;
use image::{ImageError, ImageFormat};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    Image { extension: String, size: Size },
    NotImage,
}

pub trait ImageProbe: Sync {
    fn probe(&self, path: &Path) -> Result<ProbeResult, ProbeError>;
}

/// Reads only the image header through the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderProbe;

fn format_extension(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Jpeg => Some("jpg"),
        ImageFormat::Png => Some("png"),
        ImageFormat::Gif => Some("gif"),
        ImageFormat::Bmp => Some("bmp"),
        ImageFormat::WebP => Some("webp"),
        ImageFormat::Tiff => Some("tif"),
        _ => None,
    }
}

impl ImageProbe for HeaderProbe {
    fn probe(&self, path: &Path) -> Result<ProbeResult, ProbeError> {
        let io_error = |source: std::io::Error| ProbeError {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        let reader = image::io::Reader::new(BufReader::new(file))
            .with_guessed_format()
            .map_err(io_error)?;

        let Some(extension) = reader.format().and_then(format_extension) else {
            return Ok(ProbeResult::NotImage);
        };

        match reader.into_dimensions() {
            Ok((width, height)) => {
                let size = Size::new(width, height);
                if size.is_empty() {
                    Ok(ProbeResult::NotImage)
                } else {
                    Ok(ProbeResult::Image {
                        extension: extension.to_string(),
                        size,
                    })
                }
            }
            Err(ImageError::IoError(source)) => Err(io_error(source)),
            Err(_) => Ok(ProbeResult::NotImage),
        }
    }
}
