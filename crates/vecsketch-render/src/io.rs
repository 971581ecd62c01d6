//! Loading background images and saving rendered frames.

use crate::renderer::{Frame, RenderError, RenderResult};
use image::{DynamicImage, ImageFormat};
use std::path::{Path, PathBuf};
use vecsketch_core::BackgroundImage;

/// File formats a frame can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    /// Format named by the extension of `path`, if it is a supported one.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            _ => None,
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            ExportFormat::Png => ImageFormat::Png,
            ExportFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Decode an image file into a background.
pub fn load_background(path: &Path) -> RenderResult<BackgroundImage> {
    if path.as_os_str().is_empty() {
        return Err(RenderError::EmptyPath);
    }
    let decoded = image::open(path).map_err(|source| RenderError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::info!("Loaded {} ({}x{})", path.display(), width, height);
    Ok(BackgroundImage::new(width, height, rgba.into_raw())?)
}

/// Path a frame will actually be written to: `.png` is appended unless the
/// extension already names a supported format.
pub fn output_path(path: &Path) -> PathBuf {
    if ExportFormat::from_path(path).is_some() {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_owned();
    name.push(".png");
    PathBuf::from(name)
}

/// Encode a frame in memory. JPEG drops the alpha channel.
pub fn encode(frame: &Frame, format: ExportFormat) -> RenderResult<Vec<u8>> {
    let image = DynamicImage::ImageRgba8(frame.to_image());
    let image = match format {
        ExportFormat::Png => image,
        ExportFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
    };
    let mut buffer = std::io::Cursor::new(Vec::new());
    image.write_to(&mut buffer, format.image_format())?;
    Ok(buffer.into_inner())
}

/// Save a frame and return the path it was written to.
pub fn save_frame(frame: &Frame, path: &Path) -> RenderResult<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(RenderError::EmptyPath);
    }
    let target = output_path(path);
    let format = ExportFormat::from_path(&target).unwrap_or(ExportFormat::Png);
    let bytes = encode(frame, format)?;
    std::fs::write(&target, bytes).map_err(|source| RenderError::Io {
        path: target.clone(),
        source,
    })?;
    log::info!("Saved {:?} frame to {}", format, target.display());
    Ok(target)
}
