//! Image file loading, saving and output naming

use crate::raster::Image;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for codec operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// The input file does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The decoded image is not 3-channel RGB
    #[error("{}: expected 3 color channels, found {channels}", .path.display())]
    UnsupportedChannels { path: PathBuf, channels: u8 },

    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Decoding or encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Load a 3-channel image from `path`.
///
/// The format is detected from the file contents and extension.
pub fn load(path: &Path) -> Result<Image, CodecError> {
    if !path.exists() {
        return Err(CodecError::NotFound(path.to_path_buf()));
    }

    let decoded = image::open(path)?;
    let channels = decoded.color().channel_count();
    if channels != 3 {
        return Err(CodecError::UnsupportedChannels { path: path.to_path_buf(), channels });
    }

    Ok(Image::from(decoded.to_rgb8()))
}

/// Save `image` to `path`, encoded according to the file extension.
///
/// Parent directories are created as needed.
pub fn save(path: &Path, image: &Image) -> Result<(), CodecError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.to_rgb_image().save(path)?;
    Ok(())
}

/// Path of a comparison output: `<out_dir>/<input stem><scaler name>.png`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use scalecmp::codec::output_path_for;
///
/// let path = output_path_for(Path::new("shots/lena.png"), Path::new("out"), "DDT");
/// assert_eq!(path, Path::new("out/lenaDDT.png"));
/// ```
pub fn output_path_for(input: &Path, out_dir: &Path, scaler_name: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    out_dir.join(format!("{}{}.png", stem, scaler_name))
}
