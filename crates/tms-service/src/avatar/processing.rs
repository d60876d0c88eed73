//! Validation and normalization of uploaded avatar images.
//!
//! Everything here is synchronous and CPU-bound; callers run it on the
//! blocking pool.

use std::io::{BufRead, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

use chrono::{DateTime, Utc};
use image::{DynamicImage, ImageFormat, ImageReader, Limits};

use tms_core::error::{AppError, ErrorKind};

/// Largest width or height accepted when decoding.
const MAX_DIMENSION: u32 = 8192;

/// Upper bound on decoder allocations.
const MAX_DECODE_ALLOC: u64 = 256 * 1024 * 1024;

/// Image formats accepted as avatars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarFormat {
    /// JPEG.
    Jpeg,
    /// PNG.
    Png,
}

impl AvatarFormat {
    /// Maps a sniffed format onto an accepted avatar format.
    pub fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Png => Some(Self::Png),
            _ => None,
        }
    }

    /// The `image` crate format.
    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
        }
    }

    /// Canonical file extension, without the dot.
    pub fn canonical_extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    /// Picks the extension for a stored file: the client's own extension
    /// when it names this format, the canonical one otherwise.
    pub fn extension_for(self, original_name: Option<&str>) -> String {
        original_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .filter(|ext| ImageFormat::from_extension(ext) == Some(self.image_format()))
            .unwrap_or_else(|| self.canonical_extension().to_string())
    }
}

/// A validated, re-encoded avatar ready to be stored.
#[derive(Debug, Clone)]
pub struct ProcessedAvatar {
    /// Detected format.
    pub format: AvatarFormat,
    /// Extension to store the file under.
    pub extension: String,
    /// Re-encoded image bytes.
    pub data: Vec<u8>,
}

/// Measures a stream by seeking to its end, then rewinds it to the start.
pub fn probe_size<R: Read + Seek>(reader: &mut R) -> std::io::Result<u64> {
    let size = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(0))?;
    Ok(size)
}

/// Rejects uploads larger than `max_bytes`. A file of exactly `max_bytes`
/// is accepted.
pub fn check_size(size: u64, max_bytes: u64) -> Result<(), AppError> {
    if size > max_bytes {
        return Err(AppError::validation(format!(
            "image must be {} or smaller",
            human_size(max_bytes)
        )));
    }
    Ok(())
}

/// Decodes an image while detecting its format from the content.
pub fn decode<R: BufRead + Seek>(reader: R) -> Result<(DynamicImage, ImageFormat), AppError> {
    let mut reader = ImageReader::new(reader)
        .with_guessed_format()
        .map_err(|e| AppError::with_source(ErrorKind::Validation, "Failed to read image", e))?;

    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_DIMENSION);
    limits.max_image_height = Some(MAX_DIMENSION);
    limits.max_alloc = Some(MAX_DECODE_ALLOC);
    reader.limits(limits);

    let format = reader.format();
    let img = reader.decode().map_err(|e| {
        AppError::with_source(ErrorKind::Validation, format!("Invalid image: {e}"), e)
    })?;

    // A successful decode always has a known format.
    let format = format.ok_or_else(|| AppError::validation("Unrecognized image format"))?;
    Ok((img, format))
}

/// Re-encodes a decoded image, dropping everything but the pixels.
pub fn encode(img: &DynamicImage, format: AvatarFormat) -> Result<Vec<u8>, AppError> {
    let mut out = Cursor::new(Vec::new());
    let result = match format {
        // JPEG has no alpha channel.
        AvatarFormat::Jpeg => {
            DynamicImage::ImageRgb8(img.to_rgb8()).write_to(&mut out, ImageFormat::Jpeg)
        }
        AvatarFormat::Png => img.write_to(&mut out, ImageFormat::Png),
    };
    result.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, "Error encoding image", e)
    })?;
    Ok(out.into_inner())
}

/// Runs every gate on an uploaded stream: size, decode, format, re-encode.
pub fn process<R: BufRead + Seek>(
    mut reader: R,
    max_bytes: u64,
    original_name: Option<&str>,
) -> Result<ProcessedAvatar, AppError> {
    let size = probe_size(&mut reader)
        .map_err(|e| AppError::with_source(ErrorKind::Validation, "Unreadable upload", e))?;
    check_size(size, max_bytes)?;

    let (img, detected) = decode(reader)?;

    let format = AvatarFormat::from_image_format(detected).ok_or_else(|| {
        AppError::validation(format!(
            "Only JPEG and PNG images are supported (got {})",
            detected.extensions_str().first().copied().unwrap_or("unknown")
        ))
    })?;

    let data = encode(&img, format)?;

    Ok(ProcessedAvatar {
        format,
        extension: format.extension_for(original_name),
        data,
    })
}

/// Builds `{user_id}{YYYYMMDDHHMMSS}.{extension}`.
///
/// A second upload within the same second would reuse the name of the
/// file currently in use, so `{user_id}{YYYYMMDDHHMMSS}-{n}.{extension}`
/// is chosen instead whenever the plain name equals `current`.
pub fn generate_filename(
    user_id: i64,
    now: DateTime<Utc>,
    extension: &str,
    current: Option<&str>,
) -> String {
    let stamp = now.format("%Y%m%d%H%M%S");
    let mut name = format!("{user_id}{stamp}.{extension}");
    let mut n = 1u32;
    while current == Some(name.as_str()) {
        name = format!("{user_id}{stamp}-{n}.{extension}");
        n += 1;
    }
    name
}

fn human_size(bytes: u64) -> String {
    const MIB: u64 = 1024 * 1024;
    const KIB: u64 = 1024;
    if bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}
