//! Data-URI image codec
//!
//! Images travel between the upload endpoint and the renderers as
//! `data:<mime>;base64,<payload>` strings. This module turns them back into
//! raw bytes and sniffs enough of the header to pick an embedding strategy.
//! It does not validate image content; a renderer that fails to embed the
//! decoded bytes handles that failure per image.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageDecodeError {
    #[error("Data URI has no ',' separator")]
    MissingSeparator,

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),

    #[error("Data URI payload is empty")]
    Empty,
}

pub type Result<T> = std::result::Result<T, ImageDecodeError>;

/// Raster formats recognised by magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
    Unknown,
}

impl ImageFormat {
    /// Detect format from magic bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        if data.starts_with(&[0x89, b'P', b'N', b'G']) {
            Self::Png
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Self::Jpeg
        } else if data.starts_with(b"GIF8") {
            Self::Gif
        } else if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            Self::WebP
        } else if data.starts_with(b"BM") {
            Self::Bmp
        } else {
            Self::Unknown
        }
    }

    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Self::Png,
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Self::Jpeg,
            "image/gif" => Self::Gif,
            "image/webp" => Self::WebP,
            "image/bmp" | "image/x-ms-bmp" => Self::Bmp,
            _ => Self::Unknown,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
            Self::Bmp => "image/bmp",
            Self::Unknown => "application/octet-stream",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::WebP => "webp",
            Self::Bmp => "bmp",
            Self::Unknown => "bin",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// A decoded data URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// MIME type declared in the header, when the header is well formed
    pub mime: Option<String>,
    pub data: Vec<u8>,
}

impl DataUri {
    /// Format sniffed from the bytes, falling back to the declared MIME type
    pub fn format(&self) -> ImageFormat {
        match ImageFormat::from_bytes(&self.data) {
            ImageFormat::Unknown => self
                .mime
                .as_deref()
                .map(ImageFormat::from_mime)
                .unwrap_or(ImageFormat::Unknown),
            known => known,
        }
    }
}

/// Split a data URI at its first comma and decode the base64 payload.
pub fn parse_data_uri(input: &str) -> Result<DataUri> {
    let (header, payload) = input
        .split_once(',')
        .ok_or(ImageDecodeError::MissingSeparator)?;

    let cleaned: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Err(ImageDecodeError::Empty);
    }

    let data = STANDARD
        .decode(cleaned.as_bytes())
        .map_err(|e| ImageDecodeError::InvalidBase64(e.to_string()))?;
    if data.is_empty() {
        return Err(ImageDecodeError::Empty);
    }

    Ok(DataUri {
        mime: header_mime(header),
        data,
    })
}

/// Decode a data URI into raw bytes
pub fn decode_data_uri(input: &str) -> Result<Vec<u8>> {
    parse_data_uri(input).map(|uri| uri.data)
}

/// Build a `data:<mime>;base64,<payload>` string
pub fn encode_data_uri(mime: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(data))
}

fn header_mime(header: &str) -> Option<String> {
    let rest = header.trim().strip_prefix("data:")?;
    let mime = rest.split(';').next()?.trim();
    if mime.is_empty() {
        None
    } else {
        Some(mime.to_ascii_lowercase())
    }
}

/// Pixel dimensions read from the image header, when the format is known
pub fn image_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    let dims = match ImageFormat::from_bytes(data) {
        ImageFormat::Png => png_dimensions(data),
        ImageFormat::Jpeg => jpeg_frame(data).map(|f| (f.width, f.height)),
        ImageFormat::Gif => gif_dimensions(data),
        ImageFormat::Bmp => bmp_dimensions(data),
        ImageFormat::WebP | ImageFormat::Unknown => None,
    }?;
    (dims.0 > 0 && dims.1 > 0).then_some(dims)
}

/// Frame header fields of a baseline or progressive JPEG
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegFrame {
    pub width: u32,
    pub height: u32,
    pub components: u8,
    /// Sample precision in bits
    pub precision: u8,
    /// An Adobe APP14 segment precedes the frame header
    pub adobe: bool,
}

/// Walk JPEG markers until the first SOFn segment.
pub fn jpeg_frame(data: &[u8]) -> Option<JpegFrame> {
    let mut adobe = false;
    let mut i = 2;
    while i + 9 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        match marker {
            // Fill bytes and standalone markers carry no length
            0xFF => i += 1,
            0x01 | 0xD0..=0xD7 => i += 2,
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
                let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
                return Some(JpegFrame {
                    width,
                    height,
                    components: data[i + 9],
                    precision: data[i + 4],
                    adobe,
                });
            }
            _ => {
                if marker == 0xEE && data.get(i + 4..i + 9) == Some(b"Adobe".as_slice()) {
                    adobe = true;
                }
                let length = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
                if length < 2 {
                    return None;
                }
                i += 2 + length;
            }
        }
    }
    None
}

fn png_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    // IHDR is always the first chunk: width at 16, height at 20
    let ihdr = data.get(16..24)?;
    Some((
        u32::from_be_bytes([ihdr[0], ihdr[1], ihdr[2], ihdr[3]]),
        u32::from_be_bytes([ihdr[4], ihdr[5], ihdr[6], ihdr[7]]),
    ))
}

fn gif_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    let screen = data.get(6..10)?;
    Some((
        u16::from_le_bytes([screen[0], screen[1]]) as u32,
        u16::from_le_bytes([screen[2], screen[3]]) as u32,
    ))
}

fn bmp_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    let header = data.get(18..26)?;
    let width = i32::from_le_bytes([header[0], header[1], header[2], header[3]]);
    // Negative height marks a top-down bitmap
    let height = i32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    Some((width.unsigned_abs(), height.unsigned_abs()))
}
