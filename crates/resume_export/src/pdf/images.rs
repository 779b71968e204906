//! PDF Image Handling
//!
//! Turns decoded image bytes into image XObjects:
//! - JPEG is passed through untouched under DCTDecode
//! - Any other format the `image` crate reads is expanded to 8-bit RGB and
//!   Flate compressed, with its alpha channel split into a soft mask

use super::objects::{PdfDictionary, PdfObject, PdfStream};
use crate::image_codec::{jpeg_frame, ImageFormat};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{self, Write};
use thiserror::Error;

/// Error type for image embedding
#[derive(Debug, Error)]
pub enum ImageEmbedError {
    #[error("Unreadable JPEG header")]
    InvalidJpeg,

    #[error("Unsupported JPEG component count: {0}")]
    UnsupportedComponents(u8),

    #[error("Unsupported JPEG sample precision: {0} bits")]
    UnsupportedPrecision(u8),

    #[error("Image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has zero width or height")]
    Empty,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Color space for images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceGray,
    DeviceRGB,
    DeviceCMYK,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceCMYK => "DeviceCMYK",
        }
    }
}

/// Image ready for embedding
#[derive(Debug, Clone)]
pub struct PdfImage {
    pub width: u32,
    pub height: u32,
    pub color_space: ColorSpace,
    /// Filter the data is already encoded with
    pub filter: &'static str,
    pub data: Vec<u8>,
    /// Flate-compressed 8-bit alpha channel
    pub soft_mask: Option<Vec<u8>>,
    /// Adobe CMYK JPEGs store inverted components
    invert_cmyk: bool,
}

impl PdfImage {
    /// Prepare raw image bytes for embedding.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ImageEmbedError> {
        match ImageFormat::from_bytes(data) {
            ImageFormat::Jpeg => Self::from_jpeg(data),
            _ => Self::from_raster(data),
        }
    }

    fn from_jpeg(data: &[u8]) -> Result<Self, ImageEmbedError> {
        let frame = jpeg_frame(data).ok_or(ImageEmbedError::InvalidJpeg)?;
        if frame.width == 0 || frame.height == 0 {
            return Err(ImageEmbedError::Empty);
        }
        let color_space = match frame.components {
            1 => ColorSpace::DeviceGray,
            3 => ColorSpace::DeviceRGB,
            4 => ColorSpace::DeviceCMYK,
            n => return Err(ImageEmbedError::UnsupportedComponents(n)),
        };
        // DCTDecode only carries 8-bit samples
        if frame.precision != 8 {
            return Err(ImageEmbedError::UnsupportedPrecision(frame.precision));
        }

        Ok(Self {
            width: frame.width,
            height: frame.height,
            color_space,
            filter: "DCTDecode",
            data: data.to_vec(),
            soft_mask: None,
            invert_cmyk: color_space == ColorSpace::DeviceCMYK && frame.adobe,
        })
    }

    fn from_raster(data: &[u8]) -> Result<Self, ImageEmbedError> {
        let decoded = image::load_from_memory(data)?;
        let (width, height) = (decoded.width(), decoded.height());
        if width == 0 || height == 0 {
            return Err(ImageEmbedError::Empty);
        }

        let soft_mask = if decoded.color().has_alpha() {
            let alpha: Vec<u8> = decoded.to_rgba8().pixels().map(|p| p.0[3]).collect();
            // Fully opaque masks are dropped
            if alpha.iter().all(|&a| a == u8::MAX) {
                None
            } else {
                Some(deflate(&alpha)?)
            }
        } else {
            None
        };

        let rgb = decoded.to_rgb8();
        Ok(Self {
            width,
            height,
            color_space: ColorSpace::DeviceRGB,
            filter: "FlateDecode",
            data: deflate(rgb.as_raw())?,
            soft_mask,
            invert_cmyk: false,
        })
    }

    /// Image XObject stream, linking the soft mask object when present
    pub fn to_xobject(&self, soft_mask_ref: Option<u32>) -> PdfStream {
        let mut dict = image_dict(self.width, self.height, self.color_space, self.filter);
        if self.invert_cmyk {
            dict.insert(
                "Decode",
                PdfObject::Array([1i64, 0, 1, 0, 1, 0, 1, 0].map(PdfObject::Integer).to_vec()),
            );
        }
        if let Some(mask_ref) = soft_mask_ref {
            dict.insert("SMask", PdfObject::Reference(mask_ref));
        }
        PdfStream::encoded(dict, self.data.clone())
    }

    /// Soft mask XObject stream
    pub fn soft_mask_xobject(&self) -> Option<PdfStream> {
        self.soft_mask.as_ref().map(|mask| {
            let dict = image_dict(self.width, self.height, ColorSpace::DeviceGray, "FlateDecode");
            PdfStream::encoded(dict, mask.clone())
        })
    }
}

fn image_dict(width: u32, height: u32, color_space: ColorSpace, filter: &str) -> PdfDictionary {
    let mut dict = PdfDictionary::typed("XObject");
    dict.insert("Subtype", PdfObject::name("Image"));
    dict.insert("Width", width);
    dict.insert("Height", height);
    dict.insert("BitsPerComponent", 8i64);
    dict.insert("ColorSpace", PdfObject::name(color_space.pdf_name()));
    dict.insert("Filter", PdfObject::name(filter));
    dict
}

fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
