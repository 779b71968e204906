//! Media file writing for DOCX export
//!
//! Images are stored under `word/media/` and referenced from the document
//! through relationships.

use super::blocks::ImageBlock;
use super::content_types::ContentTypes;
use super::error::DocxResult;
use super::relationship_types;
use super::relationships::Relationships;
use quick_xml::escape::escape;
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// One packed media part
#[derive(Debug, Clone)]
struct MediaPart {
    path: String,
    data: Vec<u8>,
}

/// Collects images for `word/media/`
#[derive(Debug, Default)]
pub struct MediaWriter {
    parts: Vec<MediaPart>,
}

impl MediaWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image and return the relationship ID the drawing uses
    pub fn add(
        &mut self,
        image: &ImageBlock,
        rels: &mut Relationships,
        content_types: &mut ContentTypes,
    ) -> String {
        let ext = image.format.extension();
        let filename = format!("image{}.{}", self.parts.len() + 1, ext);
        let rel_id = rels.add(relationship_types::IMAGE, &format!("media/{}", filename));
        content_types.add_default(ext, image.format.mime_type());

        self.parts.push(MediaPart {
            path: format!("word/media/{}", filename),
            data: image.data.clone(),
        });
        rel_id
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Write every media part to the archive
    pub fn write_media<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        options: SimpleFileOptions,
    ) -> DocxResult<()> {
        for part in &self.parts {
            zip.start_file(part.path.as_str(), options)?;
            zip.write_all(&part.data)?;
        }
        Ok(())
    }
}

/// Generate the inline drawing XML for an image run.
///
/// `doc_pr_id` must be unique within the document.
pub fn generate_inline_drawing(
    rel_id: &str,
    doc_pr_id: u32,
    width_emu: i64,
    height_emu: i64,
    name: &str,
) -> String {
    let name = escape(name);

    format!(
        r#"<w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{w}" cy="{h}"/><wp:effectExtent l="0" t="0" r="0" b="0"/><wp:docPr id="{id}" name="{name}" descr="{name}"/><wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic><pic:nvPicPr><pic:cNvPr id="{id}" name="{name}"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip r:embed="{rel_id}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill><pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{w}" cy="{h}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing>"#,
        w = width_emu,
        h = height_emu,
        id = doc_pr_id,
        name = name,
        rel_id = rel_id,
    )
}

/// Convert points to EMUs (English Metric Units)
/// 1 inch = 914400 EMUs, 1 point = 12700 EMUs
pub fn points_to_emu(points: f64) -> i64 {
    (points * 12700.0).round() as i64
}
