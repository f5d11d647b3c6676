//! PDF image extraction.
//!
//! Walks each page's resource dictionaries looking for `/XObject` streams
//! declared as images. The stream filter decides the output extension; this
//! is a heuristic, not a format sniff.

use std::io::{Cursor, Read};

use flate2::read::ZlibDecoder;
use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::{extract::Extraction, output, prelude::*};

/// Extract every image XObject from the PDF at `path` into `output_folder`.
///
/// Decode failures are skipped per image and page failures per page, so one
/// bad object never aborts the rest of the document.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn extract(path: &Path, output_folder: &Path) -> Result<Extraction> {
    let document = Document::load(path)
        .with_context(|| format!("failed to load PDF {:?}", path.display()))?;

    let mut extraction = Extraction::default();
    for (page_number, page_id) in document.get_pages() {
        if let Err(err) =
            extract_page(&document, page_number, page_id, output_folder, &mut extraction)
        {
            warn!("skipping page {page_number} of {:?}: {err:#}", path.display());
            extraction.skipped += 1;
        }
    }
    Ok(extraction)
}

/// Pull the images out of a single page's resource dictionaries.
fn extract_page(
    document: &Document,
    page_number: u32,
    page_id: ObjectId,
    output_folder: &Path,
    extraction: &mut Extraction,
) -> Result<()> {
    let (direct, referenced) = document.get_page_resources(page_id);

    let mut resource_dicts: Vec<&Dictionary> = vec![];
    resource_dicts.extend(direct);
    for id in referenced {
        if let Ok(dict) = document.get_object(id).and_then(Object::as_dict) {
            resource_dicts.push(dict);
        }
    }

    for resources in resource_dicts {
        let Ok(xobjects) = resources.get(b"XObject") else {
            continue;
        };
        let Ok(xobjects) = resolve(document, xobjects).as_dict() else {
            continue;
        };
        for (name, value) in xobjects.iter() {
            let Ok(stream) = resolve(document, value).as_stream() else {
                continue;
            };
            if !is_image(stream) {
                continue;
            }
            let object_name = String::from_utf8_lossy(name);
            match image_payload(stream) {
                Ok((data, extension)) => {
                    let file_name = format!(
                        "image_page{page_number}_{}.{extension}",
                        sanitize(&object_name)
                    );
                    let written =
                        output::write_unique(output_folder, &file_name, &data)?;
                    debug!("wrote {:?}", written.display());
                    extraction.images.push(written);
                }
                Err(err) => {
                    warn!("skipping image {object_name} on page {page_number}: {err:#}");
                    extraction.skipped += 1;
                }
            }
        }
    }
    Ok(())
}

/// Follow a reference to its target, returning the object itself when it is
/// not a reference or the reference dangles.
fn resolve<'a>(document: &'a Document, object: &'a Object) -> &'a Object {
    match object {
        Object::Reference(id) => document.get_object(*id).unwrap_or(object),
        other => other,
    }
}

/// Is this stream an image XObject?
fn is_image(stream: &Stream) -> bool {
    matches!(
        stream.dict.get(b"Subtype").and_then(Object::as_name),
        Ok(name) if name == b"Image"
    )
}

/// The first declared stream filter, if any.
fn first_filter(stream: &Stream) -> Option<Vec<u8>> {
    match stream.dict.get(b"Filter") {
        Ok(Object::Name(name)) => Some(name.clone()),
        Ok(Object::Array(filters)) => filters
            .first()
            .and_then(|f| f.as_name().ok())
            .map(|name| name.to_vec()),
        _ => None,
    }
}

/// Decode an image stream into writable bytes plus an output extension.
///
/// JPEG (`DCTDecode`) and CCITT streams are written verbatim. `FlateDecode`
/// streams are inflated and, when the dictionary describes an 8-bit RGB or
/// grayscale raster, rebuilt into a real PNG; otherwise the inflated bytes
/// are written as-is. The extension is chosen from the filter alone.
fn image_payload(stream: &Stream) -> Result<(Vec<u8>, &'static str)> {
    match first_filter(stream).as_deref() {
        Some(filter) if filter == b"DCTDecode" => Ok((stream.content.clone(), "jpg")),
        Some(filter) if filter == b"FlateDecode" => {
            let mut inflated = vec![];
            ZlibDecoder::new(stream.content.as_slice())
                .read_to_end(&mut inflated)
                .context("failed to inflate image stream")?;
            match reconstruct_png(&stream.dict, &inflated) {
                Some(png) => Ok((png, "png")),
                None => Ok((inflated, "png")),
            }
        }
        Some(filter) if filter == b"CCITTFaxDecode" => {
            Ok((stream.content.clone(), "tiff"))
        }
        _ => {
            let data = stream
                .decompressed_content()
                .unwrap_or_else(|_| stream.content.clone());
            Ok((data, "png"))
        }
    }
}

/// Wrap raw raster bytes into a PNG when the stream dictionary describes an
/// 8-bit `DeviceRGB` or `DeviceGray` image whose data length matches.
fn reconstruct_png(dict: &Dictionary, data: &[u8]) -> Option<Vec<u8>> {
    let width = u32::try_from(dict.get(b"Width").ok()?.as_i64().ok()?).ok()?;
    let height = u32::try_from(dict.get(b"Height").ok()?.as_i64().ok()?).ok()?;
    let bits = match dict.get(b"BitsPerComponent") {
        Ok(object) => object.as_i64().ok()?,
        Err(_) => 8,
    };
    if bits != 8 {
        return None;
    }

    let color_space = dict.get(b"ColorSpace").ok()?.as_name().ok()?;
    let image = if color_space == b"DeviceRGB" {
        RgbImage::from_raw(width, height, data.to_vec()).map(DynamicImage::ImageRgb8)
    } else if color_space == b"DeviceGray" {
        GrayImage::from_raw(width, height, data.to_vec()).map(DynamicImage::ImageLuma8)
    } else {
        None
    }?;

    let mut png = vec![];
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png).ok()?;
    Some(png)
}

/// Make a PDF object name safe to use inside a filename.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c == '/' || c.is_whitespace() || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}
