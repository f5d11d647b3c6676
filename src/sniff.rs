//! Image signature sniffing.

/// Image formats we recognize inside raw byte blobs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
}

impl ImageKind {
    /// Classify a byte blob by its magic-byte signature. Returns `None` for
    /// anything that is not one of the image formats we care about, including
    /// blobs `infer` recognizes as some other file type.
    pub fn sniff(data: &[u8]) -> Option<ImageKind> {
        let detected = infer::get(data)?;
        match detected.mime_type() {
            "image/jpeg" => Some(ImageKind::Jpeg),
            "image/png" => Some(ImageKind::Png),
            "image/gif" => Some(ImageKind::Gif),
            "image/bmp" => Some(ImageKind::Bmp),
            "image/tiff" => Some(ImageKind::Tiff),
            _ => None,
        }
    }

    /// The file extension used when writing a sniffed image.
    pub fn extension(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
            ImageKind::Gif => "gif",
            ImageKind::Bmp => "bmp",
            ImageKind::Tiff => "tiff",
        }
    }
}
