use bytes::Bytes;

/// Immutable descriptor of an input file.
///
/// The pipeline never mutates a `SourceFile`; compression produces a new
/// buffer and leaves the original untouched. Pixel dimensions are not stored
/// here; they are derived lazily by the compression engine, which is the
/// only component that decodes the bytes.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl SourceFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Byte size of the file contents
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Whether the declared mime type is in the image class
    pub fn is_image(&self) -> bool {
        self.content_type
            .to_lowercase()
            .starts_with("image/")
    }
}
