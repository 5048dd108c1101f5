//! Pre-flight validation
//!
//! Checks run after compression and before any network traffic, so a file
//! that will never upload fails locally without burning transfer attempts.

use thiserror::Error;

use medialift_core::models::source_file::SourceFile;

/// Longest accepted object name, in characters
pub const MAX_NAME_CHARS: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("unsupported content type: {content_type}")]
    NotAnImage { content_type: String },

    #[error("file is empty")]
    EmptyFile,

    #[error("file is {size} bytes, exceeding the {max} byte limit")]
    FileTooLarge { size: u64, max: u64 },

    #[error("file name is {len} characters, exceeding the {max} character limit")]
    NameTooLong { len: usize, max: usize },
}

/// Validates files against the configured size ceiling.
#[derive(Debug, Clone, Copy)]
pub struct UploadValidator {
    max_bytes: u64,
}

impl UploadValidator {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Checks run in order: content type, emptiness, size, name length.
    /// The first failure wins.
    pub fn validate(&self, file: &SourceFile) -> Result<(), ValidationError> {
        if !file.is_image() {
            return Err(ValidationError::NotAnImage {
                content_type: file.content_type.clone(),
            });
        }
        if file.size() == 0 {
            return Err(ValidationError::EmptyFile);
        }
        if file.size() > self.max_bytes {
            return Err(ValidationError::FileTooLarge {
                size: file.size(),
                max: self.max_bytes,
            });
        }
        let len = file.name.chars().count();
        if len > MAX_NAME_CHARS {
            return Err(ValidationError::NameTooLong {
                len,
                max: MAX_NAME_CHARS,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> UploadValidator {
        UploadValidator::new(1024)
    }

    #[test]
    fn accepts_small_image() {
        let file = SourceFile::new("cat.jpg", "image/jpeg", vec![1u8; 100]);
        assert_eq!(validator().validate(&file), Ok(()));
    }

    #[test]
    fn rejects_non_image_content_type() {
        let file = SourceFile::new("doc.pdf", "application/pdf", vec![1u8; 100]);
        assert!(matches!(
            validator().validate(&file),
            Err(ValidationError::NotAnImage { .. })
        ));
    }

    #[test]
    fn content_type_check_is_case_insensitive() {
        let file = SourceFile::new("cat.jpg", "IMAGE/JPEG", vec![1u8; 100]);
        assert_eq!(validator().validate(&file), Ok(()));
    }

    #[test]
    fn rejects_empty_file() {
        let file = SourceFile::new("void.png", "image/png", Vec::new());
        assert_eq!(validator().validate(&file), Err(ValidationError::EmptyFile));
    }

    #[test]
    fn rejects_oversized_file() {
        let file = SourceFile::new("big.png", "image/png", vec![1u8; 2048]);
        assert_eq!(
            validator().validate(&file),
            Err(ValidationError::FileTooLarge {
                size: 2048,
                max: 1024
            })
        );
    }

    #[test]
    fn boundary_size_is_accepted() {
        let file = SourceFile::new("exact.png", "image/png", vec![1u8; 1024]);
        assert_eq!(validator().validate(&file), Ok(()));
    }

    #[test]
    fn rejects_over_long_name() {
        let name = format!("{}.png", "a".repeat(MAX_NAME_CHARS));
        let file = SourceFile::new(name, "image/png", vec![1u8; 10]);
        assert!(matches!(
            validator().validate(&file),
            Err(ValidationError::NameTooLong { .. })
        ));
    }

    #[test]
    fn non_image_wins_over_empty() {
        let file = SourceFile::new("void.txt", "text/plain", Vec::new());
        assert!(matches!(
            validator().validate(&file),
            Err(ValidationError::NotAnImage { .. })
        ));
    }
}
