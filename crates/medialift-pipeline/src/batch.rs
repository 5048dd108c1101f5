//! Batch coordinator
//!
//! Uploads files sequentially and stops at the first failure. The failed
//! result is included in the returned vector; files after it are never
//! attempted, so a misconfigured store or revoked credential fails once
//! instead of once per file.

use medialift_core::models::source_file::SourceFile;
use medialift_core::models::upload::{UploadOptions, UploadResult};

use crate::uploader::SafeUploader;

/// Upload `files` one at a time, fail-fast.
///
/// `dest_for` maps each file to its destination key. The result vector
/// holds one entry per attempted file, in input order.
pub async fn upload_batch(
    uploader: &SafeUploader,
    files: &[SourceFile],
    mut dest_for: impl FnMut(&SourceFile) -> String,
    options: &UploadOptions,
) -> Vec<UploadResult> {
    let mut results = Vec::with_capacity(files.len());

    for (index, file) in files.iter().enumerate() {
        let destination = dest_for(file);
        let result = uploader.upload(file, &destination, options).await;
        let failed = !result.success;
        results.push(result);

        if failed {
            tracing::warn!(
                index,
                total = files.len(),
                name = %file.name,
                "batch stopped at first failure"
            );
            break;
        }
    }

    results
}
