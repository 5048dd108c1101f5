pub mod batch;
pub mod classifier;
pub mod compression;
pub mod connectivity;
pub mod dimensions;
pub mod uploader;
pub mod validator;

pub use batch::upload_batch;
pub use classifier::{classify_catalog_error, classify_store_error, classify_validation};
pub use compression::compress_to_budget;
pub use connectivity::probe_store;
pub use dimensions::fit_within;
pub use uploader::{PassThroughReason, Prepared, SafeUploader};
pub use validator::{UploadValidator, ValidationError};
