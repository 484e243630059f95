mod pathology_detector;
mod upload_store;

pub use pathology_detector::{DetectorError, PathologyDetector};
pub use upload_store::{UploadStore, UploadStoreError};
