mod detection_service;

pub use detection_service::{DetectionError, DetectionService};
