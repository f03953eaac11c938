use shared::{IMAGE_FIELD, MAX_PAYLOAD_BYTES};

use super::upload::UploadedImage;

#[derive(Debug)]
pub enum ValidationOutcome {
    MissingFile,
    PayloadTooLarge,
    Valid(UploadedImage),
}

/// Re-checks what the transport already enforced. Empty or non-image content
/// under the `image` field passes through to the classifier.
pub fn validate(upload: Option<UploadedImage>) -> ValidationOutcome {
    match upload {
        None => ValidationOutcome::MissingFile,
        Some(image) if image.field_name != IMAGE_FIELD => ValidationOutcome::MissingFile,
        Some(image) if image.declared_size > MAX_PAYLOAD_BYTES => {
            ValidationOutcome::PayloadTooLarge
        }
        Some(image) => ValidationOutcome::Valid(image),
    }
}
