use actix_multipart::{Field, Multipart};
use futures::TryStreamExt;
use log::debug;
use shared::{IMAGE_FIELD, MAX_PAYLOAD_BYTES};

/// An `image` part as decoded from the multipart body. Lives for one request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    /// Bytes the transport saw for this field. Exceeds `bytes.len()` when
    /// buffering was cut off at the ceiling.
    pub declared_size: usize,
    pub field_name: String,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl UploadedImage {
    pub fn is_image_type(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Multipart error: {0}")]
    Multipart(#[from] actix_multipart::MultipartError),
    #[error("Body exceeds the upload size limit at field '{0}'")]
    TooLarge(String),
}

/// Pulls the first `image` field out of the body. Content bytes are counted
/// across every field, and reading stops as soon as the running total passes
/// `MAX_PAYLOAD_BYTES`. An `image` field that crosses the ceiling by itself is
/// returned with `declared_size` above it and the rest of the stream unread.
pub async fn read_upload(mut payload: Multipart) -> Result<Option<UploadedImage>, UploadError> {
    let mut upload: Option<UploadedImage> = None;
    let mut total = 0usize;

    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().unwrap_or_default().to_string();

        if name != IMAGE_FIELD || upload.is_some() {
            let skipped = drain(&mut field, &name, &mut total).await?;
            debug!("Skipped multipart field '{}' ({} bytes)", name, skipped);
            continue;
        }

        let content_type = field.content_type().map(|mime| mime.to_string());
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        let mut bytes = Vec::new();
        let mut seen = 0usize;
        while let Some(chunk) = field.try_next().await? {
            seen += chunk.len();
            total += chunk.len();
            if total > MAX_PAYLOAD_BYTES {
                break;
            }
            bytes.extend_from_slice(&chunk);
        }

        if total > MAX_PAYLOAD_BYTES && seen <= MAX_PAYLOAD_BYTES {
            return Err(UploadError::TooLarge(name));
        }

        let image = UploadedImage {
            bytes,
            declared_size: seen,
            field_name: name,
            content_type,
            file_name,
        };
        if image.declared_size > MAX_PAYLOAD_BYTES {
            return Ok(Some(image));
        }
        upload = Some(image);
    }

    Ok(upload)
}

async fn drain(field: &mut Field, name: &str, total: &mut usize) -> Result<usize, UploadError> {
    let mut seen = 0usize;
    while let Some(chunk) = field.try_next().await? {
        seen += chunk.len();
        *total += chunk.len();
        if *total > MAX_PAYLOAD_BYTES {
            return Err(UploadError::TooLarge(name.to_string()));
        }
    }
    Ok(seen)
}
