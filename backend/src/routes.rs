use actix_cors::Cors;
use actix_multipart::{Multipart, MultipartError};
use actix_web::http::header;
use actix_web::web;
use log::{debug, error, info, warn};

use crate::classifier::Classifier;
use crate::predict::{
    PredictOutcome, ResponseEnvelope, UploadError, ValidationOutcome, build, read_upload,
    validate,
};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/predict").route(web::post().to(handle_predict)));
}

/// POST/OPTIONS from `allowed_origins`, or from any origin when the list is empty.
pub fn cors(allowed_origins: &[String]) -> Cors {
    let cors = if allowed_origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}

async fn handle_predict(
    payload: Multipart,
    classifier: web::Data<dyn Classifier>,
) -> ResponseEnvelope {
    let upload = match read_upload(payload).await {
        Ok(upload) => upload,
        // A body that is not multipart has no `image` field to find.
        Err(UploadError::Multipart(
            MultipartError::ContentTypeMissing | MultipartError::ContentTypeIncompatible,
        )) => None,
        Err(UploadError::TooLarge(field)) => {
            warn!("Rejected upload: body over size limit at field '{}'", field);
            return build(PredictOutcome::PayloadTooLarge);
        }
        Err(e) => {
            error!("Failed to read multipart payload: {}", e);
            return build(PredictOutcome::TransportError);
        }
    };

    let image = match validate(upload) {
        ValidationOutcome::Valid(image) => image,
        ValidationOutcome::MissingFile => {
            warn!("Rejected upload: no image field");
            return build(PredictOutcome::MissingFile);
        }
        ValidationOutcome::PayloadTooLarge => {
            warn!("Rejected upload: image over size limit");
            return build(PredictOutcome::PayloadTooLarge);
        }
    };

    if !image.is_image_type() {
        warn!(
            "Classifying upload with non-image content type {:?}",
            image.content_type
        );
    }

    let outcome = match classifier.classify(&image.bytes) {
        Ok(label) => PredictOutcome::Predicted(label),
        Err(e) => {
            error!("Model inference error: {}", e);
            PredictOutcome::ClassificationFailed
        }
    };

    let envelope = build(outcome);
    if let Some(data) = &envelope.body().data {
        info!(
            "Prediction {} for {} ({} bytes): {}",
            data.id,
            image.file_name.as_deref().unwrap_or("<unnamed>"),
            image.declared_size,
            data.result
        );
    }
    debug!("Responding {} to /predict", envelope.http_code());
    envelope
}
