use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use shared::{
    ClassificationResult, Label, MSG_CLASSIFICATION_FAILED, MSG_INVALID_MULTIPART,
    MSG_MISSING_FILE, MSG_PAYLOAD_TOO_LARGE, PredictResponse,
};
use uuid::Uuid;

/// Every terminal state a `/predict` request can reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictOutcome {
    MissingFile,
    PayloadTooLarge,
    TransportError,
    ClassificationFailed,
    Predicted(Label),
}

/// A response body paired with the HTTP status it is sent with.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    body: PredictResponse,
    http_code: StatusCode,
}

impl ResponseEnvelope {
    fn success(result: ClassificationResult) -> Self {
        Self {
            body: PredictResponse::success(result),
            http_code: StatusCode::OK,
        }
    }

    fn fail(message: &str, http_code: StatusCode) -> Self {
        Self {
            body: PredictResponse::fail(message),
            http_code,
        }
    }

    pub fn body(&self) -> &PredictResponse {
        &self.body
    }

    pub fn http_code(&self) -> StatusCode {
        self.http_code
    }
}

impl Responder for ResponseEnvelope {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::build(self.http_code).json(self.body)
    }
}

pub fn build(outcome: PredictOutcome) -> ResponseEnvelope {
    match outcome {
        PredictOutcome::MissingFile => {
            ResponseEnvelope::fail(MSG_MISSING_FILE, StatusCode::BAD_REQUEST)
        }
        PredictOutcome::PayloadTooLarge => {
            ResponseEnvelope::fail(MSG_PAYLOAD_TOO_LARGE, StatusCode::PAYLOAD_TOO_LARGE)
        }
        PredictOutcome::TransportError => {
            ResponseEnvelope::fail(MSG_INVALID_MULTIPART, StatusCode::BAD_REQUEST)
        }
        PredictOutcome::ClassificationFailed => {
            ResponseEnvelope::fail(MSG_CLASSIFICATION_FAILED, StatusCode::INTERNAL_SERVER_ERROR)
        }
        PredictOutcome::Predicted(label) => {
            ResponseEnvelope::success(ClassificationResult::new(Uuid::new_v4(), label, Utc::now()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ResponseStatus;

    #[test]
    fn failures_carry_no_data() {
        let cases = [
            (PredictOutcome::MissingFile, 400, "File image is required"),
            (
                PredictOutcome::PayloadTooLarge,
                413,
                "Payload content length greater than maximum allowed: 1000000",
            ),
            (PredictOutcome::TransportError, 400, "Invalid multipart payload format"),
            (PredictOutcome::ClassificationFailed, 500, "Failed to classify image"),
        ];

        for (outcome, code, message) in cases {
            let envelope = build(outcome);
            assert_eq!(envelope.http_code().as_u16(), code);
            assert_eq!(envelope.body().status, ResponseStatus::Fail);
            assert_eq!(envelope.body().message, message);
            assert!(envelope.body().data.is_none());
        }
    }

    #[test]
    fn prediction_is_success_with_data() {
        let before = Utc::now();
        let envelope = build(PredictOutcome::Predicted(Label::Cancer));

        assert_eq!(envelope.http_code(), StatusCode::OK);
        assert!(envelope.body().is_success());
        let data = envelope.body().data.as_ref().unwrap();
        assert_eq!(data.result, Label::Cancer);
        assert_eq!(data.suggestion, "Segera periksa ke dokter!");
        assert_eq!(data.id.get_version_num(), 4);
        assert!(data.created_at >= before);
    }

    #[test]
    fn each_prediction_gets_a_fresh_id() {
        let first = build(PredictOutcome::Predicted(Label::NonCancer));
        let second = build(PredictOutcome::Predicted(Label::NonCancer));
        assert_ne!(
            first.body().data.as_ref().unwrap().id,
            second.body().data.as_ref().unwrap().id
        );
    }
}
