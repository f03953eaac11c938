pub mod response;
pub mod upload;
pub mod validator;

pub use response::{PredictOutcome, ResponseEnvelope, build};
pub use upload::{UploadError, read_upload};
pub use validator::{ValidationOutcome, validate};
