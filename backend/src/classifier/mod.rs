pub mod model;

pub use model::{Classifier, from_kind};
