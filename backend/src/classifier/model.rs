use rand::Rng;
use shared::Label;
use std::sync::Arc;

use crate::config::ClassifierKind;

#[allow(dead_code)]
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("Model error: {0}")]
    Model(String),
}

/// Maps raw image bytes to a label. Implementations hold no per-request state
/// and may be shared across workers.
pub trait Classifier: Send + Sync {
    fn classify(&self, image: &[u8]) -> Result<Label, ClassificationError>;
}

/// Stand-in for a real model: a fair coin flip between the two labels.
#[derive(Clone, Default)]
pub struct RandomClassifier;

impl Classifier for RandomClassifier {
    fn classify(&self, _image: &[u8]) -> Result<Label, ClassificationError> {
        if rand::rng().random_bool(0.5) {
            Ok(Label::Cancer)
        } else {
            Ok(Label::NonCancer)
        }
    }
}

#[derive(Clone)]
pub struct FixedClassifier {
    label: Label,
}

impl FixedClassifier {
    pub fn new(label: Label) -> Self {
        Self { label }
    }
}

impl Classifier for FixedClassifier {
    fn classify(&self, _image: &[u8]) -> Result<Label, ClassificationError> {
        Ok(self.label)
    }
}

pub fn from_kind(kind: ClassifierKind) -> Arc<dyn Classifier> {
    match kind {
        ClassifierKind::Random => Arc::new(RandomClassifier),
        ClassifierKind::Cancer => Arc::new(FixedClassifier::new(Label::Cancer)),
        ClassifierKind::NonCancer => Arc::new(FixedClassifier::new(Label::NonCancer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_classifier_yields_both_labels() {
        let classifier = RandomClassifier;
        let mut seen_cancer = false;
        let mut seen_non_cancer = false;
        for _ in 0..200 {
            match classifier.classify(b"\x89PNG").unwrap() {
                Label::Cancer => seen_cancer = true,
                Label::NonCancer => seen_non_cancer = true,
            }
        }
        assert!(seen_cancer && seen_non_cancer);
    }

    #[test]
    fn fixed_kinds_pin_the_label() {
        assert_eq!(from_kind(ClassifierKind::Cancer).classify(&[]).unwrap(), Label::Cancer);
        assert_eq!(
            from_kind(ClassifierKind::NonCancer).classify(&[1, 2, 3]).unwrap(),
            Label::NonCancer
        );
    }
}
