use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::TriageError;

/// Ordered, immutable term set with a fixed term -> index mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build a vocabulary; position in `terms` is the feature index
    pub fn new(terms: Vec<String>) -> Result<Self, TriageError> {
        let mut index = HashMap::with_capacity(terms.len());
        for (i, term) in terms.iter().enumerate() {
            if index.insert(term.clone(), i).is_some() {
                return Err(TriageError::init(
                    "vectorizer.json",
                    format!("duplicate vocabulary term '{}'", term),
                ));
            }
        }
        Ok(Self { terms, index })
    }

    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = TriageError;

    fn try_from(terms: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(terms)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocab: Vocabulary) -> Self {
        vocab.terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_index_follows_position() {
        let vocab = Vocabulary::new(terms(&["ache", "cough", "fever"])).unwrap();
        assert_eq!(vocab.index_of("ache"), Some(0));
        assert_eq!(vocab.index_of("fever"), Some(2));
        assert_eq!(vocab.index_of("rash"), None);
        assert_eq!(vocab.len(), 3);
    }

    #[test]
    fn test_duplicate_terms_rejected() {
        let result = Vocabulary::new(terms(&["cough", "cough"]));
        assert!(matches!(result, Err(TriageError::Initialization { .. })));
    }

    #[test]
    fn test_serde_as_plain_list() {
        let vocab = Vocabulary::new(terms(&["cough", "fever"])).unwrap();
        let json = serde_json::to_string(&vocab).unwrap();
        assert_eq!(json, r#"["cough","fever"]"#);

        let back: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.index_of("fever"), Some(1));

        let dup: std::result::Result<Vocabulary, _> = serde_json::from_str(r#"["a1","a1"]"#);
        assert!(dup.is_err());
    }
}
