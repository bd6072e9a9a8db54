use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::stop_words::is_stop_word;
use super::vocabulary::Vocabulary;
use crate::errors::{Result, TriageError};

/// Dense term-importance vector, one weight per vocabulary term
pub type FeatureVector = Vec<f64>;

/// Lower-case the text and split it into word tokens of at least two characters
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(|token| token.to_string())
        .collect()
}

/// TF-IDF text encoder over a fixed vocabulary
///
/// Weight of a term is its raw count in the text times its inverse document
/// frequency; the vector is L2-normalized unless it is all zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEncoder {
    vocabulary: Vocabulary,
    idf: Vec<f64>,
}

impl TextEncoder {
    /// Wrap fitted parameters, checking that they agree with each other
    pub fn new(vocabulary: Vocabulary, idf: Vec<f64>) -> Result<Self> {
        let encoder = Self { vocabulary, idf };
        encoder.validate()?;
        Ok(encoder)
    }

    /// Fit vocabulary and idf weights on a document collection
    pub fn fit<S: AsRef<str>>(documents: &[S], max_features: usize) -> Result<Self> {
        if documents.is_empty() {
            return Err(TriageError::Training(
                "cannot fit encoder on an empty corpus".to_string(),
            ));
        }

        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| {
                tokenize(doc.as_ref())
                    .into_iter()
                    .filter(|t| !is_stop_word(t))
                    .collect()
            })
            .collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for tokens in &tokenized {
            for token in tokens {
                *counts.entry(token.as_str()).or_insert(0) += 1;
            }
        }

        // Most frequent terms win; alphabetical among equal counts
        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        terms.sort();
        let vocabulary = Vocabulary::new(terms)?;

        let mut df = vec![0usize; vocabulary.len()];
        for tokens in &tokenized {
            let unique: HashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();
            for token in unique {
                if let Some(idx) = vocabulary.index_of(token) {
                    df[idx] += 1;
                }
            }
        }

        let n_docs = documents.len() as f64;
        let idf = df
            .iter()
            .map(|&d| ((1.0 + n_docs) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        Self::new(vocabulary, idf)
    }

    /// Encode text into a feature vector; unknown terms are dropped
    pub fn encode(&self, text: &str) -> FeatureVector {
        let mut vector = vec![0.0; self.vocabulary.len()];
        for token in tokenize(text) {
            if let Some(idx) = self.vocabulary.index_of(&token) {
                vector[idx] += 1.0;
            }
        }

        for (weight, idf) in vector.iter_mut().zip(&self.idf) {
            *weight *= idf;
        }

        l2_normalize(&mut vector);
        vector
    }

    /// Check idf length and values against the vocabulary
    pub fn validate(&self) -> Result<()> {
        if self.idf.len() != self.vocabulary.len() {
            return Err(TriageError::DimensionMismatch {
                context: "idf weights".to_string(),
                expected: self.vocabulary.len(),
                got: self.idf.len(),
            });
        }
        if let Some((i, w)) = self
            .idf
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(TriageError::init(
                "vectorizer.json",
                format!("invalid idf weight {} for term '{}'", w, self.vocabulary.terms()[i]),
            ));
        }
        Ok(())
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Feature dimensionality produced by `encode`
    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }
}

fn l2_normalize(v: &mut [f64]) {
    let norm = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder(terms: &[&str], idf: &[f64]) -> TextEncoder {
        let vocab = Vocabulary::new(terms.iter().map(|t| t.to_string()).collect()).unwrap();
        TextEncoder::new(vocab, idf.to_vec()).unwrap()
    }

    #[test]
    fn test_tokenize_lowercases_and_drops_short_tokens() {
        assert_eq!(
            tokenize("Sore THROAT, fever & a 39C temp"),
            vec!["sore", "throat", "fever", "39c", "temp"]
        );
    }

    #[test]
    fn test_encode_is_normalized() {
        let enc = encoder(&["cough", "fever"], &[1.0, 1.0]);
        let v = enc.encode("Fever cough");
        let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
        assert!((v[0] - v[1]).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_vocabulary_text_gives_zero_vector() {
        let enc = encoder(&["cough", "fever"], &[1.0, 2.0]);
        let v = enc.encode("tingling numbness");
        assert_eq!(v, vec![0.0, 0.0]);
    }

    #[test]
    fn test_repeated_terms_and_idf_weighting() {
        let enc = encoder(&["cough", "fever"], &[1.0, 2.0]);
        // cough: 2 * 1.0, fever: 1 * 2.0 -> equal weights
        let v = enc.encode("cough cough fever");
        assert!((v[0] - v[1]).abs() < 1e-12);
    }

    #[test]
    fn test_idf_length_mismatch_rejected() {
        let vocab = Vocabulary::new(vec!["cough".to_string()]).unwrap();
        let result = TextEncoder::new(vocab, vec![1.0, 1.0]);
        assert!(matches!(result, Err(TriageError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_fit_drops_stop_words_and_sorts_terms() {
        let docs = ["pain in the chest", "chest tightness", "back pain"];
        let enc = TextEncoder::fit(&docs, 1000).unwrap();
        let terms = enc.vocabulary().terms();
        assert_eq!(terms, &["chest", "pain", "tightness"]);
        assert!(enc.vocabulary().index_of("back").is_none());

        // chest appears in 2 of 3 docs: ln(4/3) + 1
        let chest = enc.vocabulary().index_of("chest").unwrap();
        assert!((enc.idf()[chest] - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_fit_drops_common_english_filler() {
        let docs = ["back pain", "get first aid", "move side full"];
        let enc = TextEncoder::fit(&docs, 1000).unwrap();
        assert_eq!(enc.vocabulary().terms(), &["aid", "pain"]);
    }

    #[test]
    fn test_fit_respects_max_features() {
        let docs = ["pain pain pain", "pain fever", "fever rash"];
        let enc = TextEncoder::fit(&docs, 2).unwrap();
        assert_eq!(enc.vocabulary().terms(), &["fever", "pain"]);
    }

    #[test]
    fn test_fit_empty_corpus_fails() {
        let docs: [&str; 0] = [];
        assert!(TextEncoder::fit(&docs, 10).is_err());
    }
}
