//! Text encoder
//!
//! Turns free symptom text into a TF-IDF feature vector over a vocabulary
//! fixed at training time.

pub mod stop_words;
pub mod tfidf;
pub mod vocabulary;

pub use tfidf::{tokenize, FeatureVector, TextEncoder};
pub use vocabulary::Vocabulary;
