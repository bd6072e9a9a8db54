use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{Result, TriageError};

/// One labelled symptom description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub symptoms: String,
    pub conditions: Vec<String>,
}

/// Named collection of training examples
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    pub name: String,
    pub examples: Vec<TrainingExample>,
}

const SAMPLE: &[(&str, &[&str])] = &[
    ("headache fever body aches chills", &["flu"]),
    ("cough sore throat runny nose congestion", &["common cold"]),
    ("nausea vomiting diarrhea stomach pain", &["gastroenteritis"]),
    ("chest pain shortness of breath dizziness", &["heart problems"]),
    ("rash itching redness swelling", &["allergic reaction"]),
    ("fatigue weakness dizziness pale skin", &["anemia"]),
    ("joint pain stiffness swelling redness", &["arthritis"]),
    ("abdominal pain bloating gas indigestion", &["indigestion"]),
    ("sneezing itchy eyes runny nose congestion", &["allergies"]),
    ("back pain stiffness limited movement", &["back strain"]),
    ("sore throat fever swollen glands", &["strep throat"]),
    ("headache sensitivity to light sound", &["migraine"]),
    ("fever cough difficulty breathing", &["pneumonia"]),
    ("muscle pain fatigue headache", &["viral infection"]),
    ("blurred vision headache nausea", &["migraine"]),
    ("ear pain fever hearing loss", &["ear infection"]),
    ("frequent urination thirst fatigue", &["diabetes"]),
    ("weight loss increased appetite palpitations", &["hyperthyroidism"]),
    ("wheezing coughing chest tightness", &["asthma"]),
    ("memory loss confusion difficulty concentrating", &["cognitive issues"]),
];

// First fifteen sample documents plus leg and muscle pain cases
const ENHANCED_EXTRA: &[(&str, &[&str])] = &[
    ("leg pain muscle cramps", &["muscle cramps"]),
    ("leg pain swelling redness", &["inflammation"]),
    ("leg pain after exercise workout", &["muscle strain"]),
    ("leg pain cramping walking", &["peripheral artery disease"]),
    ("muscle pain soreness stiffness", &["muscle soreness"]),
    ("joint pain knee hip leg", &["osteoarthritis"]),
    ("leg pain numbness tingling", &["nerve compression"]),
    ("leg pain varicose veins swelling", &["venous insufficiency"]),
    ("muscle strain pain movement", &["muscle injury"]),
    ("leg pain injury trauma", &["trauma"]),
    ("growing pains legs children", &["growing pains"]),
    ("sciatica leg pain back pain", &["sciatica"]),
    ("arthritis joint pain leg", &["arthritis"]),
    ("tendonitis leg pain inflammation", &["tendonitis"]),
];

fn to_examples(rows: &[(&str, &[&str])]) -> Vec<TrainingExample> {
    rows.iter()
        .map(|(symptoms, conditions)| TrainingExample {
            symptoms: symptoms.to_string(),
            conditions: conditions.iter().map(|c| c.to_string()).collect(),
        })
        .collect()
}

impl Corpus {
    /// Built-in 20-document corpus
    pub fn sample() -> Self {
        Self {
            name: "sample".to_string(),
            examples: to_examples(SAMPLE),
        }
    }

    /// Built-in 29-document corpus with leg/muscle pain cases
    pub fn enhanced() -> Self {
        let mut examples = to_examples(&SAMPLE[..15]);
        examples.extend(to_examples(ENHANCED_EXTRA));
        Self {
            name: "enhanced".to_string(),
            examples,
        }
    }

    /// Built-in corpus by name
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "sample" => Some(Self::sample()),
            "enhanced" => Some(Self::enhanced()),
            _ => None,
        }
    }

    /// Load a JSON array of `{ "symptoms": ..., "conditions": [...] }`
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let examples: Vec<TrainingExample> = serde_json::from_str(&contents)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());

        let corpus = Self { name, examples };
        corpus.validate()?;
        Ok(corpus)
    }

    /// Resolve a built-in corpus name or a path to a JSON corpus file
    pub fn resolve(source: &str) -> Result<Self> {
        match Self::by_name(source) {
            Some(corpus) => Ok(corpus),
            None => Self::from_json_file(Path::new(source)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.examples.is_empty() {
            return Err(TriageError::Training(format!(
                "corpus '{}' has no examples",
                self.name
            )));
        }
        if let Some((i, _)) = self
            .examples
            .iter()
            .enumerate()
            .find(|(_, ex)| ex.conditions.is_empty())
        {
            return Err(TriageError::Training(format!(
                "example {} of corpus '{}' has no conditions",
                i, self.name
            )));
        }
        if let Some((i, _)) = self
            .examples
            .iter()
            .enumerate()
            .find(|(_, ex)| ex.symptoms.trim().is_empty())
        {
            return Err(TriageError::Training(format!(
                "example {} of corpus '{}' has blank symptoms",
                i, self.name
            )));
        }
        Ok(())
    }

    /// Sorted, de-duplicated condition names
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .examples
            .iter()
            .flat_map(|ex| ex.conditions.iter().cloned())
            .collect();
        labels.sort();
        labels.dedup();
        labels
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sizes() {
        assert_eq!(Corpus::sample().len(), 20);
        assert_eq!(Corpus::enhanced().len(), 29);
    }

    #[test]
    fn test_labels_sorted_unique() {
        let labels = Corpus::sample().labels();
        assert_eq!(labels.len(), 19);
        assert!(labels.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(labels[0], "allergic reaction");
    }

    #[test]
    fn test_by_name() {
        assert!(Corpus::by_name("sample").is_some());
        assert!(Corpus::by_name("enhanced").is_some());
        assert!(Corpus::by_name("bogus").is_none());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clinic.json");
        std::fs::write(
            &path,
            r#"[{"symptoms": "itchy eyes", "conditions": ["allergies"]},
                {"symptoms": "dry cough", "conditions": ["common cold", "asthma"]}]"#,
        )
        .unwrap();

        let corpus = Corpus::resolve(path.to_str().unwrap()).unwrap();
        assert_eq!(corpus.name, "clinic");
        assert_eq!(corpus.labels(), vec!["allergies", "asthma", "common cold"]);
    }

    #[test]
    fn test_example_without_conditions_rejected() {
        let corpus = Corpus {
            name: "broken".to_string(),
            examples: vec![TrainingExample {
                symptoms: "headache".to_string(),
                conditions: vec![],
            }],
        };
        assert!(matches!(corpus.validate(), Err(TriageError::Training(_))));
    }
}
