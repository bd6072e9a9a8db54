/// A category rule: fires when any condition name contains any trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdviceRule {
    pub category: &'static str,
    pub triggers: &'static [&'static str],
    pub advice: &'static [&'static str],
}

impl AdviceRule {
    /// `names` must already be lower-cased
    pub fn matches<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names
            .iter()
            .any(|name| self.triggers.iter().any(|t| name.as_ref().contains(t)))
    }
}

pub const MONITOR_SYMPTOMS: &str = "Monitor your symptoms and note any changes";
pub const REST_AND_HYDRATE: &str = "Stay hydrated and get plenty of rest";
pub const CONSULT_PROFESSIONAL: &str = "If symptoms persist, consult a healthcare professional";
pub const SCHEDULE_APPOINTMENT: &str = "Consider scheduling a doctor's appointment";
pub const TRY_AGAIN: &str =
    "Unable to analyze symptoms right now. Please try again or consult a healthcare professional";

/// Advice always emitted first, in this order
pub const BASELINE_ADVICE: [&str; 2] = [MONITOR_SYMPTOMS, REST_AND_HYDRATE];

/// Category rules in evaluation order
pub const CATEGORY_RULES: &[AdviceRule] = &[
    AdviceRule {
        category: "fever",
        triggers: &["fever", "influenza", "viral infection"],
        advice: &[
            "Monitor your temperature regularly",
            "Consider over-the-counter fever reducers if needed",
        ],
    },
    AdviceRule {
        category: "musculoskeletal",
        triggers: &["muscle", "strain", "arthritis", "pain"],
        advice: &["Apply ice or heat to affected area", "Avoid strenuous activities"],
    },
    AdviceRule {
        category: "respiratory",
        triggers: &["cold", "cough", "respiratory"],
        advice: &["Use a humidifier to ease breathing", "Get plenty of rest"],
    },
];
