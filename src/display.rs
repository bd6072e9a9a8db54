//! Terminal rendering of predictions

use colored::Colorize;

use crate::pipeline::Prediction;

/// Format a prediction for the terminal
pub fn render_prediction(prediction: &Prediction) -> String {
    let mut out = String::new();

    if prediction.conditions.is_empty() {
        out.push_str(&format!("{}\n", "No matching conditions found".yellow()));
    } else {
        out.push_str(&format!("{}\n", "Possible conditions:".bold()));
        for (rank, condition) in prediction.conditions.iter().enumerate() {
            let pct = format!("{:5.1}%", condition.probability * 100.0);
            let pct = if condition.probability > 0.3 {
                pct.red().bold()
            } else if condition.probability > 0.1 {
                pct.yellow()
            } else {
                pct.normal()
            };
            out.push_str(&format!("  {}. {} {}\n", rank + 1, pct, condition.name));
        }
    }

    out.push('\n');
    out.push_str(&format!("{}\n", "Next steps:".bold()));
    for step in &prediction.next_steps {
        out.push_str(&format!("  - {}\n", step));
    }

    if prediction.degraded {
        out.push_str(&format!("\n{}\n", "(analysis unavailable, showing fallback advice)".dimmed()));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::ConditionEntry;

    #[test]
    fn test_render_lists_conditions_and_steps() {
        colored::control::set_override(false);
        let prediction = Prediction {
            conditions: vec![
                ConditionEntry {
                    name: "arthritis".to_string(),
                    probability: 0.42,
                },
                ConditionEntry {
                    name: "back strain".to_string(),
                    probability: 0.05,
                },
            ],
            next_steps: vec!["Apply ice or heat to affected area".to_string()],
            degraded: false,
        };
        let text = render_prediction(&prediction);
        assert!(text.contains("1.  42.0% arthritis"));
        assert!(text.contains("2.   5.0% back strain"));
        assert!(text.contains("- Apply ice or heat to affected area"));
    }

    #[test]
    fn test_render_empty() {
        colored::control::set_override(false);
        let prediction = Prediction {
            conditions: vec![],
            next_steps: vec!["Stay hydrated and get plenty of rest".to_string()],
            degraded: false,
        };
        assert!(render_prediction(&prediction).contains("No matching conditions found"));
    }
}
