//! Verdict Interpretation

use crate::{InferenceError, PROBABILITY_TOLERANCE};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Credit decision shown to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Applicant is expected to repay
    #[serde(rename = "Good Risk")]
    GoodRisk,
    /// Applicant is at risk of default
    #[serde(rename = "Bad Risk")]
    BadRisk,
}

impl Verdict {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::GoodRisk => "Good Risk",
            Verdict::BadRisk => "Bad Risk",
        }
    }

    /// Get status line for the result panel
    pub fn status(&self) -> &'static str {
        match self {
            Verdict::GoodRisk => "Eligible for credit (Good Risk)",
            Verdict::BadRisk => "At risk of default (Bad Risk)",
        }
    }

    /// Get recommended follow-up
    pub fn advisory(&self) -> Option<&'static str> {
        match self {
            Verdict::GoodRisk => None,
            Verdict::BadRisk => Some("Further evaluation of this applicant is recommended."),
        }
    }
}

/// Which classifier labels mean good and bad risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassConvention {
    pub good_class: i64,
    pub bad_class: i64,
}

impl Default for ClassConvention {
    fn default() -> Self {
        Self {
            good_class: 1,
            bad_class: 0,
        }
    }
}

impl ClassConvention {
    /// Check that a classifier's classes are exactly this convention's two labels
    pub fn check(&self, classes: &[i64]) -> Result<(), String> {
        if self.good_class == self.bad_class {
            return Err(format!("good and bad class are both {}", self.good_class));
        }
        if classes.len() != 2 || !classes.contains(&self.good_class) || !classes.contains(&self.bad_class) {
            return Err(format!(
                "classifier classes {:?} do not match good={} bad={}",
                classes, self.good_class, self.bad_class
            ));
        }
        Ok(())
    }
}

/// Probability of each outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub good: f64,
    pub bad: f64,
}

/// Interpreted prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Classifier decision
    pub verdict: Verdict,
    /// Probabilities for both outcomes
    pub probabilities: ClassProbabilities,
    /// Probability of the predicted outcome (0.0 to 1.0)
    pub confidence: f64,
}

impl PredictionResult {
    /// Confidence as a percentage (0 to 100)
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }

    /// Confidence formatted with two decimals, e.g. `87.50%`
    pub fn confidence_display(&self) -> String {
        format!("{:.2}%", self.confidence_percent())
    }
}

/// Map a classifier label and its probability vector to a verdict.
///
/// Probabilities are looked up by class label in `classes`, never by
/// position, so an artifact trained with a different class order still
/// reports the right confidence.
pub fn interpret(
    label: i64,
    probabilities: &[f64],
    classes: &[i64],
    convention: &ClassConvention,
) -> Result<PredictionResult, InferenceError> {
    if probabilities.len() != classes.len() {
        return Err(InferenceError::InvalidInputShape {
            expected: classes.len(),
            actual: probabilities.len(),
        });
    }

    let total: f64 = probabilities.iter().sum();
    if !total.is_finite() || (total - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(InferenceError::InvalidProbabilities(total));
    }

    let probability_of = |class: i64| {
        classes
            .iter()
            .position(|c| *c == class)
            .map(|i| probabilities[i])
            .ok_or(InferenceError::UnknownClass(class))
    };

    let verdict = if label == convention.good_class {
        Verdict::GoodRisk
    } else if label == convention.bad_class {
        Verdict::BadRisk
    } else {
        return Err(InferenceError::UnknownClass(label));
    };

    let probabilities = ClassProbabilities {
        good: probability_of(convention.good_class)?,
        bad: probability_of(convention.bad_class)?,
    };
    let confidence = match verdict {
        Verdict::GoodRisk => probabilities.good,
        Verdict::BadRisk => probabilities.bad,
    };

    debug!("Interpreted class {} as {} ({:.4})", label, verdict.as_str(), confidence);
    Ok(PredictionResult {
        verdict,
        probabilities,
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_good_risk() {
        let result = interpret(1, &[0.125, 0.875], &[0, 1], &ClassConvention::default()).unwrap();
        assert_eq!(result.verdict, Verdict::GoodRisk);
        assert_eq!(result.confidence, 0.875);
        assert_eq!(result.confidence_display(), "87.50%");
    }

    #[test]
    fn test_bad_risk() {
        let result = interpret(0, &[0.6, 0.4], &[0, 1], &ClassConvention::default()).unwrap();
        assert_eq!(result.verdict, Verdict::BadRisk);
        assert_eq!(result.confidence, 0.6);
        assert_eq!(result.confidence_display(), "60.00%");
        assert!(result.verdict.advisory().is_some());
    }

    #[test]
    fn test_probabilities_follow_class_order() {
        // Classes listed good-first: index 0 holds the good probability
        let result = interpret(1, &[0.7, 0.3], &[1, 0], &ClassConvention::default()).unwrap();
        assert_eq!(result.probabilities.good, 0.7);
        assert_eq!(result.probabilities.bad, 0.3);
        assert_eq!(result.confidence, 0.7);
    }

    #[test]
    fn test_custom_convention() {
        let convention = ClassConvention {
            good_class: 2,
            bad_class: 1,
        };
        let result = interpret(1, &[0.8, 0.2], &[1, 2], &convention).unwrap();
        assert_eq!(result.verdict, Verdict::BadRisk);
        assert_eq!(result.confidence, 0.8);
    }

    #[test]
    fn test_unknown_label() {
        let err = interpret(7, &[0.5, 0.5], &[0, 1], &ClassConvention::default()).unwrap_err();
        assert_eq!(err, InferenceError::UnknownClass(7));
    }

    #[test]
    fn test_probabilities_must_sum_to_one() {
        let err = interpret(1, &[0.5, 0.6], &[0, 1], &ClassConvention::default()).unwrap_err();
        assert!(matches!(err, InferenceError::InvalidProbabilities(_)));
    }

    #[test]
    fn test_convention_check() {
        let convention = ClassConvention::default();
        assert!(convention.check(&[0, 1]).is_ok());
        assert!(convention.check(&[1, 0]).is_ok());
        assert!(convention.check(&[1, 2]).is_err());
        assert!(convention.check(&[0, 1, 2]).is_err());
    }

    #[test]
    fn test_verdict_serializes_as_label() {
        let json = serde_json::to_string(&Verdict::BadRisk).unwrap();
        assert_eq!(json, "\"Bad Risk\"");
    }
}
