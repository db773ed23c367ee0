//! Review rating aggregation.

use serde::{Deserialize, Serialize};

/// Per-aspect scores for a review, each on a 0 to 10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ratings {
    pub food: f64,
    pub service: f64,
    pub ambience: f64,
    pub value: f64,
    /// Editorial override. When set it wins over the computed mean.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall: Option<f64>,
}

impl Ratings {
    pub fn new(food: f64, service: f64, ambience: f64, value: f64) -> Self {
        Self {
            food,
            service,
            ambience,
            value,
            overall: None,
        }
    }

    pub fn with_overall(mut self, overall: f64) -> Self {
        self.overall = Some(overall);
        self
    }

    /// The published overall score: the explicit override when present,
    /// otherwise the arithmetic mean of the four aspects.
    pub fn overall_score(&self) -> f64 {
        match self.overall {
            Some(overall) => overall,
            None => (self.food + self.service + self.ambience + self.value) / 4.0,
        }
    }

    /// Whether every score, including the override, sits on the 0-10
    /// scale.
    pub fn is_within_scale(&self) -> bool {
        let in_scale = |v: f64| (0.0..=10.0).contains(&v);
        in_scale(self.food)
            && in_scale(self.service)
            && in_scale(self.ambience)
            && in_scale(self.value)
            && self.overall.map(in_scale).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overall_is_mean_of_aspects() {
        let ratings = Ratings::new(10.0, 5.0, 5.0, 5.0);
        assert_eq!(ratings.overall_score(), 6.25);
    }

    #[test]
    fn test_all_zero_scores_zero() {
        let ratings = Ratings::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(ratings.overall_score(), 0.0);
    }

    #[test]
    fn test_explicit_overall_wins() {
        let ratings = Ratings::new(10.0, 5.0, 5.0, 5.0).with_overall(9.1);
        assert_eq!(ratings.overall_score(), 9.1);
    }

    #[test]
    fn test_scale_check() {
        assert!(Ratings::new(0.0, 10.0, 7.5, 3.2).is_within_scale());
        assert!(!Ratings::new(10.5, 5.0, 5.0, 5.0).is_within_scale());
        assert!(!Ratings::new(-0.1, 5.0, 5.0, 5.0).is_within_scale());
        assert!(!Ratings::new(5.0, 5.0, 5.0, 5.0)
            .with_overall(11.0)
            .is_within_scale());
    }

    #[test]
    fn test_serde_omits_absent_override() {
        let json = serde_json::to_string(&Ratings::new(8.0, 7.0, 9.0, 8.5)).unwrap();
        assert!(!json.contains("overall"));

        let parsed: Ratings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.overall, None);
    }
}
