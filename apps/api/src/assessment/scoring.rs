//! Trait scoring for quiz answers.
//!
//! Every quiz question belongs to one of the six RIASEC trait categories.
//! Answers are 1–5 agreement values; a trait's score is the plain sum of the
//! values given to its questions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Category label for answers whose question id is not in the question bank.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trait {
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl Trait {
    /// Fixed order used for score tables and tie-breaking.
    pub const ALL: [Trait; 6] = [
        Trait::Realistic,
        Trait::Investigative,
        Trait::Artistic,
        Trait::Social,
        Trait::Enterprising,
        Trait::Conventional,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Trait::Realistic => "Realistic",
            Trait::Investigative => "Investigative",
            Trait::Artistic => "Artistic",
            Trait::Social => "Social",
            Trait::Enterprising => "Enterprising",
            Trait::Conventional => "Conventional",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Trait::ALL.into_iter().find(|t| t.as_str() == label)
    }

    /// Default career suggested when this trait dominates and no predictor answered.
    pub fn fallback_career(self) -> &'static str {
        match self {
            Trait::Realistic => "Software Engineer",
            Trait::Investigative => "Data Scientist",
            Trait::Artistic => "UI/UX Designer",
            Trait::Social => "Product Manager",
            Trait::Enterprising => "Startup Founder",
            Trait::Conventional => "DevOps Engineer",
        }
    }

    /// Career-path categories that suit this trait, best fit first.
    pub fn career_categories(self) -> &'static [&'static str] {
        match self {
            Trait::Realistic => &["engineering", "technology"],
            Trait::Investigative => &["science", "technology", "healthcare"],
            Trait::Artistic => &["arts"],
            Trait::Social => &["education", "healthcare"],
            Trait::Enterprising => &["business", "finance"],
            Trait::Conventional => &["finance", "business", "technology"],
        }
    }
}

/// One answer tagged with its question's category, as sent to the predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedAnswer {
    pub category: String,
    pub value: i64,
}

/// Tags each raw answer with its question's category.
/// `categories` maps question id to category label.
pub fn format_answers(
    answers: &Map<String, Value>,
    categories: &HashMap<String, String>,
) -> Vec<FormattedAnswer> {
    answers
        .iter()
        .map(|(question_id, value)| FormattedAnswer {
            category: categories
                .get(question_id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
            value: parse_answer_value(value),
        })
        .collect()
}

/// Reads an answer value leniently: numbers are truncated, strings contribute
/// their leading integer ("4", " 3 ", "5 - strongly agree"), anything else is 0.
pub fn parse_answer_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => leading_integer(s).unwrap_or(0),
        _ => 0,
    }
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Per-trait score sums.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraitScores {
    scores: [i64; 6],
}

impl TraitScores {
    /// Answers in unrecognised categories are ignored. Sums saturate at the
    /// `i64` bounds.
    pub fn from_answers(answers: &[FormattedAnswer]) -> Self {
        let mut scores = [0i64; 6];
        for answer in answers {
            if let Some(t) = Trait::from_label(&answer.category) {
                let slot = &mut scores[index_of(t)];
                *slot = slot.saturating_add(answer.value);
            }
        }
        Self { scores }
    }

    pub fn get(&self, t: Trait) -> i64 {
        self.scores[index_of(t)]
    }

    /// The highest-scoring trait. On a tie the trait later in `Trait::ALL` wins.
    pub fn dominant(&self) -> Trait {
        Trait::ALL
            .into_iter()
            .fold(Trait::Realistic, |best, t| {
                if self.get(best) > self.get(t) {
                    best
                } else {
                    t
                }
            })
    }

    /// All traits from highest to lowest score; ties keep `Trait::ALL` order.
    pub fn ranked(&self) -> Vec<(Trait, i64)> {
        let mut ranked: Vec<_> = Trait::ALL.into_iter().map(|t| (t, self.get(t))).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// `{ "Realistic": n, ... }` for persisting alongside a quiz result.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = Trait::ALL
            .into_iter()
            .map(|t| (t.as_str().to_string(), Value::from(self.get(t))))
            .collect();
        Value::Object(map)
    }
}

fn index_of(t: Trait) -> usize {
    Trait::ALL
        .iter()
        .position(|candidate| *candidate == t)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn answers(pairs: &[(&str, i64)]) -> Vec<FormattedAnswer> {
        pairs
            .iter()
            .map(|(category, value)| FormattedAnswer {
                category: category.to_string(),
                value: *value,
            })
            .collect()
    }

    #[test]
    fn test_parse_answer_value_variants() {
        assert_eq!(parse_answer_value(&json!("5")), 5);
        assert_eq!(parse_answer_value(&json!(" 3 ")), 3);
        assert_eq!(parse_answer_value(&json!("4 - agree")), 4);
        assert_eq!(parse_answer_value(&json!(2)), 2);
        assert_eq!(parse_answer_value(&json!(4.9)), 4);
        assert_eq!(parse_answer_value(&json!("strongly agree")), 0);
        assert_eq!(parse_answer_value(&json!(null)), 0);
    }

    #[test]
    fn test_format_answers_marks_unknown_questions() {
        let mut categories = HashMap::new();
        categories.insert("q1".to_string(), "Artistic".to_string());
        let raw = json!({ "q1": "5", "q-missing": "4" });
        let formatted = format_answers(raw.as_object().unwrap(), &categories);

        assert!(formatted.contains(&FormattedAnswer {
            category: "Artistic".into(),
            value: 5
        }));
        assert!(formatted.contains(&FormattedAnswer {
            category: UNKNOWN_CATEGORY.into(),
            value: 4
        }));
    }

    #[test]
    fn test_scores_sum_per_category_and_ignore_unknown() {
        let scores = TraitScores::from_answers(&answers(&[
            ("Social", 4),
            ("Social", 5),
            ("Realistic", 2),
            ("Unknown", 5),
        ]));
        assert_eq!(scores.get(Trait::Social), 9);
        assert_eq!(scores.get(Trait::Realistic), 2);
        assert_eq!(scores.get(Trait::Conventional), 0);
    }

    #[test]
    fn test_huge_answer_values_saturate() {
        let mut categories = HashMap::new();
        categories.insert("q1".to_string(), "Realistic".to_string());
        categories.insert("q2".to_string(), "Realistic".to_string());
        categories.insert("q3".to_string(), "Social".to_string());
        let raw = json!({
            "q1": "9223372036854775807",
            "q2": "9223372036854775807",
            "q3": "5"
        });
        let scores = TraitScores::from_answers(&format_answers(raw.as_object().unwrap(), &categories));

        assert_eq!(scores.get(Trait::Realistic), i64::MAX);
        assert_eq!(scores.dominant(), Trait::Realistic);
    }

    #[test]
    fn test_huge_negative_values_saturate() {
        let scores = TraitScores::from_answers(&answers(&[
            ("Artistic", i64::MIN),
            ("Artistic", -1),
        ]));
        assert_eq!(scores.get(Trait::Artistic), i64::MIN);
    }

    #[test]
    fn test_dominant_picks_highest() {
        let scores = TraitScores::from_answers(&answers(&[
            ("Investigative", 5),
            ("Investigative", 5),
            ("Artistic", 3),
        ]));
        assert_eq!(scores.dominant(), Trait::Investigative);
    }

    #[test]
    fn test_dominant_tie_goes_to_later_trait() {
        let scores = TraitScores::from_answers(&answers(&[("Realistic", 5), ("Enterprising", 5)]));
        assert_eq!(scores.dominant(), Trait::Enterprising);
        assert_eq!(TraitScores::default().dominant(), Trait::Conventional);
    }

    #[test]
    fn test_ranked_is_descending_and_stable() {
        let scores = TraitScores::from_answers(&answers(&[("Artistic", 5), ("Social", 5), ("Realistic", 1)]));
        let ranked: Vec<Trait> = scores.ranked().into_iter().map(|(t, _)| t).collect();
        assert_eq!(&ranked[..3], &[Trait::Artistic, Trait::Social, Trait::Realistic]);
    }

    #[test]
    fn test_to_json_has_all_traits() {
        let json = TraitScores::from_answers(&answers(&[("Social", 3)])).to_json();
        assert_eq!(json["Social"], 3);
        assert_eq!(json["Realistic"], 0);
        assert_eq!(json.as_object().unwrap().len(), 6);
    }
}
