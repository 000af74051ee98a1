//! Language breakdown from byte counts.

use crate::record::Languages;
use serde_json::Value;

/// Computes the primary language and percentage breakdown.
///
/// Percentages are rounded to one decimal place, half to even on the exact
/// binary value, so they need not sum to exactly 100.0. The breakdown keeps
/// source order. The primary language is the first one, in source order,
/// with the maximum byte count.
#[must_use]
pub fn language_breakdown(bytes: &[(String, u64)]) -> Languages {
    let total: u64 = bytes.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return Languages::default();
    }

    let mut primary: Option<(&str, u64)> = None;
    for (language, count) in bytes {
        if primary.map_or(true, |(_, best)| *count > best) {
            primary = Some((language.as_str(), *count));
        }
    }

    let breakdown = bytes
        .iter()
        .map(|(language, count)| {
            let percentage = *count as f64 / total as f64 * 100.0;
            (language.clone(), Value::from(round_one_decimal(percentage)))
        })
        .collect();

    Languages {
        primary: primary.map(|(language, _)| language.to_string()),
        breakdown,
    }
}

/// Rounds through precision formatting: exact ties go to even (`0.25` to `0.2`).
fn round_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(entries: &[(&str, u64)]) -> Vec<(String, u64)> {
        entries
            .iter()
            .map(|(language, count)| (language.to_string(), *count))
            .collect()
    }

    #[test]
    fn computes_primary_and_percentages() {
        let languages = language_breakdown(&bytes(&[("Python", 8000), ("JavaScript", 2000)]));

        assert_eq!(languages.primary.as_deref(), Some("Python"));
        assert_eq!(languages.breakdown["Python"], 80.0);
        assert_eq!(languages.breakdown["JavaScript"], 20.0);
    }

    #[test]
    fn primary_is_not_necessarily_first() {
        let languages = language_breakdown(&bytes(&[("Shell", 10), ("Rust", 900), ("C", 90)]));
        assert_eq!(languages.primary.as_deref(), Some("Rust"));
    }

    #[test]
    fn first_maximum_wins_ties() {
        let languages = language_breakdown(&bytes(&[("Go", 500), ("Rust", 500)]));
        assert_eq!(languages.primary.as_deref(), Some("Go"));
    }

    #[test]
    fn percentages_sum_to_about_one_hundred() {
        let languages =
            language_breakdown(&bytes(&[("Python", 855), ("Shell", 102), ("Dockerfile", 43)]));
        let sum: f64 = languages.breakdown.values().filter_map(Value::as_f64).sum();

        assert!((sum - 100.0).abs() < 0.2, "sum was {sum}");
        assert_eq!(languages.breakdown["Python"], 85.5);
        assert_eq!(languages.breakdown["Shell"], 10.2);
        assert_eq!(languages.breakdown["Dockerfile"], 4.3);
    }

    #[test]
    fn empty_input_has_no_primary() {
        let languages = language_breakdown(&[]);
        assert!(languages.primary.is_none());
        assert!(languages.breakdown.is_empty());
    }

    #[test]
    fn zero_bytes_has_no_primary() {
        let languages = language_breakdown(&bytes(&[("Markdown", 0)]));
        assert!(languages.primary.is_none());
        assert!(languages.breakdown.is_empty());
    }

    #[test]
    fn rounds_ties_to_even() {
        let languages = language_breakdown(&bytes(&[("A", 1), ("B", 399)]));
        assert_eq!(languages.breakdown["A"], 0.2);
        assert_eq!(languages.breakdown["B"], 99.8);

        assert_eq!(round_one_decimal(0.25), 0.2);
        assert_eq!(round_one_decimal(0.15), 0.1);
        assert_eq!(round_one_decimal(12.25), 12.2);
        assert_eq!(round_one_decimal(0.35), 0.3);
        assert_eq!(round_one_decimal(85.46), 85.5);
    }

    #[test]
    fn breakdown_keeps_source_order() {
        let languages =
            language_breakdown(&bytes(&[("TypeScript", 700), ("CSS", 200), ("HTML", 100)]));
        let keys: Vec<_> = languages.breakdown.keys().map(String::as_str).collect();
        assert_eq!(keys, ["TypeScript", "CSS", "HTML"]);

        let json = serde_json::to_string(&languages).unwrap();
        assert!(json.contains(r#"{"TypeScript":70.0,"CSS":20.0,"HTML":10.0}"#), "{json}");
    }
}
