//! Pure decision helpers over the classifier's category flags.

use super::moderation_models::{EntityType, Priority};
use indexmap::IndexMap;

/// Categories that escalate a report to `critical`.
pub const CRITICAL_CATEGORIES: [&str; 5] = [
    "violence",
    "violence/graphic",
    "self-harm",
    "self-harm/intent",
    "self-harm/instructions",
];

const REASON_PREFIX: &str = "AI Detection: ";
const UNSPECIFIED_VIOLATION: &str = "Unspecified violation";

/// Every category flagged `true`, in the map's iteration order.
pub fn extract_flagged(categories: &IndexMap<String, bool>) -> Vec<String> {
    categories
        .iter()
        .filter(|(_, flagged)| **flagged)
        .map(|(category, _)| category.clone())
        .collect()
}

/// `critical` if any critical category is flagged, otherwise `high`.
///
/// A map with no true entries also lands on `high`.
pub fn priority(categories: &IndexMap<String, bool>) -> Priority {
    let has_critical = CRITICAL_CATEGORIES
        .iter()
        .any(|name| categories.get(*name).copied().unwrap_or(false));

    if has_critical {
        Priority::Critical
    } else {
        Priority::High
    }
}

/// Report reason, e.g. `AI Detection: hate, violence`.
pub fn format_reason(flagged: &[String]) -> String {
    if flagged.is_empty() {
        return format!("{}{}", REASON_PREFIX, UNSPECIFIED_VIOLATION);
    }
    format!("{}{}", REASON_PREFIX, flagged.join(", "))
}

/// Free-text description stored alongside the reason.
pub fn format_description(entity_type: EntityType, flagged: &[String]) -> String {
    format!(
        "Automatic AI moderation flagged this {} for: {}",
        entity_type,
        flagged.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(entries: &[(&str, bool)]) -> IndexMap<String, bool> {
        entries
            .iter()
            .map(|(name, flagged)| (name.to_string(), *flagged))
            .collect()
    }

    #[test]
    fn test_extract_flagged_keeps_input_order() {
        let cats = categories(&[("hate", true), ("violence", false), ("harassment", true)]);
        assert_eq!(extract_flagged(&cats), vec!["hate", "harassment"]);
    }

    #[test]
    fn test_extract_flagged_none_true() {
        let cats = categories(&[("hate", false), ("sexual", false)]);
        assert!(extract_flagged(&cats).is_empty());
    }

    #[test]
    fn test_violence_is_critical() {
        let cats = categories(&[("hate", false), ("violence", true)]);
        assert_eq!(priority(&cats), Priority::Critical);
    }

    #[test]
    fn test_self_harm_intent_is_critical() {
        let cats = categories(&[("self-harm/intent", true), ("harassment", false)]);
        assert_eq!(priority(&cats), Priority::Critical);
    }

    #[test]
    fn test_harassment_is_high() {
        let cats = categories(&[("harassment", true)]);
        assert_eq!(priority(&cats), Priority::High);
    }

    #[test]
    fn test_critical_category_present_but_false_is_high() {
        let cats = categories(&[("violence", false), ("self-harm", false), ("hate", true)]);
        assert_eq!(priority(&cats), Priority::High);
    }

    #[test]
    fn test_no_flags_falls_back_to_high() {
        assert_eq!(priority(&IndexMap::new()), Priority::High);
    }

    #[test]
    fn test_format_reason_empty() {
        assert_eq!(format_reason(&[]), "AI Detection: Unspecified violation");
    }

    #[test]
    fn test_format_reason_joins_categories() {
        let flagged = vec!["hate".to_string(), "violence".to_string()];
        assert_eq!(format_reason(&flagged), "AI Detection: hate, violence");
    }

    #[test]
    fn test_format_description() {
        let flagged = vec!["sexual".to_string()];
        assert_eq!(
            format_description(EntityType::Comment, &flagged),
            "Automatic AI moderation flagged this comment for: sexual"
        );
    }
}
