//! Human-readable marker text.

use chrono::NaiveDateTime;

/// Short display names for primary descriptions that read poorly when
/// merely proper-cased.
const RELABELS: &[(&str, &str)] = &[
    ("CONCEALED CARRY LICENSE VIOLATION", "Concealed Carry Violation"),
    ("CRIM SEXUAL ASSAULT", "Sexual Assault"),
    ("CRIMINAL DAMAGE", "Damage"),
    ("MOTOR VEHICLE THEFT", "Car Stolen"),
    ("PUBLIC PEACE VIOLATION", "Disturb Peace"),
    ("WEAPONS VIOLATION", "Weapon"),
    ("OTHER NARCOTIC VIOLATION", "Narcotics"),
];

/// Words kept lower case unless they start the text.
const SMALL_WORDS: &[&str] = &[
    "of", "a", "the", "and", "an", "or", "nor", "but", "is", "if", "then", "else", "when", "at",
    "from", "by", "on", "off", "for", "in", "out", "over", "to", "into", "with",
];

/// Display text for a dataset primary description.
///
/// Known descriptions get a short relabel; anything else is proper-cased.
/// A missing description shows as `Unknown`.
#[must_use]
pub fn display_description(primary: Option<&str>) -> String {
    let Some(primary) = primary.map(str::trim).filter(|p| !p.is_empty()) else {
        return "Unknown".to_string();
    };

    RELABELS
        .iter()
        .find(|(raw, _)| raw.eq_ignore_ascii_case(primary))
        .map_or_else(|| proper_case(primary), |(_, label)| (*label).to_string())
}

/// Capitalizes each word, leaving [`SMALL_WORDS`] lower case after the
/// first word.
#[must_use]
pub fn proper_case(text: &str) -> String {
    text.split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i > 0 && SMALL_WORDS.contains(&lower.as_str()) {
                return lower;
            }
            let mut chars = lower.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"<description>: <Ddd M/D @ H:MM AM>"`, or just the description when the
/// occurrence time is unknown.
#[must_use]
pub fn incident_label(description: &str, occurred_at: Option<NaiveDateTime>) -> String {
    occurred_at.map_or_else(
        || description.to_string(),
        |at| format!("{description}: {}", at.format("%a %-m/%-d @ %-I:%M %p")),
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn relabels_known_descriptions() {
        assert_eq!(display_description(Some("MOTOR VEHICLE THEFT")), "Car Stolen");
        assert_eq!(display_description(Some("CRIM SEXUAL ASSAULT")), "Sexual Assault");
        assert_eq!(display_description(Some("WEAPONS VIOLATION")), "Weapon");
    }

    #[test]
    fn proper_cases_everything_else() {
        assert_eq!(display_description(Some("ROBBERY")), "Robbery");
        assert_eq!(
            display_description(Some("INTERFERENCE WITH PUBLIC OFFICER")),
            "Interference with Public Officer"
        );
        assert_eq!(
            display_description(Some("OFFENSE INVOLVING CHILDREN")),
            "Offense Involving Children"
        );
    }

    #[test]
    fn missing_description_is_unknown() {
        assert_eq!(display_description(None), "Unknown");
        assert_eq!(display_description(Some("  ")), "Unknown");
    }

    #[test]
    fn proper_case_keeps_leading_small_word_capitalized() {
        assert_eq!(proper_case("THE  BATTERY"), "The Battery");
        assert_eq!(proper_case(""), "");
    }

    #[test]
    fn formats_label_with_time() {
        let at = NaiveDate::from_ymd_opt(2024, 1, 20)
            .unwrap()
            .and_hms_opt(0, 5, 0)
            .unwrap();
        assert_eq!(incident_label("Theft", Some(at)), "Theft: Sat 1/20 @ 12:05 AM");
        assert_eq!(incident_label("Theft", None), "Theft");
    }
}
