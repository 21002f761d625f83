//! Rendering of a [`ConstraintSet`] as a Socrata `SoQL` `$where` clause.
//!
//! Column names are those of the City of Chicago "Crimes - One year prior
//! to present" dataset, including its misspelled `_primary_decsription`.

use crime_nearby_query_models::{ConstraintSet, QueryConstraint};

/// Dataset column holding the incident timestamp.
pub const DATE_COLUMN: &str = "date_of_occurrence";

/// Renders `set` as a `$where` clause, joining constraints with `AND`.
#[must_use]
pub fn to_soql_where(set: &ConstraintSet) -> String {
    set.iter()
        .map(render_constraint)
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn render_constraint(constraint: &QueryConstraint) -> String {
    match constraint {
        QueryConstraint::LocationDescriptionIn(values) => {
            format!("_location_description in ({})", quote_list(values))
        }
        QueryConstraint::NonDomestic => "domestic='N'".to_string(),
        QueryConstraint::OccurredOnOrAfter(date) => {
            format!("{DATE_COLUMN} >= '{}'", date.format("%Y-%m-%d"))
        }
        QueryConstraint::DayOfWeekIn(weekday_type) => {
            let codes = weekday_type
                .socrata_day_codes()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            format!("date_extract_dow({DATE_COLUMN}) in ({codes})")
        }
        QueryConstraint::PrimaryDescriptionNotIn(values) => {
            format!("_primary_decsription not in ({})", quote_list(values))
        }
        // within_box(location, lat, lon, lat, lon) of two opposite corners.
        QueryConstraint::WithinBox(b) => format!(
            "within_box(location,{},{},{},{})",
            b.south, b.west, b.north, b.east
        ),
    }
}

fn quote_list(values: &[String]) -> String {
    values
        .iter()
        .map(|value| format!("'{}'", value.replace('\'', "''")))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crime_nearby_query_models::{BoundingBox, FilterRequest};
    use crime_nearby_temporal::WeekdayType;

    use super::*;
    use crate::{QueryOptions, assemble_constraints};

    fn bbox() -> BoundingBox {
        BoundingBox::new(-87.65, 41.87, -87.61, 41.88).unwrap()
    }

    #[test]
    fn renders_base_clause() {
        let request = FilterRequest {
            bounding_box: bbox(),
            last_20_days: false,
            weekday_type: false,
        };
        let today = NaiveDate::from_ymd_opt(2024, 3, 13).unwrap();
        let set = assemble_constraints(&request, today, &QueryOptions::default());

        assert_eq!(
            to_soql_where(&set),
            "_location_description in ('STREET','SIDEWALK') AND domestic='N' \
             AND within_box(location,41.87,-87.65,41.88,-87.61)"
        );
    }

    #[test]
    fn renders_recency_and_weekday_clauses() {
        let mut set = ConstraintSet::default();
        set.push(QueryConstraint::OccurredOnOrAfter(
            NaiveDate::from_ymd_opt(2024, 2, 7).unwrap(),
        ));
        set.push(QueryConstraint::DayOfWeekIn(WeekdayType::Weekday));
        set.push(QueryConstraint::DayOfWeekIn(WeekdayType::Weekend));

        assert_eq!(
            to_soql_where(&set),
            "date_of_occurrence >= '2024-02-07' \
             AND date_extract_dow(date_of_occurrence) in (1,2,3,4,5) \
             AND date_extract_dow(date_of_occurrence) in (0,6)"
        );
    }

    #[test]
    fn escapes_quotes_in_exclusions() {
        let mut set = ConstraintSet::default();
        set.push(QueryConstraint::PrimaryDescriptionNotIn(vec![
            "GAMBLING".to_string(),
            "O'HARE".to_string(),
        ]));

        assert_eq!(
            to_soql_where(&set),
            "_primary_decsription not in ('GAMBLING','O''HARE')"
        );
    }

    #[test]
    fn empty_set_renders_empty_clause() {
        assert_eq!(to_soql_where(&ConstraintSet::default()), "");
    }
}
