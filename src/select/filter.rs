use super::option::SelectOption;

/// Case-insensitive substring match over label, subtitle and id.
///
/// Matches keep the relative order of `options`. An empty or all-whitespace
/// query matches everything.
pub fn filter_options<'a>(options: &'a [SelectOption], query: &str) -> Vec<&'a SelectOption> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return options.iter().collect();
    }
    options
        .iter()
        .filter(|option| matches(option, &needle))
        .collect()
}

fn matches(option: &SelectOption, needle: &str) -> bool {
    option.label.to_lowercase().contains(needle)
        || option
            .subtitle
            .as_deref()
            .is_some_and(|s| s.to_lowercase().contains(needle))
        || option.id.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff() -> Vec<SelectOption> {
        vec![
            SelectOption::new("1", "Alice").with_subtitle("HR Manager"),
            SelectOption::new("2", "Bob").with_subtitle("Payroll"),
            SelectOption::new("emp-3", "Roberta").with_subtitle("Engineering"),
        ]
    }

    fn labels(found: Vec<&SelectOption>) -> Vec<&str> {
        found.into_iter().map(|o| o.label.as_str()).collect()
    }

    #[test]
    fn matches_label_case_insensitively() {
        let options = vec![SelectOption::new("1", "Alice"), SelectOption::new("2", "Bob")];
        assert_eq!(labels(filter_options(&options, "bo")), vec!["Bob"]);
        assert_eq!(labels(filter_options(&options, "BO")), vec!["Bob"]);
    }

    #[test]
    fn matches_subtitle_and_id() {
        let options = staff();
        assert_eq!(labels(filter_options(&options, "payroll")), vec!["Bob"]);
        assert_eq!(labels(filter_options(&options, "EMP-")), vec!["Roberta"]);
    }

    #[test]
    fn preserves_input_order() {
        let options = staff();
        assert_eq!(labels(filter_options(&options, "b")), vec!["Bob", "Roberta"]);
    }

    #[test]
    fn empty_query_matches_everything() {
        let options = staff();
        assert_eq!(filter_options(&options, "").len(), 3);
        assert_eq!(filter_options(&options, "   ").len(), 3);
    }
}
