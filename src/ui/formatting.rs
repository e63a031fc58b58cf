use colored::Colorize;
use repcat_core::{level_description, CatalogItem, FilterState, PageLabel, ViewMode};

/// Format the instrument list for display
pub fn format_instrumentation(instruments: &[String]) -> String {
    if instruments.is_empty() {
        "-".to_string()
    } else {
        instruments.join(", ")
    }
}

/// Format one result line; saved items are starred
pub fn format_item(item: &CatalogItem, saved: bool, view_mode: ViewMode) -> String {
    let star = if saved { "★ " } else { "" };
    let duration = item.duration.as_deref().unwrap_or("-");
    let year = item.year().map(|y| y.to_string()).unwrap_or_else(|| "?".to_string());

    match view_mode {
        ViewMode::List => format!(
            "{}{} | {} | {} | {} | {} | {}",
            star,
            item.title.bold(),
            item.composer_full_name,
            item.level,
            format_instrumentation(&item.instrumentation),
            year,
            duration
        ),
        ViewMode::Grid => {
            let mut lines = vec![format!("### {}{}", star, item.title.bold())];
            lines.push(format!("- **Composer:** {}", item.composer_full_name));
            lines.push(format!(
                "- **Level:** {} ({})",
                item.level,
                level_description(&item.level).dimmed()
            ));
            lines.push(format!(
                "- **Instrumentation:** {}",
                format_instrumentation(&item.instrumentation)
            ));
            if !item.nationality.is_empty() {
                lines.push(format!("- **Nationality:** {}", item.nationality.join(", ")));
            }
            lines.push(format!("- **Year:** {}", year));
            lines.push(format!("- **Duration:** {}", duration));

            let tags: Vec<&str> = item.technique_tags().collect();
            if !tags.is_empty() {
                lines.push(format!("- **Technique:** {}", tags.join(", ")));
            }
            lines.join("\n")
        }
    }
}

/// Format the page control; the current page is highlighted
pub fn format_page_labels(labels: &[PageLabel], current: usize) -> String {
    labels
        .iter()
        .map(|label| match label.page() {
            Some(n) if n == current => format!("[{}]", n).bold().to_string(),
            Some(n) => n.to_string(),
            None => label.to_string().dimmed().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per active constraint
pub fn format_active_filters(state: &FilterState) -> Vec<String> {
    let mut lines = Vec::new();
    if !state.has_filters() {
        return lines;
    }

    if !state.query.is_empty() {
        lines.push(format!("- **Search:** {}", state.query));
    }

    for (name, values) in [
        ("Composer", &state.composers),
        ("Level", &state.levels),
        ("Instrumentation", &state.instruments),
        ("Country", &state.countries),
        ("Technique", &state.technique_focus),
    ] {
        if !values.is_empty() {
            let joined: Vec<&str> = values.iter().map(String::as_str).collect();
            lines.push(format!("- **{}:** {}", name, joined.join(" OR ")));
        }
    }

    if state.years != state.year_bounds {
        lines.push(format!("- **Years:** {}–{}", state.years.min, state.years.max));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use repcat_core::{apply_action, Action, YearRange};

    #[test]
    fn test_format_instrumentation() {
        assert_eq!(format_instrumentation(&[]), "-");
        assert_eq!(
            format_instrumentation(&["Cello".to_string(), "Piano".to_string()]),
            "Cello, Piano"
        );
    }

    #[test]
    fn test_format_page_labels() {
        colored::control::set_override(false);
        let labels = vec![
            PageLabel::Page(1),
            PageLabel::Ellipsis,
            PageLabel::Page(6),
            PageLabel::Page(7),
            PageLabel::Page(8),
            PageLabel::Ellipsis,
            PageLabel::Page(10),
        ];
        assert_eq!(format_page_labels(&labels, 7), "1 … 6 [7] 8 … 10");
    }

    #[test]
    fn test_format_active_filters() {
        let state = FilterState::default();
        assert!(format_active_filters(&state).is_empty());

        let state = apply_action(&state, Action::ToggleLevel("Beginner".into()));
        let state = apply_action(&state, Action::ToggleLevel("Advanced".into()));
        let state = apply_action(&state, Action::SetYearRange(YearRange::new(1800, 1900)));
        let lines = format_active_filters(&state);
        assert_eq!(lines[0], "- **Level:** Advanced OR Beginner");
        assert_eq!(lines[1], "- **Years:** 1800–1900");
    }
}
