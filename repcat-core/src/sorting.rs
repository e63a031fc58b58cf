use crate::levels::Level;
use crate::models::CatalogItem;
use crate::normalize::normalize;
use std::cmp::Ordering;

/// Sortable columns of the catalog listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Title,
    Composer,
    Level,
    Duration,
    /// List view only
    Instrumentation,
}

impl SortField {
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Composer => "composer",
            SortField::Level => "level",
            SortField::Duration => "duration",
            SortField::Instrumentation => "instrumentation",
        }
    }

    pub fn from_query_value(s: &str) -> Option<SortField> {
        match s {
            "title" => Some(SortField::Title),
            "composer" => Some(SortField::Composer),
            "level" => Some(SortField::Level),
            "duration" => Some(SortField::Duration),
            "instrumentation" => Some(SortField::Instrumentation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn from_query_value(s: &str) -> Option<SortDirection> {
        match s {
            "asc" => Some(SortDirection::Ascending),
            "desc" => Some(SortDirection::Descending),
            _ => None,
        }
    }

    /// Apply this direction to an ascending ordering
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// Sort controller transition
///
/// Selecting the current field while ascending flips to descending; any
/// other selection sorts the requested field ascending.
pub fn toggle_sort(current: Option<SortSpec>, field: SortField) -> SortSpec {
    match current {
        Some(spec) if spec.field == field && spec.direction == SortDirection::Ascending => {
            SortSpec::new(field, SortDirection::Descending)
        }
        _ => SortSpec::new(field, SortDirection::Ascending),
    }
}

/// Return a freshly ordered sequence; the input is left untouched
///
/// The sort is stable, so equal items keep their incoming order.
pub fn sort_items<'a>(items: &[&'a CatalogItem], spec: SortSpec) -> Vec<&'a CatalogItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| compare(a, b, spec));
    sorted
}

/// Compare two items by the given field and direction
pub fn compare(a: &CatalogItem, b: &CatalogItem, spec: SortSpec) -> Ordering {
    let direction = spec.direction;
    match spec.field {
        SortField::Title => compare_title(a, b, direction),
        SortField::Composer => compare_composer(a, b, direction),
        SortField::Level => compare_level(a, b, direction),
        SortField::Duration => compare_duration(a, b, direction),
        SortField::Instrumentation => compare_instrumentation(a, b, direction),
    }
}

pub fn compare_title(a: &CatalogItem, b: &CatalogItem, direction: SortDirection) -> Ordering {
    direction.apply(compare_text(&a.title, &b.title))
}

/// Composer order is keyed on last name
pub fn compare_composer(a: &CatalogItem, b: &CatalogItem, direction: SortDirection) -> Ordering {
    direction.apply(compare_text(&a.composer_last_name, &b.composer_last_name))
}

/// Curriculum order; levels outside the vocabulary come before "Early Beginner"
pub fn compare_level(a: &CatalogItem, b: &CatalogItem, direction: SortDirection) -> Ordering {
    direction.apply(level_rank(&a.level).cmp(&level_rank(&b.level)))
}

/// Duration order; unknown durations go last in either direction
pub fn compare_duration(a: &CatalogItem, b: &CatalogItem, direction: SortDirection) -> Ordering {
    match (a.duration_seconds(), b.duration_seconds()) {
        (Some(x), Some(y)) => direction.apply(x.cmp(&y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Instrument count first, then the second instrument's name
pub fn compare_instrumentation(
    a: &CatalogItem,
    b: &CatalogItem,
    direction: SortDirection,
) -> Ordering {
    let second = |item: &CatalogItem| item.instrumentation.get(1).cloned().unwrap_or_default();

    let ordering = a
        .instrumentation
        .len()
        .cmp(&b.instrumentation.len())
        .then_with(|| compare_text(&second(a), &second(b)));
    direction.apply(ordering)
}

/// Locale-style string order
/// - Primary: accent- and case-insensitive
/// - Secondary: raw string, so the order stays total
pub fn compare_text(a: &str, b: &str) -> Ordering {
    normalize(a)
        .cmp(&normalize(b))
        .then_with(|| a.cmp(b))
}

/// Position in the curriculum ordering; None sorts before every known level
fn level_rank(level: &str) -> Option<usize> {
    Level::from_label(level).map(Level::rank)
}
