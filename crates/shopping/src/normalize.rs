/// Fold free text for merge-key comparison: lower-case, trim, and collapse
/// internal whitespace runs to a single space.
///
/// Not unicode canonicalization; plurals and synonyms stay distinct.
pub fn normalize_key(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Normalized unit, with blank units folded into "no unit"
pub fn normalize_unit(unit: Option<&str>) -> Option<String> {
    unit.map(normalize_key).filter(|u| !u.is_empty())
}

/// Merge key for one shopping-list line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeKey {
    pub name: String,
    pub unit: Option<String>,
}

impl MergeKey {
    pub fn new(name: &str, unit: Option<&str>) -> Self {
        Self {
            name: normalize_key(name),
            unit: normalize_unit(unit),
        }
    }
}
