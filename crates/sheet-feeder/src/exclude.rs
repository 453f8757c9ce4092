//! Exclusion filtering: literal substring deletion

/// Literal substrings deleted from every output row
///
/// Parsed from multi-line text: each non-empty line, trimmed, is one literal.
/// Matching is case-sensitive and purely textual, so a short literal also
/// deletes matching text inside longer words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList {
    literals: Vec<String>,
}

impl ExclusionList {
    pub fn parse(text: &str) -> Self {
        Self {
            literals: text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn literals(&self) -> &[String] {
        &self.literals
    }

    /// Delete every occurrence of every literal, in list order
    pub fn apply(&self, row: &str) -> String {
        self.literals
            .iter()
            .fold(row.to_string(), |acc, literal| acc.replace(literal.as_str(), ""))
    }
}

/// Apply the exclusions in `exclude_text` to each row
pub fn filter_exclusions(rows: Vec<String>, exclude_text: &str) -> Vec<String> {
    let exclusions = ExclusionList::parse(exclude_text);
    if exclusions.is_empty() {
        return rows;
    }
    rows.iter().map(|row| exclusions.apply(row)).collect()
}
