//! Sort directive derivation
//!
//! Turns user supplied `sort_column` / `sort_order` strings into a normalized
//! `"<column> <ASC|DESC>"` directive. Only an exact, case-insensitive `"ASC"`
//! escapes the descending default.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Sort direction of a directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// `Asc` when `input` equals `"ASC"` ignoring case, `Desc` for anything
    /// else, including `None`, `""` and `"Ascending"`.
    pub fn from_input(input: Option<&str>) -> Self {
        match input {
            Some(order) if order.eq_ignore_ascii_case("ASC") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::Desc
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized ordering key handed to a source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortDirective {
    column: String,
    order: SortOrder,
}

impl SortDirective {
    pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
        Self {
            column: column.into(),
            order,
        }
    }

    /// Build a directive from raw request input.
    ///
    /// `sort_column` is used verbatim unless it is `None`, empty or only
    /// whitespace, in which case `default_column` is used instead.
    pub fn build(sort_column: Option<&str>, sort_order: Option<&str>, default_column: &str) -> Self {
        let column = match sort_column {
            Some(column) if !column.trim().is_empty() => column,
            _ => default_column,
        };

        Self::new(column, SortOrder::from_input(sort_order))
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn is_ascending(&self) -> bool {
        self.order == SortOrder::Asc
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.column, self.order)
    }
}

/// String form of [`SortDirective::build`].
pub fn build_sort_directive(
    sort_column: Option<&str>,
    sort_order: Option<&str>,
    default_column: &str,
) -> String {
    SortDirective::build(sort_column, sort_order, default_column).to_string()
}

/// Compare a requested column name with a canonical one, ignoring ASCII case
/// and underscores, so `"CreatedAt"`, `"createdAt"` and `"created_at"` all
/// name the same column.
pub fn column_name_eq(requested: &str, canonical: &str) -> bool {
    let mut left = requested.bytes().filter(|b| *b != b'_');
    let mut right = canonical.bytes().filter(|b| *b != b'_');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(&b) => continue,
            _ => return false,
        }
    }
}
