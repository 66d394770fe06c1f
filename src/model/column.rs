//! Column definitions for the data table
//!
//! A column couples a raw value accessor (used for sorting and filtering)
//! with an optional custom body renderer (used for display and search).

use std::cmp::Ordering;

/// Per-column behaviour flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnOptions {
    /// Whether the column offers values in the filter editor
    pub filter: bool,
    /// Whether the column can be sorted
    pub sort: bool,
    /// Whether a third sort toggle returns the column to unsorted
    pub sort_third_click_reset: bool,
    /// Whether the column takes part in the search
    pub searchable: bool,
}

impl ColumnOptions {
    pub const DEFAULT: ColumnOptions = ColumnOptions {
        filter: true,
        sort: true,
        sort_third_click_reset: false,
        searchable: true,
    };

    /// Sortable, non-filterable column whose sort resets on the third toggle
    pub const NUMERIC: ColumnOptions = ColumnOptions {
        filter: false,
        sort: true,
        sort_third_click_reset: true,
        searchable: true,
    };
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Raw cell value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Text(Option<&'a str>),
    Number(Option<f64>),
}

impl CellValue<'_> {
    /// Default display string when a column has no custom renderer
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(text) => text.unwrap_or_default().to_string(),
            CellValue::Number(Some(n)) => n.to_string(),
            CellValue::Number(None) => String::new(),
        }
    }

    /// Total order used for sorting: absent values first, NaN counted as absent
    pub fn sort_cmp(&self, other: &CellValue<'_>) -> Ordering {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            (CellValue::Number(a), CellValue::Number(b)) => match (number(*a), number(*b)) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            (CellValue::Text(_), CellValue::Number(_)) => Ordering::Less,
            (CellValue::Number(_), CellValue::Text(_)) => Ordering::Greater,
        }
    }
}

/// A number that takes part in ordering; NaN sorts with the absent values
fn number(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// A table column over rows of type `R`
pub struct ColumnDef<R> {
    /// Field name, stable identifier of the column
    pub name: &'static str,
    /// Header text
    pub label: &'static str,
    pub options: ColumnOptions,
    pub value: fn(&R) -> CellValue<'_>,
    pub render: Option<fn(&R) -> String>,
}

impl<R> ColumnDef<R> {
    /// Column shown as its raw value with default options
    pub const fn plain(
        name: &'static str,
        label: &'static str,
        value: fn(&R) -> CellValue<'_>,
    ) -> Self {
        Self {
            name,
            label,
            options: ColumnOptions::DEFAULT,
            value,
            render: None,
        }
    }

    /// Column with explicit options and a custom body renderer
    pub const fn rendered(
        name: &'static str,
        label: &'static str,
        options: ColumnOptions,
        value: fn(&R) -> CellValue<'_>,
        render: fn(&R) -> String,
    ) -> Self {
        Self {
            name,
            label,
            options,
            value,
            render: Some(render),
        }
    }

    /// Display string for a row
    pub fn display(&self, row: &R) -> String {
        match self.render {
            Some(render) => render(row),
            None => (self.value)(row).display(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Star {
        name: &'static str,
        mag: Option<f64>,
    }

    fn star_name(s: &Star) -> CellValue<'_> {
        CellValue::Text(Some(s.name))
    }

    fn star_mag(s: &Star) -> CellValue<'_> {
        CellValue::Number(s.mag)
    }

    fn render_mag(s: &Star) -> String {
        s.mag.map(|m| format!("{:.1} mag", m)).unwrap_or_default()
    }

    #[test]
    fn test_plain_column_displays_raw_value() {
        let column = ColumnDef::plain("name", "Name", star_name);
        let star = Star {
            name: "Vega",
            mag: Some(0.03),
        };
        assert_eq!(column.display(&star), "Vega");
        assert_eq!(column.options, ColumnOptions::DEFAULT);
    }

    #[test]
    fn test_rendered_column_uses_renderer() {
        let column = ColumnDef::rendered("mag", "Mag", ColumnOptions::NUMERIC, star_mag, render_mag);
        let star = Star {
            name: "Sirius",
            mag: Some(-1.46),
        };
        assert_eq!(column.display(&star), "-1.5 mag");
        assert!(!column.options.filter);
        assert!(column.options.sort_third_click_reset);
    }

    #[test]
    fn test_sort_cmp_puts_absent_first() {
        let none = CellValue::Number(None);
        let one = CellValue::Number(Some(1.0));
        let two = CellValue::Number(Some(2.0));
        assert_eq!(none.sort_cmp(&one), Ordering::Less);
        assert_eq!(two.sort_cmp(&one), Ordering::Greater);
        assert_eq!(
            CellValue::Number(Some(f64::NAN)).sort_cmp(&one),
            Ordering::Less
        );
        assert_eq!(
            CellValue::Number(Some(f64::NAN)).sort_cmp(&none),
            Ordering::Equal
        );
        assert_eq!(
            CellValue::Text(None).sort_cmp(&CellValue::Text(Some("a"))),
            Ordering::Less
        );
    }

    #[test]
    fn test_default_display() {
        assert_eq!(CellValue::Text(None).display(), "");
        assert_eq!(CellValue::Number(Some(2.5)).display(), "2.5");
        assert_eq!(CellValue::Number(None).display(), "");
    }
}
