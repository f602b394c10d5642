//! Schema normalisation: arbitrary column names → canonical fields.
//!
//! Each input column is offered to the canonical fields in synonym-table
//! order and claimed by the first field whose name or synonym occurs in
//! the column name (case-insensitive). One column feeds at most one field;
//! a field fed by several columns keeps the last one in column order.
//!
//! Usage:
//! ```ignore
//! let place = normalise(&raw, &settings.synonyms);
//! assert_eq!(place.name(), "Red Cross Center");
//! ```

use placemark_common::{parse_number, CanonicalPlace, FieldValue, RawRecord};
use placemark_config::SynonymTable;
use tracing::trace;

/// Normaliser bound to one synonym table.
pub struct SchemaNormaliser<'a> {
    table: &'a SynonymTable,
}

impl<'a> SchemaNormaliser<'a> {
    pub fn new(table: &'a SynonymTable) -> Self {
        Self { table }
    }

    /// The canonical field a column feeds, if any. First declared field wins.
    pub fn match_column(&self, column: &str) -> Option<&'a str> {
        let column_lower = column.to_lowercase();
        self.table
            .entries()
            .iter()
            .find(|e| e.matches(&column_lower))
            .map(|e| e.field.as_str())
    }

    /// Map a raw row onto the canonical schema. Never fails: unmatched
    /// columns are ignored and unfed fields stay empty.
    pub fn normalise(&self, raw: &RawRecord) -> CanonicalPlace {
        let mut place = CanonicalPlace::with_fields(self.table.field_names());

        for (column, value) in raw {
            match self.match_column(column) {
                Some(field) => {
                    trace!(column = %column, field = %field, "Column mapped");
                    place.set(field, cell_value(value));
                }
                None => trace!(column = %column, "Column unmapped"),
            }
        }
        place
    }
}

/// Normalise one raw row against a synonym table.
pub fn normalise(raw: &RawRecord, table: &SynonymTable) -> CanonicalPlace {
    SchemaNormaliser::new(table).normalise(raw)
}

/// Numeric cells become numbers; everything else is title-cased text.
pub fn cell_value(text: &str) -> FieldValue {
    match parse_number(text) {
        Some(n) => FieldValue::Number(n),
        None => FieldValue::Text(title_case(text)),
    }
}

/// Word-initial capitalisation: a cased letter is upper-cased when the
/// preceding character is not a cased letter, lower-cased otherwise.
/// "o'NEIL 1st st" → "O'Neil 1St St".
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased && prev_cased {
            out.extend(c.to_lowercase());
        } else if cased {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
