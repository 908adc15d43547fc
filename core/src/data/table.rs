use crate::prelude::{AttributeValue, CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Storage type of an attribute column, mirroring the dBase field kinds we keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Text,
    Number,
    Integer,
    Bool,
    /// Calendar date held as `YYYY-MM-DD` text.
    Date,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub kind: ColumnKind,
    /// Field width in characters.
    pub width: u8,
    /// Decimal places for `Number` columns.
    pub decimals: u8,
}

impl ColumnDef {
    pub fn text(name: impl Into<String>, width: u8) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Text,
            width,
            decimals: 0,
        }
    }

    pub fn number(name: impl Into<String>, width: u8, decimals: u8) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Number,
            width,
            decimals,
        }
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Integer,
            width: 11,
            decimals: 0,
        }
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Bool,
            width: 1,
            decimals: 0,
        }
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Date,
            width: 8,
            decimals: 0,
        }
    }

    /// Convert user input into a value of this column's kind.
    ///
    /// Blank input clears the cell.
    pub fn parse(&self, input: &str) -> CoreResult<AttributeValue> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(AttributeValue::Null);
        }
        match self.kind {
            ColumnKind::Text => Ok(AttributeValue::Text(trimmed.to_string())),
            ColumnKind::Number => trimmed
                .parse::<f64>()
                .map(AttributeValue::Float)
                .map_err(|_| self.reject(trimmed, "a number")),
            ColumnKind::Integer => trimmed
                .parse::<i64>()
                .map(AttributeValue::Int)
                .map_err(|_| self.reject(trimmed, "an integer")),
            ColumnKind::Bool => match trimmed.to_ascii_lowercase().as_str() {
                "t" | "y" | "true" | "yes" | "1" => Ok(AttributeValue::Bool(true)),
                "f" | "n" | "false" | "no" | "0" => Ok(AttributeValue::Bool(false)),
                _ => Err(self.reject(trimmed, "true or false")),
            },
            ColumnKind::Date => parse_date(trimmed)
                .map(|(year, month, day)| AttributeValue::Text(format_date(year, month, day)))
                .ok_or_else(|| self.reject(trimmed, "a date (YYYY-MM-DD)")),
        }
    }

    fn reject(&self, input: &str, expected: &str) -> CoreError {
        CoreError::InvalidInput(format!(
            "column '{}' expects {}, got '{}'",
            self.name, expected, input
        ))
    }
}

/// Read `YYYY-MM-DD`, `YYYY/MM/DD` or the dBase form `YYYYMMDD` as (year, month, day).
pub fn parse_date(text: &str) -> Option<(u32, u32, u32)> {
    let text = text.trim();
    let (year, month, day) = if text.len() == 8 && text.bytes().all(|b| b.is_ascii_digit()) {
        (&text[0..4], &text[4..6], &text[6..8])
    } else {
        let mut parts = text.split(|c| c == '-' || c == '/');
        let fields = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() || fields.0.len() != 4 {
            return None;
        }
        fields
    };
    if ![year, month, day].iter().all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    let year: u32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some((year, month, day))
}

pub fn format_date(year: u32, month: u32, day: u32) -> String {
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Row-major attribute table; one row per point feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeTable {
    columns: Vec<ColumnDef>,
    rows: Vec<Vec<AttributeValue>>,
}

impl AttributeTable {
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<AttributeValue>) -> CoreResult<()> {
        if row.len() != self.columns.len() {
            return Err(CoreError::InvalidInput(format!(
                "row has {} cells, table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row(&self, row: usize) -> Option<&[AttributeValue]> {
        self.rows.get(row).map(|r| r.as_slice())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[AttributeValue]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Column position by name; an exact match wins over a case-insensitive one.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .or_else(|| {
                self.columns
                    .iter()
                    .position(|c| c.name.eq_ignore_ascii_case(name))
            })
    }

    pub fn require_column(&self, name: &str) -> CoreResult<usize> {
        self.column_index(name)
            .ok_or_else(|| CoreError::ColumnNotFound(name.to_string()))
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&AttributeValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&AttributeValue> {
        self.column_index(column).and_then(|col| self.cell(row, col))
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: AttributeValue) -> CoreResult<()> {
        let len = self.rows.len();
        let columns = self.columns.len();
        let cells = self
            .rows
            .get_mut(row)
            .ok_or(CoreError::IndexOutOfRange { index: row, len })?;
        let cell = cells.get_mut(col).ok_or(CoreError::IndexOutOfRange {
            index: col,
            len: columns,
        })?;
        *cell = value;
        Ok(())
    }

    /// Parse `input` with the column's kind and store it.
    pub fn set_from_text(&mut self, row: usize, col: usize, input: &str) -> CoreResult<AttributeValue> {
        let def = self.columns.get(col).ok_or(CoreError::IndexOutOfRange {
            index: col,
            len: self.columns.len(),
        })?;
        let value = def.parse(input)?;
        self.set_cell(row, col, value.clone())?;
        Ok(value)
    }

    /// Append a column filled with nulls; returns its index.
    pub fn add_column(&mut self, def: ColumnDef) -> CoreResult<usize> {
        if self.column_index(&def.name).is_some() {
            return Err(CoreError::InvalidInput(format!(
                "column '{}' already exists",
                def.name
            )));
        }
        self.columns.push(def);
        for row in &mut self.rows {
            row.push(AttributeValue::Null);
        }
        Ok(self.columns.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AttributeTable {
        let mut table = AttributeTable::new(vec![
            ColumnDef::text("ID", 20),
            ColumnDef::number("value", 10, 2),
            ColumnDef::integer("count"),
        ]);
        table
            .push_row(vec![
                AttributeValue::Null,
                AttributeValue::Float(1.5),
                AttributeValue::Int(3),
            ])
            .unwrap();
        table
            .push_row(vec![
                AttributeValue::Text("B".into()),
                AttributeValue::Null,
                AttributeValue::Int(4),
            ])
            .unwrap();
        table
    }

    #[test]
    fn column_lookup_is_case_insensitive() {
        let table = sample();
        assert_eq!(table.column_index("id"), Some(0));
        assert_eq!(table.column_index("VALUE"), Some(1));
        assert_eq!(table.column_index("missing"), None);
        assert!(matches!(
            table.require_column("missing"),
            Err(CoreError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn date_columns_normalise_input() {
        let column = ColumnDef::date("when");
        assert_eq!(column.parse("20210302").unwrap(), AttributeValue::Text("2021-03-02".into()));
        assert_eq!(column.parse("2021/3/2").unwrap(), AttributeValue::Text("2021-03-02".into()));
        assert_eq!(column.parse(" ").unwrap(), AttributeValue::Null);
        assert!(matches!(column.parse("2021-13-01"), Err(CoreError::InvalidInput(_))));
        assert!(matches!(column.parse("yesterday"), Err(CoreError::InvalidInput(_))));
        assert_eq!(parse_date("1999-12-31"), Some((1999, 12, 31)));
        assert_eq!(parse_date("99-12-31"), None);
    }

    #[test]
    fn set_from_text_parses_by_kind() {
        let mut table = sample();
        table.set_from_text(0, 1, " 42.25 ").unwrap();
        assert_eq!(table.cell(0, 1), Some(&AttributeValue::Float(42.25)));
        table.set_from_text(1, 2, "").unwrap();
        assert_eq!(table.cell(1, 2), Some(&AttributeValue::Null));
        assert!(matches!(
            table.set_from_text(0, 2, "many"),
            Err(CoreError::InvalidInput(_))
        ));
        assert_eq!(table.cell(0, 2), Some(&AttributeValue::Int(3)));
    }

    #[test]
    fn out_of_range_cells_are_rejected() {
        let mut table = sample();
        assert!(matches!(
            table.set_cell(5, 0, AttributeValue::Null),
            Err(CoreError::IndexOutOfRange { index: 5, len: 2 })
        ));
        assert!(table.set_cell(0, 9, AttributeValue::Null).is_err());
    }

    #[test]
    fn push_row_checks_width() {
        let mut table = sample();
        assert!(table.push_row(vec![AttributeValue::Null]).is_err());
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn add_column_backfills_nulls() {
        let mut table = sample();
        let idx = table.add_column(ColumnDef::boolean("checked")).unwrap();
        assert_eq!(idx, 3);
        assert!(table.rows().all(|row| row[3].is_null()));
        assert!(table.add_column(ColumnDef::text("Id", 5)).is_err());
    }

    #[test]
    fn bool_columns_accept_common_spellings() {
        let def = ColumnDef::boolean("ok");
        assert_eq!(def.parse("Yes").unwrap(), AttributeValue::Bool(true));
        assert_eq!(def.parse("f").unwrap(), AttributeValue::Bool(false));
        assert!(def.parse("maybe").is_err());
    }
}
