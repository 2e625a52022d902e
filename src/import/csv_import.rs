use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::Result;
use crate::models::TransactionType;

/// One accepted data row: `title,type,value,category`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CsvTransaction {
    pub(crate) title: String,
    pub(crate) kind: TransactionType,
    pub(crate) value: Decimal,
    pub(crate) category: String,
}

impl CsvTransaction {
    /// Effect of this row on the total balance.
    pub(crate) fn signed_value(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.value,
            TransactionType::Outcome => -self.value,
        }
    }
}

pub(crate) struct CsvImporter;

impl CsvImporter {
    /// Read every data row from the CSV at `path`.
    ///
    /// The first line is a header and is skipped. Fields are trimmed. Rows
    /// whose type is not exactly `income` or `outcome` are dropped.
    pub(crate) fn load(path: &Path) -> Result<Vec<CsvTransaction>> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let mut rows = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            let fields: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            match parse_row(&fields) {
                Some(row) => rows.push(row),
                None => tracing::debug!(line = i + 2, "row dropped: unrecognized type"),
            }
        }
        Ok(rows)
    }
}

/// Split a trimmed record into a row. Missing trailing fields read as empty.
pub(crate) fn parse_row(fields: &[String]) -> Option<CsvTransaction> {
    let field = move |i: usize| fields.get(i).map(|s| s.trim()).unwrap_or_default();

    let kind = TransactionType::parse(field(1))?;
    Some(CsvTransaction {
        title: field(0).to_string(),
        kind,
        value: coerce_value(field(2)),
        category: field(3).to_string(),
    })
}

/// Numeric coercion for the value column. Currency symbols and thousands
/// separators are ignored; blank or unparseable text is zero.
pub(crate) fn coerce_value(s: &str) -> Decimal {
    let cleaned = s.replace(['$', ','], "").trim().to_string();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or_else(|_| {
            tracing::warn!(value = s, "non-numeric value read as zero");
            Decimal::ZERO
        })
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
