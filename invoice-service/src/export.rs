//! List exports: CSV with human-readable column labels, or pretty JSON.
//!
//! Columns address record fields by dot-notation path resolved against the
//! serialized form of each row, so nested blocks (`currency.code`,
//! `shipping.cost`) export without bespoke per-entity flattening.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use service_core::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }
}

/// One export column: the label printed in the CSV header row and the
/// dot-notation path used to pull the value out of each record.
pub struct Column {
    pub label: &'static str,
    pub path: &'static str,
}

pub const INVOICE_COLUMNS: &[Column] = &[
    Column { label: "Invoice #", path: "invoice_number" },
    Column { label: "Company", path: "company" },
    Column { label: "Client", path: "client" },
    Column { label: "Due Date", path: "due_date" },
    Column { label: "Status", path: "status" },
    Column { label: "Currency", path: "currency.code" },
    Column { label: "Subtotal", path: "subtotal" },
    Column { label: "Tax", path: "tax_total" },
    Column { label: "Discount %", path: "discount_percent" },
    Column { label: "Shipping Cost", path: "shipping.cost" },
    Column { label: "Total", path: "total" },
];

pub const CUSTOMER_COLUMNS: &[Column] = &[
    Column { label: "Name", path: "name" },
    Column { label: "Email", path: "email" },
    Column { label: "Phone", path: "phone" },
    Column { label: "Address", path: "address" },
];

pub const PRODUCT_COLUMNS: &[Column] = &[
    Column { label: "Name", path: "name" },
    Column { label: "Description", path: "description" },
    Column { label: "Price", path: "price" },
    Column { label: "Tax Rate %", path: "tax_rate" },
    Column { label: "Category", path: "category" },
];

pub fn export_filename(entity: &str, format: ExportFormat) -> String {
    format!("{}-export.{}", entity, format.extension())
}

/// Render rows as CSV with a label header line.
pub fn to_csv<T: Serialize>(rows: &[T], columns: &[Column]) -> Result<String, AppError> {
    let mut out = String::new();
    let header: Vec<String> = columns.iter().map(|c| escape_csv(c.label)).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in rows {
        let json = serde_json::to_value(row)
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Export serialization: {}", e)))?;
        let cells: Vec<String> = columns
            .iter()
            .map(|c| escape_csv(&render_cell(lookup(&json, c.path))))
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }

    Ok(out)
}

/// Render rows as a pretty-printed JSON array of full records.
pub fn to_json_pretty<T: Serialize>(rows: &[T]) -> Result<String, AppError> {
    serde_json::to_string_pretty(rows)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("Export serialization: {}", e)))
}

/// Resolve a dot-notation path against a serialized record.
fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |acc, key| acc.get(key))
}

fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Quote a field when it contains a separator, quote, or line break;
/// embedded quotes are doubled.
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Row {
        name: String,
        nested: Nested,
        missing: Option<String>,
    }

    #[derive(Serialize)]
    struct Nested {
        code: String,
        amount: i64,
    }

    const TEST_COLUMNS: &[Column] = &[
        Column { label: "Name", path: "name" },
        Column { label: "Code", path: "nested.code" },
        Column { label: "Amount", path: "nested.amount" },
        Column { label: "Missing", path: "missing" },
    ];

    fn row(name: &str) -> Row {
        Row {
            name: name.to_string(),
            nested: Nested {
                code: "EUR".into(),
                amount: 42,
            },
            missing: None,
        }
    }

    #[test]
    fn csv_has_label_header_and_dot_path_cells() {
        let csv = to_csv(&[row("Plain")], TEST_COLUMNS).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Name,Code,Amount,Missing"));
        assert_eq!(lines.next(), Some("Plain,EUR,42,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn fields_with_commas_quotes_and_newlines_are_escaped() {
        let csv = to_csv(&[row("Smith, \"Bob\"\nLtd")], TEST_COLUMNS).unwrap();
        let body = csv.lines().nth(1).unwrap_or_default().to_string()
            + "\n"
            + csv.lines().nth(2).unwrap_or_default();
        assert!(body.starts_with("\"Smith, \"\"Bob\"\"\nLtd\","));
    }

    #[test]
    fn lookup_walks_nested_objects() {
        let value = json!({"a": {"b": {"c": 7}}});
        assert_eq!(lookup(&value, "a.b.c"), Some(&json!(7)));
        assert_eq!(lookup(&value, "a.x"), None);
    }

    #[test]
    fn json_export_is_a_pretty_array() {
        let out = to_json_pretty(&[row("One")]).unwrap();
        assert!(out.starts_with("[\n"));
        assert!(out.contains("\"name\": \"One\""));
    }

    #[test]
    fn filenames_follow_entity_export_convention() {
        assert_eq!(export_filename("invoices", ExportFormat::Csv), "invoices-export.csv");
        assert_eq!(export_filename("products", ExportFormat::Json), "products-export.json");
    }
}
