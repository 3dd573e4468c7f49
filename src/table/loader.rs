// SPDX-License-Identifier: MIT

//! Table loader - builds rule tables from source files
//!
//! Two source formats are understood:
//! - `;`-delimited text whose header names the input columns, a `*` marker
//!   column, then the output columns
//! - YAML documents listing rules as `when`/`then` mappings

use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::context::Value;
use super::rule::{Rule, RuleTable};
use crate::error::LoadError;

const DELIMITER: char = ';';
const SEPARATOR: &str = "*";

/// YAML rule document
#[derive(Debug, Deserialize)]
struct TableDocument {
    name: Option<String>,
    description: Option<String>,
    #[serde(default)]
    rules: Vec<RuleDocument>,
}

#[derive(Debug, Deserialize)]
struct RuleDocument {
    #[serde(default)]
    when: IndexMap<String, Option<Value>>,
    #[serde(default)]
    then: IndexMap<String, Option<Value>>,
}

/// Loads rule tables from text or files
pub struct TableLoader;

impl TableLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a table from a file, picking the format from its extension.
    ///
    /// `.yaml`/`.yml` files are rule documents; anything else is read as
    /// `;`-delimited text. The file stem names the table unless the document
    /// names itself.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<RuleTable, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let table = if is_yaml(path) {
            Self::parse_yaml(&content)?
        } else {
            Self::parse_csv(&content)?
        };

        log::info!("Loaded {} rules from {}", table.len(), path.display());

        let stem = path.file_stem().and_then(|s| s.to_str());
        match stem {
            Some(stem) if table.name().is_none() => Ok(table.with_name(stem)),
            _ => Ok(table),
        }
    }

    /// Parse `;`-delimited rule text
    pub fn parse_csv(content: &str) -> Result<RuleTable, LoadError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut lines = content.lines().enumerate();

        let (_, header_line) = lines.next().ok_or(LoadError::MissingHeader)?;
        let headers: Vec<String> = split_row(header_line, 1)?
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();

        let separator = headers
            .iter()
            .position(|h| h == SEPARATOR)
            .ok_or(LoadError::MissingSeparator)?;
        let input_columns = &headers[..separator];
        let output_columns = &headers[separator + 1..];

        let mut rules = Vec::new();
        for (index, line) in lines {
            let line_no = index + 1;
            let cells = split_row(line, line_no)?;
            if cells.iter().all(|c| c.trim().is_empty()) {
                continue;
            }
            if cells.len() != headers.len() {
                return Err(LoadError::RowLength {
                    line: line_no,
                    expected: headers.len(),
                    found: cells.len(),
                });
            }

            let mut inputs = IndexMap::new();
            for (column, cell) in input_columns.iter().zip(&cells[..separator]) {
                let condition = cell.trim();
                if !condition.is_empty() {
                    inputs.insert(column.clone(), condition.to_string());
                }
            }

            let mut outputs = IndexMap::new();
            for (column, cell) in output_columns.iter().zip(&cells[separator + 1..]) {
                let value = cell.trim();
                if !value.is_empty() {
                    outputs.insert(column.clone(), strip_quotes(value).to_string());
                }
            }

            rules.push(Rule::new(inputs, outputs));
        }

        Ok(RuleTable::new(rules))
    }

    /// Parse a YAML rule document
    pub fn parse_yaml(content: &str) -> Result<RuleTable, LoadError> {
        let doc: TableDocument = serde_yaml::from_str(content)?;

        let rules = doc
            .rules
            .into_iter()
            .map(|rule| {
                let inputs = rule
                    .when
                    .into_iter()
                    .filter_map(|(column, cell)| {
                        let condition = cell?.to_string().trim().to_string();
                        (!condition.is_empty()).then_some((column, condition))
                    })
                    .collect();
                let outputs = rule
                    .then
                    .into_iter()
                    .filter_map(|(column, cell)| {
                        let value = cell?.to_string();
                        let value = value.trim();
                        (!value.is_empty()).then(|| (column, strip_quotes(value).to_string()))
                    })
                    .collect();
                Rule::new(inputs, outputs)
            })
            .collect();

        let mut table = RuleTable::new(rules);
        if let Some(name) = doc.name {
            table = table.with_name(name);
        }
        if let Some(description) = doc.description {
            table = table.with_description(description);
        }
        Ok(table)
    }
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a path names a YAML rule document
pub(crate) fn is_yaml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}

/// Remove one pair of wrapping double quotes
fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Split one line into cells.
///
/// A field that opens with `"` runs to its closing quote and may contain the
/// delimiter; `""` inside it stands for one quote. The enclosing quotes are
/// dropped and anything after the closing quote is kept as written.
fn split_row(line: &str, line_no: usize) -> Result<Vec<String>, LoadError> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = line.chars().peekable();
    let mut at_field_start = true;

    while let Some(c) = chars.next() {
        if at_field_start && c == '"' {
            at_field_start = false;
            let mut closed = false;
            while let Some(q) = chars.next() {
                if q != '"' {
                    cell.push(q);
                } else if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    closed = true;
                    break;
                }
            }
            if !closed {
                return Err(LoadError::UnterminatedQuote { line: line_no });
            }
        } else if c == DELIMITER {
            cells.push(std::mem::take(&mut cell));
            at_field_start = true;
        } else {
            at_field_start = false;
            cell.push(c);
        }
    }
    cells.push(cell);

    Ok(cells)
}
