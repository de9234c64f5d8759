use std::path::Path;

use anyhow::{Result, bail};

/// Numeric tab-separated table with a header row, stored column-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub data: Vec<Vec<f64>>,
    pub n_rows: usize,
}

impl Table {
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.column_index(name).map(|i| self.data[i].as_slice())
    }

    /// First repeated header name, if any.
    pub fn duplicate_column(&self) -> Option<&str> {
        for (i, name) in self.columns.iter().enumerate() {
            if self.columns[..i].contains(name) {
                return Some(name);
            }
        }
        None
    }
}

pub fn read_table(path: &Path) -> Result<Table> {
    let content = super::read_to_string_maybe_gz(path)?;
    parse_table(&content, &path.display().to_string())
}

pub fn parse_table(content: &str, source: &str) -> Result<Table> {
    let mut lines = content.lines().enumerate();
    let columns: Vec<String> = loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => continue,
            Some((_, line)) => {
                break line
                    .trim_end_matches('\r')
                    .split('\t')
                    .map(|s| s.trim().to_string())
                    .collect();
            }
            None => bail!("{}: table is empty", source),
        }
    };

    let mut data: Vec<Vec<f64>> = vec![Vec::new(); columns.len()];
    let mut n_rows = 0usize;
    for (idx, line) in lines {
        let line_no = idx + 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != columns.len() {
            bail!(
                "{}:{} expected {} fields, found {}",
                source,
                line_no,
                columns.len(),
                fields.len()
            );
        }
        for (col, field) in fields.iter().enumerate() {
            let value = parse_cell(field).ok_or_else(|| {
                anyhow::anyhow!(
                    "{}:{} non-numeric value '{}' in column '{}'",
                    source,
                    line_no,
                    field.trim(),
                    columns[col]
                )
            })?;
            data[col].push(value);
        }
        n_rows += 1;
    }

    Ok(Table {
        columns,
        data,
        n_rows,
    })
}

fn parse_cell(field: &str) -> Option<f64> {
    let field = field.trim();
    if field.is_empty()
        || field.eq_ignore_ascii_case("n/a")
        || field.eq_ignore_ascii_case("na")
        || field.eq_ignore_ascii_case("nan")
    {
        return Some(f64::NAN);
    }
    field.parse::<f64>().ok()
}
