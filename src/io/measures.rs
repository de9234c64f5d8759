use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::measures::{MEASURE_COLUMNS, MetricsTable, ScanMetrics};

pub fn write_measures(path: &Path, table: &MetricsTable) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    writeln!(w, "{}", MEASURE_COLUMNS.join("\t"))?;
    for row in &table.rows {
        writeln!(
            w,
            "{}\t{}\t{}\t{:.6}\t{}\t{:.6}\t{:.6}\t{:.6}",
            row.fname, row.confounds, row.n, row.mean_fd, row.n_spikes, row.mean_r, row.sig_edges, row.q
        )?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_measures(path: &Path) -> Result<MetricsTable> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_measures(&content, &path.display().to_string())
}

fn parse_measures(content: &str, source: &str) -> Result<MetricsTable> {
    let mut lines = content.lines().enumerate();
    let header = match lines.next() {
        Some((_, h)) => h,
        None => bail!("{}: empty measures table", source),
    };
    let columns: Vec<&str> = header.split('\t').collect();
    if columns != MEASURE_COLUMNS {
        bail!(
            "{}: unexpected header '{}', expected '{}'",
            source,
            header,
            MEASURE_COLUMNS.join("\t")
        );
    }

    let mut rows = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let f: Vec<&str> = line.split('\t').collect();
        if f.len() != MEASURE_COLUMNS.len() {
            bail!("{}:{} malformed row (expected {} columns)", source, line_no, MEASURE_COLUMNS.len());
        }
        let num = |i: usize| -> Result<f64> {
            f[i].parse::<f64>()
                .with_context(|| format!("{}:{} invalid {} '{}'", source, line_no, MEASURE_COLUMNS[i], f[i]))
        };
        let count = |i: usize| -> Result<usize> {
            f[i].parse::<usize>()
                .with_context(|| format!("{}:{} invalid {} '{}'", source, line_no, MEASURE_COLUMNS[i], f[i]))
        };
        rows.push(ScanMetrics {
            fname: f[0].to_string(),
            confounds: f[1].to_string(),
            n: count(2)?,
            mean_fd: num(3)?,
            n_spikes: count(4)?,
            mean_r: num(5)?,
            sig_edges: num(6)?,
            q: num(7)?,
        });
    }
    Ok(MetricsTable { rows })
}
