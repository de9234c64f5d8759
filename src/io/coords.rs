use std::path::Path;

use anyhow::Result;

use crate::error::QcError;
use crate::io::table;

const AXES: [&str; 3] = ["x", "y", "z"];

/// Reads ROI coordinates from a `.tsv` file with `x`, `y` and `z` columns.
pub fn read_coords(path: &Path) -> Result<Vec<[f64; 3]>> {
    if !path.to_string_lossy().ends_with(".tsv") {
        return Err(
            QcError::validation(path, "coordinate file must be a tab-separated .tsv file").into(),
        );
    }
    let table = table::read_table(path)?;

    let mut idx = [0usize; 3];
    for (slot, axis) in idx.iter_mut().zip(AXES) {
        let hits: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.as_str() == axis)
            .map(|(i, _)| i)
            .collect();
        if hits.len() != 1 {
            return Err(QcError::validation(
                path,
                "coordinates do not have 3 columns named `x`, `y`, and `z`",
            )
            .into());
        }
        *slot = hits[0];
    }

    let mut out = Vec::with_capacity(table.n_rows);
    for row in 0..table.n_rows {
        let point = [
            table.data[idx[0]][row],
            table.data[idx[1]][row],
            table.data[idx[2]][row],
        ];
        if point.iter().any(|v| v.is_nan()) {
            return Err(
                QcError::validation(path, format!("missing coordinate on row {}", row + 1)).into(),
            );
        }
        out.push(point);
    }
    Ok(out)
}
