use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::measures::GroupSummary;
use crate::schema::v1::{
    DistanceDependence, GroupMeasures, InputMeta, RoiQcV1, ScanRow, finite,
};

pub fn build_report(ctx: &Ctx) -> RoiQcV1 {
    let input_meta = InputMeta {
        n_scans: ctx.scans.len(),
        worker_count: ctx.workers(),
        group_only: ctx.group_only,
        coordinates: ctx.coords.is_some(),
        spike_threshold: ctx.spike_threshold,
        modularity_iterations: ctx.iterations,
        seed: ctx.seed,
    };

    // group-only runs leave per-scan detail to measures.tsv
    let scans = if ctx.group_only {
        Vec::new()
    } else {
        ctx.metrics
            .rows
            .iter()
            .map(|r| ScanRow {
                fname: r.fname.clone(),
                confounds: r.confounds.clone(),
                n: r.n,
                mean_fd: finite(r.mean_fd),
                n_spikes: r.n_spikes,
                mean_r: finite(r.mean_r),
                sig_edges: finite(r.sig_edges),
                q: finite(r.q),
            })
            .collect()
    };

    let mut report = RoiQcV1::empty(&ctx.report.version);
    report.input_meta = input_meta;
    report.measures_tsv = ctx
        .output
        .measures_path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();
    report.scans = scans;
    report.group = ctx.group.as_ref().map(group_measures);
    report.warnings = ctx.warnings.clone();
    report
}

fn group_measures(g: &GroupSummary) -> GroupMeasures {
    GroupMeasures {
        n_scans: g.n_scans,
        mean_r: finite(g.mean_r),
        modularity_abs: finite(g.modularity_abs),
        modularity_prop: finite(g.modularity_prop),
        median_abs_qcfc: finite(g.median_abs_qcfc),
        qc_fc: g.qc_fc.iter().map(|v| finite(*v)).collect(),
        group_connectivity: g
            .group_matrix
            .to_rows()
            .into_iter()
            .map(|row| row.into_iter().map(finite).collect())
            .collect(),
        distance_dependence: g.distance_dependence.as_ref().map(|d| DistanceDependence {
            rho: finite(d.rho),
            p_value: finite(d.p_value),
            n_edges: d.distances.len(),
        }),
    }
}

pub fn write_json(path: &Path, report: &RoiQcV1) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
