use crate::ctx::Ctx;

pub fn format_summary(ctx: &Ctx) -> String {
    let mut out = String::new();
    out.push_str(&format!("kira-roiqc v{}\n", ctx.report.version));
    out.push_str(&format!(
        "Scans: {}, workers={}\n",
        ctx.metrics.len(),
        ctx.workers()
    ));
    out.push_str(&format!("Measures: {}\n", ctx.output.measures_path.display()));

    let mut fd = ctx.metrics.mean_fd();
    let spikes: usize = ctx.metrics.rows.iter().map(|r| r.n_spikes).sum();
    out.push_str(&format!(
        "Motion: median mean_fd={:.4}, spikes={}\n",
        crate::math::stats::median(&mut fd),
        spikes
    ));

    match &ctx.group {
        Some(g) => {
            out.push_str(&format!(
                "Group: mean_r={:.4} Q={:.4} median|QC-FC|={:.4}\n",
                g.mean_r, g.modularity_abs, g.median_abs_qcfc
            ));
            if let Some(d) = &g.distance_dependence {
                out.push_str(&format!(
                    "Distance dependence: rho={:.4} p={:.4}\n",
                    d.rho, d.p_value
                ));
            }
        }
        None => out.push_str("Group: skipped\n"),
    }
    out
}
