use kira_roiqc::schema::v1::{GroupMeasures, RoiQcV1, ScanRow, finite};

#[test]
fn schema_roundtrip() {
    let mut report = RoiQcV1::empty("0.1.0");
    report.scans.push(ScanRow {
        fname: "sub-01.tsv".to_string(),
        confounds: "sub-01_confounds.tsv".to_string(),
        n: 200,
        mean_fd: Some(0.11),
        n_spikes: 3,
        mean_r: Some(0.2),
        sig_edges: Some(0.6),
        q: None,
    });
    report.group = Some(GroupMeasures {
        n_scans: 1,
        mean_r: Some(0.2),
        modularity_abs: Some(0.3),
        modularity_prop: Some(0.3),
        median_abs_qcfc: None,
        qc_fc: vec![None, Some(0.1), Some(-0.2)],
        group_connectivity: vec![vec![Some(1.0)]],
        distance_dependence: None,
    });

    let text = serde_json::to_string(&report).unwrap();
    let back: RoiQcV1 = serde_json::from_str(&text).unwrap();
    assert_eq!(back.tool, "kira-roiqc");
    assert_eq!(back.schema_version, "v1");
    assert_eq!(back.scans.len(), 1);
    assert_eq!(back.scans[0].q, None);
    let group = back.group.unwrap();
    assert_eq!(group.qc_fc, vec![None, Some(0.1), Some(-0.2)]);
    assert!(group.distance_dependence.is_none());
}

#[test]
fn finite_maps_nan_and_infinity_to_none() {
    assert_eq!(finite(1.5), Some(1.5));
    assert_eq!(finite(f64::NAN), None);
    assert_eq!(finite(f64::INFINITY), None);
}
