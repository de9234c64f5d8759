use kira_roiqc::io::table::parse_table;
use kira_roiqc::math::matrix::SquareMatrix;
use kira_roiqc::measures::kernel::{
    connectivity, count_significant_edges, count_spikes, mean_connectivity, pearson_to_p, qc_fc,
    spearman_to_p,
};
use kira_roiqc::QcError;

fn matrix(rows: &[&[f64]]) -> SquareMatrix {
    let rows: Vec<Vec<f64>> = rows.iter().map(|r| r.to_vec()).collect();
    SquareMatrix::from_rows(&rows).unwrap()
}

#[test]
fn pearson_to_p_is_sign_symmetric() {
    for &n in &[3usize, 10, 50, 200] {
        for &r in &[0.0, 0.05, 0.3, 0.75, 0.999] {
            let a = pearson_to_p(r, n);
            let b = pearson_to_p(-r, n);
            assert!((a - b).abs() < 1e-15, "r={} n={}", r, n);
            assert!((0.0..=1.0).contains(&a));
        }
    }
}

#[test]
fn pearson_to_p_known_values() {
    assert!((pearson_to_p(0.0, 30) - 1.0).abs() < 1e-12);
    // r = 0.632 with n = 10 sits at the 5% two-tailed threshold
    let p = pearson_to_p(0.6319, 10);
    assert!((p - 0.05).abs() < 1e-3, "p = {}", p);
}

#[test]
fn pearson_to_p_undefined_cases() {
    assert!(pearson_to_p(0.5, 2).is_nan());
    assert!(pearson_to_p(1.0, 20).is_nan());
    assert!(pearson_to_p(-1.0, 20).is_nan());
    assert!(pearson_to_p(f64::NAN, 20).is_nan());
}

#[test]
fn significant_edges_proportion() {
    let m = matrix(&[
        &[1.0, 0.9, 0.01],
        &[0.9, 1.0, 0.02],
        &[0.01, 0.02, 1.0],
    ]);
    let prop = count_significant_edges(&m, 100);
    assert!((prop - 1.0 / 3.0).abs() < 1e-12);
    assert!((0.0..=1.0).contains(&count_significant_edges(&m, 3)));
}

#[test]
fn significant_edges_treats_undefined_as_not_significant() {
    let m = matrix(&[&[1.0, 1.0], &[1.0, 1.0]]);
    assert_eq!(count_significant_edges(&m, 100), 0.0);
}

#[test]
fn spikes_are_strictly_above_threshold() {
    let fd = [f64::NAN, 0.1, 0.2, 0.21, 0.5];
    assert_eq!(count_spikes(&fd, 0.2), 2);
    assert_eq!(count_spikes(&[], 0.2), 0);
}

#[test]
fn connectivity_has_unit_diagonal_and_bounded_edges() {
    let content = "a\tb\tc\n1\t2\t0.5\n2\t1\t0.7\n3\t5\t0.1\n4\t3\t0.9\n5\t4\t0.3\n";
    let table = parse_table(content, "test").unwrap();
    let m = connectivity(&table);
    assert_eq!(m.n(), 3);
    for i in 0..3 {
        assert_eq!(m.get(i, i), 1.0);
        for j in 0..3 {
            assert!(m.get(i, j).abs() <= 1.0);
        }
    }
    assert!(m.is_symmetric(0.0));
    assert_eq!(m.lower_triangle().len(), 3);
}

#[test]
fn mean_connectivity_uses_lower_triangle() {
    let m = matrix(&[
        &[1.0, 0.2, 0.4],
        &[0.2, 1.0, 0.6],
        &[0.4, 0.6, 1.0],
    ]);
    assert!((mean_connectivity(&m) - 0.4).abs() < 1e-12);
}

#[test]
fn qc_fc_follows_edge_order() {
    // edge (1,0) rises with motion, edge (2,0) falls, edge (2,1) constant
    let mats: Vec<SquareMatrix> = (0..4)
        .map(|k| {
            let k = k as f64;
            matrix(&[
                &[1.0, 0.1 * k, -0.1 * k],
                &[0.1 * k, 1.0, 0.3],
                &[-0.1 * k, 0.3, 1.0],
            ])
        })
        .collect();
    let fd = [0.1, 0.2, 0.3, 0.4];
    let out = qc_fc(&mats, &fd).unwrap();
    assert_eq!(out.len(), 3);
    assert!((out[0] - 1.0).abs() < 1e-12);
    assert!((out[1] + 1.0).abs() < 1e-12);
    assert!(out[2].is_nan());
}

#[test]
fn qc_fc_rejects_mismatched_inputs() {
    let a = SquareMatrix::zeros(3);
    let b = SquareMatrix::zeros(4);
    let err = qc_fc(&[a.clone(), b], &[0.1, 0.2]).unwrap_err();
    assert!(matches!(err, QcError::Shape(_)));
    let err = qc_fc(&[a], &[0.1, 0.2]).unwrap_err();
    assert!(matches!(err, QcError::Shape(_)));
}

#[test]
fn spearman_to_p_treats_perfect_rank_agreement_as_zero() {
    assert_eq!(spearman_to_p(1.0, 10), 0.0);
    assert_eq!(spearman_to_p(-1.0, 10), 0.0);
    assert_eq!(spearman_to_p(0.4, 10), pearson_to_p(0.4, 10));
    assert!(spearman_to_p(1.0, 2).is_nan());
    assert!(spearman_to_p(f64::NAN, 10).is_nan());
}
