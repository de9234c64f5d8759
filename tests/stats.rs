use kira_roiqc::math::stats::{mean, median, nan_mean, pearson, rank_average, spearman};

#[test]
fn median_odd_even() {
    let mut v1 = vec![3.0, 1.0, 2.0];
    assert_eq!(median(&mut v1), 2.0);
    let mut v2 = vec![4.0, 1.0, 2.0, 3.0];
    assert_eq!(median(&mut v2), 2.5);
}

#[test]
fn median_propagates_nan() {
    let mut v = vec![1.0, f64::NAN, 2.0];
    assert!(median(&mut v).is_nan());
}

#[test]
fn nan_mean_skips_missing() {
    let v = vec![f64::NAN, 1.0, 3.0];
    assert!((nan_mean(&v) - 2.0).abs() < 1e-12);
    assert!(mean(&v).is_nan());
    assert!(nan_mean(&[f64::NAN]).is_nan());
}

#[test]
fn ranks_average_ties() {
    let r = rank_average(&[10.0, 20.0, 10.0, 30.0]);
    assert_eq!(r, vec![1.5, 3.0, 1.5, 4.0]);
}

#[test]
fn pearson_perfect_and_constant() {
    let x = [1.0, 2.0, 3.0, 4.0];
    let y = [2.0, 4.0, 6.0, 8.0];
    assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    let neg: Vec<f64> = y.iter().map(|v| -v).collect();
    assert!((pearson(&x, &neg) + 1.0).abs() < 1e-12);
    assert!(pearson(&x, &[1.0, 1.0, 1.0, 1.0]).is_nan());
}

#[test]
fn spearman_monotone_nonlinear() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    let y: Vec<f64> = x.iter().map(|v: &f64| v.powi(3)).collect();
    assert!((spearman(&x, &y) - 1.0).abs() < 1e-12);
    assert!(spearman(&x, &[1.0, f64::NAN, 3.0, 4.0, 5.0]).is_nan());
}
