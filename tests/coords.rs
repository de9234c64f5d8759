use kira_roiqc::QcError;
use kira_roiqc::io::coords::read_coords;

fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn reads_xyz_in_any_column_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "atlas.tsv", "label\tz\ty\tx\n1\t3\t2\t1\n2\t-6\t5\t4\n");
    let coords = read_coords(&path).unwrap();
    assert_eq!(coords, vec![[1.0, 2.0, 3.0], [4.0, 5.0, -6.0]]);
}

#[test]
fn rejects_non_tsv_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "atlas.csv", "x,y,z\n1,2,3\n");
    let err = read_coords(&path).unwrap_err();
    let qc = err.downcast_ref::<QcError>().expect("typed error");
    assert!(matches!(qc, QcError::Validation { .. }));
}

#[test]
fn requires_x_y_and_z_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "atlas.tsv", "x\ty\n1\t2\n");
    let err = read_coords(&path).unwrap_err();
    assert!(err.to_string().contains("`x`, `y`, and `z`"));
}

#[test]
fn missing_coordinate_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "atlas.tsv", "x\ty\tz\n1\t2\t3\n1\tn/a\t3\n");
    let err = read_coords(&path).unwrap_err();
    assert!(err.to_string().contains("row 2"));
}
