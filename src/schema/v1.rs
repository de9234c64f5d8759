use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMeta {
    pub n_scans: usize,
    pub worker_count: usize,
    pub group_only: bool,
    pub coordinates: bool,
    pub spike_threshold: f64,
    pub modularity_iterations: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRow {
    pub fname: String,
    pub confounds: String,
    pub n: usize,
    pub mean_fd: Option<f64>,
    pub n_spikes: usize,
    pub mean_r: Option<f64>,
    pub sig_edges: Option<f64>,
    pub q: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceDependence {
    pub rho: Option<f64>,
    pub p_value: Option<f64>,
    pub n_edges: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMeasures {
    pub n_scans: usize,
    pub mean_r: Option<f64>,
    pub modularity_abs: Option<f64>,
    pub modularity_prop: Option<f64>,
    pub median_abs_qcfc: Option<f64>,
    pub qc_fc: Vec<Option<f64>>,
    pub group_connectivity: Vec<Vec<Option<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_dependence: Option<DistanceDependence>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiQcV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub input_meta: InputMeta,
    pub measures_tsv: String,
    pub scans: Vec<ScanRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupMeasures>,
    pub warnings: Vec<String>,
}

impl RoiQcV1 {
    pub fn empty(tool_version: &str) -> Self {
        Self {
            tool: "kira-roiqc".to_string(),
            version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            input_meta: InputMeta {
                n_scans: 0,
                worker_count: 1,
                group_only: false,
                coordinates: false,
                spike_threshold: crate::measures::SPIKE_THRESHOLD,
                modularity_iterations: crate::measures::MODULARITY_ITERATIONS,
                seed: None,
            },
            measures_tsv: "measures.tsv".to_string(),
            scans: Vec::new(),
            group: None,
            warnings: Vec::new(),
        }
    }
}

/// NaN has no JSON representation; it is written as `null`.
pub fn finite(v: f64) -> Option<f64> {
    if v.is_finite() { Some(v) } else { None }
}
