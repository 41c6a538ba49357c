use serde::{Deserialize, Serialize};

/// Opaque simulated gene identifier. Numeric ids from the simulator are kept as text.
pub type GeneId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneCategory {
    TranscriptionFactor,
    Target,
    Noise,
    Ligand,
    Receptor,
}

impl GeneCategory {
    pub fn label(self) -> &'static str {
        match self {
            GeneCategory::TranscriptionFactor => "tf",
            GeneCategory::Target => "target",
            GeneCategory::Noise => "noise",
            GeneCategory::Ligand => "ligand",
            GeneCategory::Receptor => "receptor",
        }
    }
}

impl std::fmt::Display for GeneCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegulatoryRecord {
    #[serde(rename = "regulator.gene")]
    pub regulator: GeneId,
    #[serde(rename = "regulated.gene")]
    pub regulated: GeneId,
    #[serde(rename = "regulator.effect")]
    pub effect: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LigandReceptorRecord {
    pub ligand: GeneId,
    pub receptor: GeneId,
}

/// One transcription factor: its simulated id, the real name it is pre-bound to,
/// and the motif whose ranking supplies names for its targets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TfBinding {
    pub id: GeneId,
    pub name: String,
    pub motif: String,
}
