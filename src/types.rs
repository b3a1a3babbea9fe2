use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Random graph model used to draw the undirected skeleton.
///
/// - `ER`: Erdős–Rényi, every pair connected independently with probability `P`.
/// - `BA`: Barabási–Albert preferential attachment with `M` edges per new node.
/// - `WS`: Watts–Strogatz small world, ring of degree `K` rewired with probability `P`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelKind {
    #[serde(rename = "ER")]
    ErdosRenyi,
    #[serde(rename = "BA")]
    BarabasiAlbert,
    #[serde(rename = "WS")]
    WattsStrogatz,
}

impl ModelKind {
    /// Short name as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::ErdosRenyi => "ER",
            ModelKind::BarabasiAlbert => "BA",
            ModelKind::WattsStrogatz => "WS",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ER" => Ok(ModelKind::ErdosRenyi),
            "BA" => Ok(ModelKind::BarabasiAlbert),
            "WS" => Ok(ModelKind::WattsStrogatz),
            other => Err(format!(
                "invalid model kind: {other} (expected \"ER\", \"BA\" or \"WS\")"
            )),
        }
    }
}

/// How graphs are printed by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EmitFormat {
    /// Human readable summary per graph.
    #[default]
    Text,
    /// One JSON document `{node_count, edges}` per graph.
    Json,
}
