use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ClientRow, InvestmentRow, SaleRow, TargetRow, UserRow};
use crate::Error;

/// Full dump of every collection the dashboards read.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Snapshot {
    #[serde(default)]
    pub usuarios: Vec<UserRow>,

    #[serde(default)]
    pub clientes: Vec<ClientRow>,

    #[serde(default)]
    pub vendas: Vec<SaleRow>,

    #[serde(default)]
    pub metas: Vec<TargetRow>,

    #[serde(default)]
    pub investimentos: Vec<InvestmentRow>,
}

impl Snapshot {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        let snapshot = Self::from_json_str(&json)?;
        tracing::debug!(
            path = %path.display(),
            sales = snapshot.vendas.len(),
            targets = snapshot.metas.len(),
            investments = snapshot.investimentos.len(),
            "snapshot read"
        );
        Ok(snapshot)
    }
}
