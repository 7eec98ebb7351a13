use serde::{Deserialize, Serialize};

use super::RawAmount;

/// One row of the `metas` table: a rep's target for a calendar month.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TargetRow {
    pub usuario_id: String,

    pub mes: i64,

    pub ano: i64,

    pub valor: RawAmount,
}
