use serde::{Deserialize, Serialize};

use super::RawAmount;

/// One row of the `vendas` table.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SaleRow {
    pub usuario_id: String,

    pub cnpj: String,

    #[serde(default)]
    pub cliente_nome: Option<String>,

    #[serde(default)]
    pub canal_vendas: Option<String>,

    pub faturamento: RawAmount,

    pub data: String,
}
