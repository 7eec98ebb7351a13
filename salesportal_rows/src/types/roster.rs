use serde::{Deserialize, Serialize};

/// One row of the `usuarios` table. Every user is a potential sales rep.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserRow {
    pub id: String,

    pub nome: String,
}

/// One row of the `clientes` table.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClientRow {
    pub id: String,

    pub cnpj: String,

    pub nome: String,

    /// Rep who owns the client's portfolio.
    pub usuario_id: String,
}
