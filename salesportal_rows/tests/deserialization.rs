use salesportal_rows::types::{InvestmentStatus, PaginatedResponse, RawAmount, SaleRow, Snapshot};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_snapshot_full() {
    let json = load_fixture("snapshot.json");
    let snapshot = Snapshot::from_json_str(&json).unwrap();
    assert_eq!(snapshot.usuarios.len(), 3);
    assert_eq!(snapshot.clientes.len(), 4);
    assert_eq!(snapshot.vendas.len(), 7);
    assert_eq!(snapshot.metas.len(), 16);
    assert_eq!(snapshot.investimentos.len(), 4);

    let first = &snapshot.vendas[0];
    assert_eq!(first.usuario_id, "u1");
    assert_eq!(first.cnpj, "12.345.678/0001-90");
    assert_eq!(first.cliente_nome.as_deref(), Some("Mercado Bom"));
    assert_eq!(first.canal_vendas.as_deref(), Some("VAREJO"));
    assert_eq!(first.faturamento, RawAmount::Number(300.0));
    assert_eq!(first.data, "2024-01-15");
}

#[test]
fn deserialize_loosely_typed_amounts() {
    let json = load_fixture("snapshot.json");
    let snapshot = Snapshot::from_json_str(&json).unwrap();
    assert_eq!(
        snapshot.vendas[1].faturamento,
        RawAmount::Text("200.00".to_string())
    );
    assert_eq!(
        snapshot.vendas[3].faturamento,
        RawAmount::Text("1.800,00".to_string())
    );
}

#[test]
fn deserialize_null_optional_fields() {
    let json = load_fixture("snapshot.json");
    let snapshot = Snapshot::from_json_str(&json).unwrap();
    assert!(snapshot.vendas[1].cliente_nome.is_none());
    assert!(snapshot.vendas[2].canal_vendas.is_none());
}

#[test]
fn deserialize_investment_statuses() {
    let json = load_fixture("snapshot.json");
    let snapshot = Snapshot::from_json_str(&json).unwrap();
    let statuses: Vec<InvestmentStatus> =
        snapshot.investimentos.iter().map(|i| i.status).collect();
    assert_eq!(
        statuses,
        vec![
            InvestmentStatus::Approved,
            InvestmentStatus::Pending,
            InvestmentStatus::Approved,
            InvestmentStatus::Rejected,
        ]
    );
}

#[test]
fn deserialize_sales_page() {
    let json = load_fixture("sales_page.json");
    let resp: PaginatedResponse<SaleRow> = serde_json::from_str(&json).unwrap();
    assert_eq!(resp.data.len(), 2);
    assert_eq!(resp.meta.paging.page, 1);
    assert_eq!(resp.meta.paging.total_items, 3);
    assert_eq!(resp.meta.paging.total_pages, 2);
    // Optional columns may be omitted entirely
    assert!(resp.data[1].canal_vendas.is_none());
}

#[test]
fn deserialize_unknown_status_fails() {
    let json = r#"{"investimentos": [{"usuario_id": "u1", "cliente_id": "c1",
        "valor_total_investimento": 1, "data": "2024-01-01", "status": "cancelado"}]}"#;
    assert!(Snapshot::from_json_str(json).is_err());
}
