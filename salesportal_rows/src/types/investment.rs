use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::RawAmount;

/// One row of the `investimentos` table.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InvestmentRow {
    pub usuario_id: String,

    pub cliente_id: String,

    pub valor_total_investimento: RawAmount,

    pub data: String,

    pub status: InvestmentStatus,
}

/// Approval state of an investment request.
///
/// The backend stores Portuguese values; English spellings are accepted too.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum InvestmentStatus {
    Pending,
    Approved,
    Rejected,
}

impl FromStr for InvestmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendente" => Ok(InvestmentStatus::Pending),
            "approved" | "aprovado" => Ok(InvestmentStatus::Approved),
            "rejected" | "rejeitado" | "reprovado" => Ok(InvestmentStatus::Rejected),
            _ => Err(format!("unknown investment status '{}'", s)),
        }
    }
}

impl TryFrom<String> for InvestmentStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InvestmentStatus> for String {
    fn from(value: InvestmentStatus) -> Self {
        value.to_string()
    }
}

impl fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvestmentStatus::Pending => "pending",
            InvestmentStatus::Approved => "approved",
            InvestmentStatus::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accepts_both_languages() {
        assert_eq!("aprovado".parse::<InvestmentStatus>(), Ok(InvestmentStatus::Approved));
        assert_eq!("Approved".parse::<InvestmentStatus>(), Ok(InvestmentStatus::Approved));
        assert_eq!(" PENDENTE ".parse::<InvestmentStatus>(), Ok(InvestmentStatus::Pending));
        assert_eq!("rejeitado".parse::<InvestmentStatus>(), Ok(InvestmentStatus::Rejected));
    }

    #[test]
    fn test_status_rejects_unknown() {
        assert!("cancelado".parse::<InvestmentStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_in_english() {
        let json = serde_json::to_string(&InvestmentStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
    }
}
