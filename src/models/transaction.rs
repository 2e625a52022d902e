use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Income,
    Outcome,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Outcome => "outcome",
        }
    }

    /// Exact, case-sensitive match. Anything else is not a transaction type.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(Self::Income),
            "outcome" => Some(Self::Outcome),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: Option<i64>,
    pub title: String,
    pub value: Decimal,
    pub kind: TransactionType,
    pub category_id: i64,
    pub created_at: String,
}

impl Transaction {
    pub fn new(title: String, value: Decimal, kind: TransactionType, category_id: i64) -> Self {
        Self {
            id: None,
            title,
            value,
            kind,
            category_id,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Effect of this transaction on the total balance.
    pub fn signed_value(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.value,
            TransactionType::Outcome => -self.value,
        }
    }
}
