use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// The serialization within this layer is a dependency leak, but its a pragmatic approach.
// These records are sent to the bingo service as-is, so they carry the wire field names.

// Decoded token payload. Only trusted once it came out of a successful verification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(pub Map<String, Value>);

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    // Username claim, when present as a string.
    pub fn username(&self) -> Option<&str> {
        self.0.get("username").and_then(Value::as_str)
    }
}

// Eligibility form: who wants to buy and how much they need to spend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRequest {
    pub username: String,
    pub required_amount: u64,
}

impl EligibilityRequest {
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && self.required_amount != 0
    }
}

// Purchase form for a single card (cartón) against a draw (sorteo).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPurchase {
    pub user_id: String,
    pub username: String,
    pub numero_carton: u32,
    pub sorteo: u32,
    // Calendar date as entered, usually YYYY-MM-DD.
    pub fecha_sorteo: String,
    pub monto: u64,
    pub referencia_venta: String,
    pub nombre_archivo_pdf: String,
}

impl CardPurchase {
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && self.numero_carton != 0 && self.monto != 0
    }
}

// Body of the purchase-cardboard call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasePayload {
    #[serde(flatten)]
    pub purchase: CardPurchase,
    pub timestamp: String,
}

impl PurchasePayload {
    pub fn new(purchase: &CardPurchase, timestamp: impl Into<String>) -> Self {
        let mut purchase = purchase.clone();
        purchase.fecha_sorteo = normalize_draw_date(&purchase.fecha_sorteo);
        Self {
            purchase,
            timestamp: timestamp.into(),
        }
    }
}

// YYYY-MM-DD -> YYYYMMDD. Strings without hyphens pass through unchanged.
pub fn normalize_draw_date(date: &str) -> String {
    date.replace('-', "")
}

// Local envelope around every raw HTTP response, for display only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn ok(data: Value, timestamp: String) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp,
        }
    }

    pub fn rejected(data: Value, error: String, timestamp: String) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: Some(error),
            timestamp,
        }
    }

    pub fn failed(error: String, timestamp: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            timestamp,
        }
    }
}
