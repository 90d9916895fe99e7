use serde::{Deserialize, Serialize};

/// A settlement attempt tied to a booking. `processed_at` stays 0 until the
/// gateway resolves the attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub booking_id: String,
    pub client_id: String,
    pub client_name: String,
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_id: String,
    pub created_at: i64,
    pub processed_at: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Refunded => "REFUNDED",
            PaymentStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "COMPLETED" => PaymentStatus::Completed,
            "FAILED" => PaymentStatus::Failed,
            "REFUNDED" => PaymentStatus::Refunded,
            "CANCELLED" => PaymentStatus::Cancelled,
            _ => PaymentStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Paypal,
    BankTransfer,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::DebitCard => "DEBIT_CARD",
            PaymentMethod::Paypal => "PAYPAL",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::Cash => "CASH",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "DEBIT_CARD" => PaymentMethod::DebitCard,
            "PAYPAL" => PaymentMethod::Paypal,
            "BANK_TRANSFER" => PaymentMethod::BankTransfer,
            "CASH" => PaymentMethod::Cash,
            _ => PaymentMethod::CreditCard,
        }
    }

    pub fn requires_card(&self) -> bool {
        matches!(self, PaymentMethod::CreditCard | PaymentMethod::DebitCard)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentCard {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
    pub card_holder: String,
}

impl PaymentCard {
    /// Shallow card checks: 16 digits after stripping spaces, an MM/YY
    /// expiry, a 3-digit CVV and a non-blank holder. No Luhn check and no
    /// expiry freshness check.
    pub fn is_valid(&self) -> bool {
        let digits: String = self.card_number.chars().filter(|c| *c != ' ').collect();

        digits.len() == 16
            && digits.chars().all(|c| c.is_ascii_digit())
            && valid_expiry(&self.expiry_date)
            && self.cvv.len() == 3
            && self.cvv.chars().all(|c| c.is_ascii_digit())
            && !self.card_holder.trim().is_empty()
    }
}

fn valid_expiry(s: &str) -> bool {
    let parts: Vec<&str> = s.split('/').collect();
    parts.len() == 2
        && parts
            .iter()
            .all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_digit()))
}
