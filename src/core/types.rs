use serde::{Deserialize, Serialize};

/// Mobile data consumed during a billing period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageData {
    /// Total data volume in megabytes.
    pub total_mb: f64,
    /// Portion of `total_mb` consumed while roaming.
    pub roaming_mb: f64,
    /// Country of usage (ISO 3166-1 alpha-2, e.g. "SE").
    pub country: String,
    /// Radio access technology reported by the provider (e.g. "4G").
    pub network_type: String,
    /// Provider-side network operator code.
    pub provider_code: String,
}

/// Billing period bounds as reported by the provider.
///
/// Both ends are kept in their original textual form. No ordering between
/// `start` and `end` is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub start: String,
    pub end: String,
}

/// A single charged SMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsCharge {
    pub message_id: String,
    /// Charge time, as sent by the provider.
    pub timestamp: String,
    pub amount: f64,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// The normalized record consumed downstream, independent of any provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalFormat {
    pub telgea_user_id: String,
    /// Subscriber phone number (MSISDN).
    pub msisdn: String,
    pub usage_data: UsageData,
    /// Charged messages in provider order. Empty when none were supplied.
    pub sms_charges: Vec<SmsCharge>,
    pub billing_period: BillingPeriod,
}

impl InternalFormat {
    /// Assemble a record without SMS charges.
    pub fn new(
        user_id: impl Into<String>,
        msisdn: impl Into<String>,
        usage_data: UsageData,
        billing_period: BillingPeriod,
    ) -> Self {
        Self {
            telgea_user_id: user_id.into(),
            msisdn: msisdn.into(),
            usage_data,
            sms_charges: Vec::new(),
            billing_period,
        }
    }

    pub fn with_sms_charges(mut self, charges: Vec<SmsCharge>) -> Self {
        self.sms_charges = charges;
        self
    }
}
