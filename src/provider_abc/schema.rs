//! Provider ABC response schemas.
//!
//! These are the only place where untyped provider payloads become typed
//! values. Every reader records its violations, so a rejected payload
//! reports all of its problems at once.

use serde_json::Value;

use crate::core::schema::join;
use crate::core::{Rule, SchemaCheck, ValidationIssue};

/// REST data usage response.
#[derive(Debug, Clone, PartialEq)]
pub struct DataUsageResponse {
    pub user_id: String,
    pub msisdn: String,
    pub usage: ReportedUsage,
    pub network: NetworkInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportedUsage {
    pub data: DataVolume,
    pub period: ReportedPeriod,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataVolume {
    pub total_mb: f64,
    pub roaming_mb: f64,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportedPeriod {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkInfo {
    /// `network.type` in the payload.
    pub network_type: String,
    pub provider_code: String,
}

impl DataUsageResponse {
    /// Validate a decoded JSON payload.
    pub fn from_value(payload: &Value) -> Result<Self, Vec<ValidationIssue>> {
        let mut check = SchemaCheck::new();
        let root = check.root(payload);
        let root = root.as_ref();

        let user_id = check.string(root, "user_id", &[]);
        let msisdn = check.string(root, "msisdn", &[]);

        let usage = check.object(root, "usage");
        let data = check.object(usage.as_ref(), "data");
        let total_mb = check.number(data.as_ref(), "total_mb", &[Rule::NonNegative]);
        let roaming_mb = check.number(data.as_ref(), "roaming_mb", &[Rule::NonNegative]);
        let country = check.string(data.as_ref(), "country", &[Rule::ExactLength(2)]);

        let period = check.object(usage.as_ref(), "period");
        let start = check.string(
            period.as_ref(),
            "start",
            &[Rule::Date("Invalid start date format")],
        );
        let end = check.string(
            period.as_ref(),
            "end",
            &[Rule::Date("Invalid end date format")],
        );

        let network = check.object(root, "network");
        let network_type = check.string(network.as_ref(), "type", &[]);
        let provider_code = check.string(network.as_ref(), "provider_code", &[]);

        let parsed = (|| {
            Some(Self {
                user_id: user_id?,
                msisdn: msisdn?,
                usage: ReportedUsage {
                    data: DataVolume {
                        total_mb: total_mb?,
                        roaming_mb: roaming_mb?,
                        country: country?,
                    },
                    period: ReportedPeriod {
                        start: start?,
                        end: end?,
                    },
                },
                network: NetworkInfo {
                    network_type: network_type?,
                    provider_code: provider_code?,
                },
            })
        })();

        check.finish(parsed)
    }
}

/// A field the provider sends either once (object) or repeated (array).
#[derive(Debug, Clone, PartialEq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Flatten into a list; a single value becomes a one-element list.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// SOAP SMS charge response, after XML parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct SmsChargeResponse {
    /// `Envelope.Body.ChargeSMS`.
    pub charges: OneOrMany<ChargeSmsEntry>,
}

/// One `ChargeSMS` element.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeSmsEntry {
    pub user_id: String,
    /// Numeric phone numbers are kept as their decimal text.
    pub phone_number: String,
    pub message_id: String,
    pub timestamp: String,
    pub charge_amount: f64,
    pub currency: String,
}

impl SmsChargeResponse {
    /// Validate a parsed SOAP tree. Tags are matched by local name, so any
    /// namespace prefix is accepted.
    pub fn from_value(tree: &Value) -> Result<Self, Vec<ValidationIssue>> {
        let mut check = SchemaCheck::namespaced();
        let root = check.root(tree);
        let envelope = check.object(root.as_ref(), "Envelope");
        let body = check.object(envelope.as_ref(), "Body");

        let charges = match check.value(body.as_ref(), "ChargeSMS") {
            Some((path, Value::Array(items))) => items
                .iter()
                .enumerate()
                .map(|(i, item)| charge_entry(&mut check, join(&path, &i.to_string()), item))
                .collect::<Vec<_>>()
                .into_iter()
                .collect::<Option<Vec<_>>>()
                .map(OneOrMany::Many),
            Some((path, value)) => charge_entry(&mut check, path, value).map(OneOrMany::One),
            None => None,
        };

        check.finish(charges.map(|charges| Self { charges }))
    }
}

fn charge_entry(check: &mut SchemaCheck, path: String, value: &Value) -> Option<ChargeSmsEntry> {
    let entry = check.as_object(path, value);
    let entry = entry.as_ref();

    let user_id = check.string(entry, "UserID", &[]);
    let phone_number = check.text(entry, "PhoneNumber", &[]);
    let message_id = check.string(entry, "MessageID", &[]);
    let timestamp = check.string(
        entry,
        "Timestamp",
        &[Rule::Date("Invalid timestamp format")],
    );
    let charge_amount = check.numeric(
        entry,
        "ChargeAmount",
        "ChargeAmount must be a valid number",
        &[],
    );
    let currency = check.string(entry, "Currency", &[Rule::ExactLength(3)]);

    Some(ChargeSmsEntry {
        user_id: user_id?,
        phone_number: phone_number?,
        message_id: message_id?,
        timestamp: timestamp?,
        charge_amount: charge_amount?,
        currency: currency?,
    })
}
