use super::schema::{ChargeSmsEntry, OneOrMany, SmsChargeResponse};
use crate::core::{InvalidPayloadError, SmsCharge};
use crate::xml::XmlParser;

impl From<ChargeSmsEntry> for SmsCharge {
    fn from(entry: ChargeSmsEntry) -> Self {
        Self {
            message_id: entry.message_id,
            timestamp: entry.timestamp,
            amount: entry.charge_amount,
            currency: entry.currency,
        }
    }
}

/// Normalize single-or-repeated `ChargeSMS` entries into charges, in
/// provider order. Subscriber fields (`UserID`, `PhoneNumber`) are dropped.
pub fn normalize_charges(entries: OneOrMany<ChargeSmsEntry>) -> Vec<SmsCharge> {
    entries.into_vec().into_iter().map(SmsCharge::from).collect()
}

/// Convert a SOAP SMS charge response using the shared XML parser.
///
/// Parser failures are returned unchanged; schema failures list every
/// offending field after `Invalid SMS charge payload:`.
pub fn convert_sms_charge(xml: &str) -> Result<Vec<SmsCharge>, InvalidPayloadError> {
    convert_sms_charge_with(XmlParser::shared(), xml)
}

/// Convert a SOAP SMS charge response using `parser`.
pub fn convert_sms_charge_with(
    parser: &XmlParser,
    xml: &str,
) -> Result<Vec<SmsCharge>, InvalidPayloadError> {
    let tree = parser.parse(xml)?;

    let response = SmsChargeResponse::from_value(&tree).map_err(|issues| {
        let err = InvalidPayloadError::schema("Invalid SMS charge payload", issues);
        tracing::warn!(error = %err, "rejected SMS charge payload");
        err
    })?;

    let charges = normalize_charges(response.charges);
    tracing::debug!(charges = charges.len(), "converted SMS charges");
    Ok(charges)
}
