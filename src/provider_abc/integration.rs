use serde_json::Value;

use super::data_usage::convert_data_usage;
use super::sms_charge::convert_sms_charge;
use crate::core::{
    ErrorCode, IntegrationError, InternalFormat, ValidationReport, validate_internal_format,
};

/// Normalize one user's data usage and, optionally, SMS charges.
///
/// Data usage is required and converted first; its failure stops the run
/// before any SMS text is looked at. Missing (or empty) SMS text yields no
/// charges. The assembled record is checked against the internal-format
/// schema before it is returned.
///
/// Every failure is wrapped with the stage code
/// ([`ErrorCode::DataUsage`], [`ErrorCode::SmsCharge`],
/// [`ErrorCode::InternalFormat`]) and keeps the stage's error as cause.
pub fn process_user_data(
    data_usage: &Value,
    sms_charge_xml: Option<&str>,
) -> Result<InternalFormat, IntegrationError> {
    let usage = convert_data_usage(data_usage).map_err(|e| {
        IntegrationError::new(ErrorCode::DataUsage, "Failed to process data usage").with_cause(e)
    })?;

    let charges = match sms_charge_xml.filter(|xml| !xml.is_empty()) {
        Some(xml) => convert_sms_charge(xml).map_err(|e| {
            IntegrationError::new(ErrorCode::SmsCharge, "Failed to process SMS charges")
                .with_cause(e)
                .with_context("user_id", usage.user_id.as_str())
        })?,
        None => {
            tracing::debug!(user_id = %usage.user_id, "no SMS charge payload supplied");
            Vec::new()
        }
    };

    let record = InternalFormat::new(
        usage.user_id,
        usage.msisdn,
        usage.usage,
        usage.billing_period,
    )
    .with_sms_charges(charges);

    finalize(record)
}

/// Check the assembled record against the internal-format schema.
fn finalize(record: InternalFormat) -> Result<InternalFormat, IntegrationError> {
    let issues = validate_internal_format(&record);
    if issues.is_empty() {
        tracing::debug!(
            user_id = %record.telgea_user_id,
            charges = record.sms_charges.len(),
            "normalized user data"
        );
        return Ok(record);
    }

    let report = ValidationReport(issues);
    tracing::error!(
        user_id = %record.telgea_user_id,
        error = %report,
        "assembled record failed internal-format validation"
    );
    let errors = serde_json::to_value(&report.0).unwrap_or_default();
    Err(IntegrationError::new(
        ErrorCode::InternalFormat,
        format!("Invalid internal format: {report}"),
    )
    .with_context("errors", errors)
    .with_cause(report))
}
