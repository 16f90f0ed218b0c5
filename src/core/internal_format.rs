use super::dates::is_date;
use super::error::ValidationIssue;
use super::types::*;

/// Validate an assembled record against the internal-format schema.
/// Returns all validation errors found (not just the first).
pub fn validate_internal_format(record: &InternalFormat) -> Vec<ValidationIssue> {
    let mut errors = Vec::new();

    validate_usage(&record.usage_data, "usage_data", &mut errors);
    validate_period(&record.billing_period, "billing_period", &mut errors);

    for (i, charge) in record.sms_charges.iter().enumerate() {
        validate_charge(charge, &format!("sms_charges.{i}"), &mut errors);
    }

    errors
}

fn validate_usage(usage: &UsageData, path: &str, errors: &mut Vec<ValidationIssue>) {
    for (field, value) in [("total_mb", usage.total_mb), ("roaming_mb", usage.roaming_mb)] {
        if !value.is_finite() {
            errors.push(ValidationIssue::new(
                format!("{path}.{field}"),
                "Expected finite number",
            ));
        } else if value < 0.0 {
            errors.push(ValidationIssue::new(
                format!("{path}.{field}"),
                "Number must be greater than or equal to 0",
            ));
        }
    }

    if usage.country.chars().count() != 2 {
        errors.push(ValidationIssue::new(
            format!("{path}.country"),
            "String must contain exactly 2 character(s)",
        ));
    }
}

fn validate_period(period: &BillingPeriod, path: &str, errors: &mut Vec<ValidationIssue>) {
    if !is_date(&period.start) {
        errors.push(ValidationIssue::new(
            format!("{path}.start"),
            "Invalid start date format",
        ));
    }
    if !is_date(&period.end) {
        errors.push(ValidationIssue::new(
            format!("{path}.end"),
            "Invalid end date format",
        ));
    }
}

fn validate_charge(charge: &SmsCharge, path: &str, errors: &mut Vec<ValidationIssue>) {
    if !charge.amount.is_finite() {
        errors.push(ValidationIssue::new(
            format!("{path}.amount"),
            "Expected finite number",
        ));
    }
    if !is_date(&charge.timestamp) {
        errors.push(ValidationIssue::new(
            format!("{path}.timestamp"),
            "Invalid timestamp format",
        ));
    }
    if charge.currency.chars().count() != 3 {
        errors.push(ValidationIssue::new(
            format!("{path}.currency"),
            "String must contain exactly 3 character(s)",
        ));
    }
}
