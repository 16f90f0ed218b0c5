use serde::Serialize;
use serde_json::Value;

use super::schema::DataUsageResponse;
use crate::core::{BillingPeriod, InvalidPayloadError, UsageData};

/// Data usage regrouped into the internal record's parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataUsage {
    pub usage: UsageData,
    pub billing_period: BillingPeriod,
    pub user_id: String,
    pub msisdn: String,
}

impl From<DataUsageResponse> for DataUsage {
    fn from(response: DataUsageResponse) -> Self {
        let DataUsageResponse {
            user_id,
            msisdn,
            usage,
            network,
        } = response;

        Self {
            usage: UsageData {
                total_mb: usage.data.total_mb,
                roaming_mb: usage.data.roaming_mb,
                country: usage.data.country,
                network_type: network.network_type,
                provider_code: network.provider_code,
            },
            billing_period: BillingPeriod {
                start: usage.period.start,
                end: usage.period.end,
            },
            user_id,
            msisdn,
        }
    }
}

/// Convert a decoded REST data usage response.
///
/// Validation failures list every offending field after
/// `Invalid data usage payload:`.
///
/// ```
/// use mvno_normalize::provider_abc::convert_data_usage;
/// use serde_json::json;
///
/// let err = convert_data_usage(&json!({ "user_id": "abc123" })).unwrap_err();
/// assert!(err.message().starts_with("Invalid data usage payload"));
/// assert!(err.message().contains("msisdn: Required"));
/// ```
pub fn convert_data_usage(payload: &Value) -> Result<DataUsage, InvalidPayloadError> {
    let response = DataUsageResponse::from_value(payload).map_err(|issues| {
        let err = InvalidPayloadError::schema("Invalid data usage payload", issues);
        tracing::warn!(error = %err, "rejected data usage payload");
        err
    })?;

    let converted = DataUsage::from(response);
    tracing::debug!(user_id = %converted.user_id, "converted data usage");
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn regroups_network_into_usage() {
        let payload = json!({
            "user_id": "u1",
            "msisdn": "+4600",
            "usage": {
                "data": { "total_mb": 0, "roaming_mb": 0, "country": "NO" },
                "period": { "start": "2025-01-01", "end": "2025-01-31" }
            },
            "network": { "type": "5G", "provider_code": "NO02" }
        });

        let converted = convert_data_usage(&payload).unwrap();
        assert_eq!(converted.usage.network_type, "5G");
        assert_eq!(converted.usage.provider_code, "NO02");
        assert_eq!(converted.usage.total_mb, 0.0);
        assert_eq!(converted.billing_period.start, "2025-01-01");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let payload = json!({
            "user_id": "u1",
            "msisdn": "+4600",
            "plan": "unlimited",
            "usage": {
                "data": { "total_mb": 1.5, "roaming_mb": 0.5, "country": "NO", "apn": "internet" },
                "period": { "start": "2025-01-01", "end": "2025-01-31" }
            },
            "network": { "type": "5G", "provider_code": "NO02" }
        });
        assert!(convert_data_usage(&payload).is_ok());
    }
}
