//! Property-based tests for the provider converters and the XML adapter.
//!
//! Run with: `cargo test --test proptest_tests`

#![cfg(feature = "provider-abc")]

use mvno_normalize::provider_abc::{convert_data_usage, convert_sms_charge};
use mvno_normalize::xml::parse_xml;
use proptest::prelude::*;
use serde_json::{Value, json};

// ── Proptest Strategies ─────────────────────────────────────────────────────

/// Non-negative data volume in megabytes, with two decimals.
fn arb_volume() -> impl Strategy<Value = f64> {
    (0u64..100_000_000u64).prop_map(|hundredths| hundredths as f64 / 100.0)
}

/// Two uppercase letters.
fn arb_country() -> impl Strategy<Value = String> {
    "[A-Z]{2}"
}

/// A valid RFC 3339 timestamp in 2025.
fn arb_timestamp() -> impl Strategy<Value = String> {
    (1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(|(mo, d, h, mi, s)| {
        format!("2025-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}Z")
    })
}

/// A valid data usage payload together with its generating fields.
#[derive(Debug, Clone)]
struct UsageFields {
    user_id: String,
    msisdn: String,
    total_mb: f64,
    roaming_mb: f64,
    country: String,
    start: String,
    end: String,
    network_type: String,
    provider_code: String,
}

impl UsageFields {
    fn to_json(&self) -> Value {
        json!({
            "user_id": self.user_id,
            "msisdn": self.msisdn,
            "usage": {
                "data": {
                    "total_mb": self.total_mb,
                    "roaming_mb": self.roaming_mb,
                    "country": self.country
                },
                "period": { "start": self.start, "end": self.end }
            },
            "network": { "type": self.network_type, "provider_code": self.provider_code }
        })
    }
}

fn arb_usage() -> impl Strategy<Value = UsageFields> {
    (
        ("[a-z0-9]{1,12}", "\\+[0-9]{8,13}"),
        (arb_volume(), arb_volume(), arb_country()),
        (arb_timestamp(), arb_timestamp()),
        ("[2-5]G", "[A-Z]{2}[0-9]{2}"),
    )
        .prop_map(
            |((user_id, msisdn), (total_mb, roaming_mb, country), (start, end), (net, code))| {
                UsageFields {
                    user_id,
                    msisdn,
                    total_mb,
                    roaming_mb,
                    country,
                    start,
                    end,
                    network_type: net,
                    provider_code: code,
                }
            },
        )
}

fn charge_xml(id: &str, amount_cents: u32) -> String {
    format!(
        "<sms:ChargeSMS><sms:UserID>u</sms:UserID><sms:PhoneNumber>+4600</sms:PhoneNumber>\
         <sms:MessageID>{id}</sms:MessageID><sms:Timestamp>2025-04-01T12:30:00Z</sms:Timestamp>\
         <sms:ChargeAmount>{}.{:02}</sms:ChargeAmount><sms:Currency>EUR</sms:Currency></sms:ChargeSMS>",
        amount_cents / 100,
        amount_cents % 100
    )
}

// ── Property Tests ──────────────────────────────────────────────────────────

proptest! {
    /// Valid payloads convert as a pure regrouping of their fields.
    #[test]
    fn valid_usage_is_regrouped_unchanged(fields in arb_usage()) {
        let converted = convert_data_usage(&fields.to_json()).unwrap();

        prop_assert_eq!(&converted.user_id, &fields.user_id);
        prop_assert_eq!(&converted.msisdn, &fields.msisdn);
        prop_assert_eq!(converted.usage.total_mb, fields.total_mb);
        prop_assert_eq!(converted.usage.roaming_mb, fields.roaming_mb);
        prop_assert_eq!(&converted.usage.country, &fields.country);
        prop_assert_eq!(&converted.usage.network_type, &fields.network_type);
        prop_assert_eq!(&converted.usage.provider_code, &fields.provider_code);
        prop_assert_eq!(&converted.billing_period.start, &fields.start);
        prop_assert_eq!(&converted.billing_period.end, &fields.end);
    }

    /// Any negative volume is rejected, whichever field carries it.
    #[test]
    fn negative_volume_is_rejected(fields in arb_usage(), neg in 1u32..1_000_000, roaming in any::<bool>()) {
        let mut payload = fields.to_json();
        let key = if roaming { "roaming_mb" } else { "total_mb" };
        payload["usage"]["data"][key] = json!(-(f64::from(neg) / 100.0));

        let err = convert_data_usage(&payload).unwrap_err();
        prop_assert!(err.message().contains(key));
    }

    /// Country codes that are not exactly two characters are rejected.
    #[test]
    fn wrong_length_country_is_rejected(fields in arb_usage(), country in "[A-Z]{0,1}|[A-Z]{3,6}") {
        let mut payload = fields.to_json();
        payload["usage"]["data"]["country"] = json!(country);

        let err = convert_data_usage(&payload).unwrap_err();
        prop_assert!(err.message().contains("country"));
    }

    /// N repeated ChargeSMS elements yield N charges in document order.
    #[test]
    fn charge_count_matches_entries(amounts in prop::collection::vec(0u32..100_000, 1..=8)) {
        let body: String = amounts
            .iter()
            .enumerate()
            .map(|(i, cents)| charge_xml(&format!("m{i}"), *cents))
            .collect();
        let xml = format!("<soapenv:Envelope><soapenv:Body>{body}</soapenv:Body></soapenv:Envelope>");

        let charges = convert_sms_charge(&xml).unwrap();
        prop_assert_eq!(charges.len(), amounts.len());
        for (i, (charge, cents)) in charges.iter().zip(&amounts).enumerate() {
            prop_assert_eq!(&charge.message_id, &format!("m{i}"));
            prop_assert!((charge.amount - f64::from(*cents) / 100.0).abs() < 1e-9);
        }
    }

    /// Arbitrary text never panics the XML adapter or the SMS converter.
    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,200}") {
        let _ = parse_xml(&text);
        let _ = convert_sms_charge(&text);
    }

    /// Angle-bracketed noise never panics either.
    #[test]
    fn bracketed_noise_never_panics(inner in "[<>/a-z: =\"&;!\\[\\]-]{0,80}") {
        let _ = convert_sms_charge(&format!("<{inner}>"));
    }
}
