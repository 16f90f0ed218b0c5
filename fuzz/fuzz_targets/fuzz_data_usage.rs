#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        if let Ok(usage) = mvno_normalize::provider_abc::convert_data_usage(&value) {
            // Anything accepted must also pass the internal-format checks.
            let record = mvno_normalize::InternalFormat::new(
                usage.user_id,
                usage.msisdn,
                usage.usage,
                usage.billing_period,
            );
            assert!(mvno_normalize::validate_internal_format(&record).is_empty());
        }
    }
});
