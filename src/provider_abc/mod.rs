//! Provider ABC integration.
//!
//! Provider ABC reports mobile data usage through a REST/JSON endpoint and
//! SMS charges through a SOAP/XML endpoint.
//!
//! # Supported payloads
//!
//! - **Data usage**: decoded JSON (`convert_data_usage`)
//! - **SMS charges**: SOAP envelope with one or more `ChargeSMS`
//!   elements (`convert_sms_charge`)
//!
//! `process_user_data` combines both into an [`InternalFormat`](crate::core::InternalFormat).
//!
//! # Example
//!
//! ```
//! use mvno_normalize::provider_abc;
//! use serde_json::json;
//!
//! let usage = json!({
//!     "user_id": "abc123",
//!     "msisdn": "+46701234567",
//!     "usage": {
//!         "data": { "total_mb": 845.23, "roaming_mb": 210.50, "country": "SE" },
//!         "period": { "start": "2025-04-01T00:00:00Z", "end": "2025-04-30T23:59:59Z" }
//!     },
//!     "network": { "type": "4G", "provider_code": "SE01" }
//! });
//!
//! let record = provider_abc::process_user_data(&usage, None).unwrap();
//! assert_eq!(record.telgea_user_id, "abc123");
//! assert!(record.sms_charges.is_empty());
//! ```

mod data_usage;
mod integration;
pub mod schema;
mod sms_charge;

pub use data_usage::{DataUsage, convert_data_usage};
pub use integration::process_user_data;
pub use schema::OneOrMany;
pub use sms_charge::{convert_sms_charge, convert_sms_charge_with, normalize_charges};
