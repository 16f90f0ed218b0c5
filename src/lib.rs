//! # mvno-normalize
//!
//! Normalizes billing payloads from MVNO providers (mobile data usage and
//! SMS charges) into a single internal record for downstream systems.
//!
//! Every conversion is a pure, synchronous function: an untyped payload
//! goes in, and either a validated [`InternalFormat`](crate::core::InternalFormat)
//! or a descriptive error comes out. Malformed input never panics.
//!
//! ## Quick Start
//!
//! ```rust
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
//! let sms = r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:sms="http://provider.com/sms">
//!   <soapenv:Body>
//!     <sms:ChargeSMS>
//!       <sms:UserID>abc123</sms:UserID>
//!       <sms:PhoneNumber>+46701234567</sms:PhoneNumber>
//!       <sms:MessageID>msg789</sms:MessageID>
//!       <sms:Timestamp>2025-04-01T12:30:00Z</sms:Timestamp>
//!       <sms:ChargeAmount>0.05</sms:ChargeAmount>
//!       <sms:Currency>EUR</sms:Currency>
//!     </sms:ChargeSMS>
//!   </soapenv:Body>
//! </soapenv:Envelope>"#;
//!
//! let record = provider_abc::process_user_data(&usage, Some(sms)).unwrap();
//! assert_eq!(record.sms_charges.len(), 1);
//! assert_eq!(record.usage_data.network_type, "4G");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Internal record types, errors, schema toolkit |
//! | `xml` | XML-to-tree parser adapter |
//! | `provider-abc` (default) | Provider ABC converters and orchestrator |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xml")]
pub mod xml;

#[cfg(feature = "provider-abc")]
pub mod provider_abc;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
