//! Normalize the bundled sample payloads and print the resulting record.
//!
//! Run with: `RUST_LOG=debug cargo run --example process_user`

use std::error::Error;

use mvno_normalize::provider_abc::process_user_data;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

const SAMPLE_JSON: &str = include_str!("../tests/fixtures/sample.json");
const SAMPLE_XML: &str = include_str!("../tests/fixtures/sample_multiple.xml");

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let usage: Value = serde_json::from_str(SAMPLE_JSON)?;

    let record = process_user_data(&usage, Some(SAMPLE_XML))?;
    println!("{}", serde_json::to_string_pretty(&record)?);

    // A broken SMS payload shows the full error chain.
    if let Err(err) = process_user_data(&usage, Some("<invalid>xml")) {
        eprintln!("error [{}]: {err}", err.code());
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
    }

    Ok(())
}
