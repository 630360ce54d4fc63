//! # Envelope
//! A collection is persisted as `{"schema_version": N, "records": [...]}`.
//! Version 0 is the legacy bare array (no envelope); it is still readable and
//! gets upgraded the next time the collection is written. A payload written by
//! a schema version newer than this library is masked as empty rather than
//! half-interpreted; reads never fail.

use serde_json::Value;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(serde::Deserialize)]
struct Envelope {
    schema_version: u32,
    records: Vec<Value>,
}

#[derive(serde::Serialize)]
struct EnvelopeRef<'a> {
    schema_version: u32,
    records: &'a [Value],
}

pub(crate) fn decode_payload(name: &str, raw: &str) -> Vec<Value> {
    let value = match serde_json::from_str::<Value>(raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("collection {name} holds corrupt JSON, treating as empty: {e}");
            return Vec::new();
        }
    };

    // Legacy layout: a bare array of records.
    if let Value::Array(records) = value {
        return records;
    }

    match serde_json::from_value::<Envelope>(value) {
        Ok(envelope) if envelope.schema_version <= SCHEMA_VERSION => envelope.records,
        Ok(envelope) => {
            log::warn!(
                "collection {name} was written by schema version {} (we speak {}), treating as empty",
                envelope.schema_version,
                SCHEMA_VERSION
            );
            Vec::new()
        }
        Err(e) => {
            log::warn!("collection {name} holds an unrecognized payload, treating as empty: {e}");
            Vec::new()
        }
    }
}

pub(crate) fn encode_payload(records: &[Value]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EnvelopeRef {
        schema_version: SCHEMA_VERSION,
        records,
    })
}
