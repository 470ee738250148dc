//! JSON reporter

use anyhow::Result;
use serde::Serialize;

pub struct JsonReporter;

impl JsonReporter {
    pub fn format<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
        let output = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(output)
    }
}
