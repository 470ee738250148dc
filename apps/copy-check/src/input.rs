// Input loading: file argument or stdin
use anyhow::{Context, Result};
use shared_types::Campaign;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

pub fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

pub fn parse_campaign(json: &str) -> Result<Campaign> {
    serde_json::from_str(json).context("Input is not a valid campaign document")
}

pub fn read_campaign(file: Option<&Path>) -> Result<Campaign> {
    parse_campaign(&read_input(file)?)
}
