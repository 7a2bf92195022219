//! Subcommand implementations.

use std::io::Read;

use keyarray::Value;

use crate::cli::InputArgs;

pub mod iterate;
pub mod sort;
pub mod state;

/// Read raw input bytes from the file named in `args`, or stdin.
pub fn read_input(args: &InputArgs) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    match &args.input {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Reading input file");
            Ok(std::fs::read(path)?)
        }
        None => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes)?;
            Ok(bytes)
        }
    }
}

/// Read input and parse it as JSON.
pub fn read_json(args: &InputArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let bytes = read_input(args)?;
    Ok(serde_json::from_slice(&bytes)?)
}
