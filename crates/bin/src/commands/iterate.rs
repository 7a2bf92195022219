//! Iterate command - prints entries in an iteration strategy's order.

use keyarray::{Mode, OrderedContainer, Value};

use crate::cli::IterateArgs;
use crate::commands::read_json;
use crate::output::{OutputFormat, print_entries};

/// Run the iterate command
pub fn run(args: &IterateArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let mut container =
        OrderedContainer::with_options(read_json(&args.input)?, Mode::default(), &args.strategy)?;

    let entries: Vec<(String, Value)> = container
        .produce_iterator()
        .map(|(key, slot)| (key.to_string(), slot.into_value()))
        .collect();

    match format {
        OutputFormat::Human => {
            if entries.is_empty() {
                println!("No entries.");
                return Ok(());
            }
            print_entries(entries.iter().map(|(key, value)| (key.clone(), value)));
        }
        OutputFormat::Json => {
            let pairs: Vec<Value> = entries
                .into_iter()
                .map(|(key, value)| serde_json::json!([key, value]))
                .collect();
            println!("{}", serde_json::to_string(&pairs)?);
        }
    }

    Ok(())
}
