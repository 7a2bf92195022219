//! State commands - pack JSON into serialized container state and unpack it again.

use keyarray::{Mode, OrderedContainer};

use crate::cli::{PackArgs, UnpackArgs};
use crate::commands::{read_input, read_json};
use crate::output::{OutputFormat, print_entries};

/// Run the pack command
pub fn pack(args: &PackArgs) -> Result<(), Box<dyn std::error::Error>> {
    let input = read_json(&args.input)?;
    let container = OrderedContainer::with_options(input, Mode::from(args.mode), &args.strategy)?;
    let bytes = container.serialize()?;
    println!("{}", String::from_utf8(bytes)?);
    Ok(())
}

/// Run the unpack command
pub fn unpack(args: &UnpackArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let container = OrderedContainer::deserialize(&read_input(&args.input)?)?;

    match format {
        OutputFormat::Human => {
            println!("Mode:        {}", container.mode());
            println!("Strategy:    {}", container.iteration_strategy());
            println!("Entries:     {}", container.count());
            if !container.attributes().is_empty() {
                println!("Attributes:  {}", container.attributes().len());
            }
            if container.is_empty() {
                return Ok(());
            }
            println!();
            print_entries(container.iter().map(|(key, value)| (key.to_string(), value)));
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "storage": container.to_json(),
                "mode": container.mode(),
                "iteration_strategy": container.iteration_strategy(),
                "attributes": container.attributes(),
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    Ok(())
}
