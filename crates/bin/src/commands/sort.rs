//! Sort command - loads JSON, applies one sort variant and prints the result.

use keyarray::{OrderedContainer, SortFlags};

use crate::cli::{SortArgs, SortVariant};
use crate::commands::read_json;
use crate::output::OutputFormat;

/// Run the sort command
pub fn run(args: &SortArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let mut container = OrderedContainer::new(read_json(&args.input)?);
    let flags = SortFlags::from(args.flags);

    match args.variant {
        SortVariant::ByValue => container.sort_by_value_keep_keys(flags),
        SortVariant::ByKey => container.sort_by_key_ascending(flags),
        SortVariant::ByKeyDesc => container.sort_by_key_descending(flags),
        SortVariant::Values => container.sort_values_ascending(flags),
        SortVariant::ValuesDesc => container.sort_values_descending(flags),
        SortVariant::Natural => container.natural_sort(false),
        SortVariant::NaturalCi => container.natural_sort(true),
    };
    tracing::info!(entries = container.count(), variant = ?args.variant, "Sorted container");

    match format {
        OutputFormat::Human => println!("{}", serde_json::to_string_pretty(&container)?),
        OutputFormat::Json => println!("{}", serde_json::to_string(&container)?),
    }

    Ok(())
}
