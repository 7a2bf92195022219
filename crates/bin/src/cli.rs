//! CLI argument definitions for the keyarray binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use keyarray::{Mode, SortFlags};

use crate::output::OutputFormat;

/// keyarray ordered container tool
#[derive(Parser, Debug)]
#[command(name = "keyarray")]
#[command(about = "keyarray: ordered key/value containers over JSON data")]
#[command(version)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "human", env = "KEYARRAY_FORMAT")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load JSON into a container, sort it and print the result
    Sort(SortArgs),
    /// Load JSON into a container and print its serialized state
    Pack(PackArgs),
    /// Restore a serialized state and show its contents
    Unpack(UnpackArgs),
    /// Print entries in an iteration strategy's order
    Iterate(IterateArgs),
}

/// Where to read input from
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Input file. Reads stdin if omitted
    #[arg(short, long, env = "KEYARRAY_INPUT")]
    pub input: Option<PathBuf>,
}

/// Sort variant to apply
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortVariant {
    /// By value, keys kept with their values
    ByValue,
    /// By key, ascending
    ByKey,
    /// By key, descending
    ByKeyDesc,
    /// By value ascending, reindexed from 0
    Values,
    /// By value descending, reindexed from 0
    ValuesDesc,
    /// Natural order over values, keys kept
    Natural,
    /// Natural order over values ignoring case, keys kept
    NaturalCi,
}

/// Comparison rules for flag-driven sorts
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FlagsArg {
    Regular,
    Numeric,
    String,
    StringCi,
    Natural,
    NaturalCi,
}

impl From<FlagsArg> for SortFlags {
    fn from(flags: FlagsArg) -> Self {
        match flags {
            FlagsArg::Regular => SortFlags::Regular,
            FlagsArg::Numeric => SortFlags::Numeric,
            FlagsArg::String => SortFlags::String,
            FlagsArg::StringCi => SortFlags::StringCaseInsensitive,
            FlagsArg::Natural => SortFlags::Natural,
            FlagsArg::NaturalCi => SortFlags::NaturalCaseInsensitive,
        }
    }
}

/// Property-access mode
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Properties are the container's own attributes
    Standard,
    /// Properties are storage keys (default)
    Array,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Standard => Mode::StandardProperties,
            ModeArg::Array => Mode::ArrayAsProperties,
        }
    }
}

/// Arguments for the sort command
#[derive(clap::Args, Debug)]
pub struct SortArgs {
    /// Sort variant to apply
    pub variant: SortVariant,

    /// Comparison rules (ignored by the natural variants)
    #[arg(long, default_value = "regular", env = "KEYARRAY_SORT_FLAGS")]
    pub flags: FlagsArg,

    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the pack command
#[derive(clap::Args, Debug)]
pub struct PackArgs {
    /// Property-access mode to record
    #[arg(short, long, default_value = "array", env = "KEYARRAY_MODE")]
    pub mode: ModeArg,

    /// Iteration strategy to record
    #[arg(short, long, default_value = "array_iterator", env = "KEYARRAY_STRATEGY")]
    pub strategy: String,

    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the unpack command
#[derive(clap::Args, Debug)]
pub struct UnpackArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Arguments for the iterate command
#[derive(clap::Args, Debug)]
pub struct IterateArgs {
    /// Iteration strategy to traverse with
    #[arg(short, long, default_value = "array_iterator", env = "KEYARRAY_STRATEGY")]
    pub strategy: String,

    #[command(flatten)]
    pub input: InputArgs,
}
