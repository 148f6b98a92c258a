//! sheetpol CLI library
//!
//! Converts a spreadsheet of network access rules into CiliumNetworkPolicy
//! YAML, one policy per group of workloads.

pub mod error;
pub mod pipeline;
pub mod reader;

pub use error::{Error, Result};
pub use pipeline::{convert, convert_source, Conversion, ConvertOptions};

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use sheetpol_compiler::{Baseline, BaselinePolicy, RulesPlacement};

/// Convert an access-rule spreadsheet into CiliumNetworkPolicy YAML
#[derive(Parser, Debug)]
#[command(name = "sheetpol")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Spreadsheet with the access rules (xlsx, xlsm, xlsb, xls, ods)
    pub input: PathBuf,

    /// Where opaque rules blocks (e.g. DNS patterns) are attached
    #[arg(long, value_enum, default_value_t)]
    pub rules_placement: RulesPlacement,

    /// When the baseline rules replace the all-pods group
    #[arg(long, value_enum, default_value_t)]
    pub baseline: BaselinePolicy,

    /// Directory to write `<namespace>.yaml` into
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

impl Cli {
    /// Parse arguments, returning usage problems as [`Error::Usage`]
    pub fn try_parse_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self::try_parse_from(args)?)
    }

    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            rules_placement: self.rules_placement,
            baseline_policy: self.baseline,
            baseline: Baseline::reference(),
            output_dir: self.output_dir.clone(),
        }
    }

    /// Run the conversion, returning the written file
    pub fn run(self) -> Result<PathBuf> {
        pipeline::run(&self.input, &self.options())
    }
}
