//! Conversion pipeline
//!
//! grid → records → baseline injection → policies → YAML → `<namespace>.yaml`.
//! The output file is written once, after everything else succeeded.

use std::path::{Path, PathBuf};

use sheetpol_common::policy::CiliumNetworkPolicy;
use sheetpol_common::yaml::render_documents;
use sheetpol_compiler::{
    assemble, extract, inject, Baseline, BaselinePolicy, Grid, InjectOutcome, RulesPlacement,
};
use tracing::info;

use crate::reader::{TabularSource, WorkbookReader};
use crate::{Error, Result};

/// Settings for one conversion run
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    pub rules_placement: RulesPlacement,
    pub baseline_policy: BaselinePolicy,
    pub baseline: Baseline,
    /// Directory the `<namespace>.yaml` file is written to
    pub output_dir: PathBuf,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            rules_placement: RulesPlacement::default(),
            baseline_policy: BaselinePolicy::default(),
            baseline: Baseline::reference(),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Converted policies for one namespace, rendered but not yet written
#[derive(Clone, Debug)]
pub struct Conversion {
    pub namespace: String,
    pub outcome: InjectOutcome,
    pub policies: Vec<CiliumNetworkPolicy>,
    pub yaml: String,
}

impl Conversion {
    pub fn file_name(&self) -> String {
        format!("{}.yaml", self.namespace)
    }
}

/// Convert a grid into rendered policies
pub fn convert(grid: &Grid, options: &ConvertOptions) -> Result<Conversion> {
    let mut extraction = extract(grid)?;
    let outcome = inject(
        &mut extraction.groups,
        &options.baseline,
        options.baseline_policy,
    );
    let policies = assemble(
        &extraction.namespace,
        &extraction.groups,
        options.rules_placement,
    );
    let yaml = render_documents(&policies)?;

    info!(
        namespace = %extraction.namespace,
        policies = policies.len(),
        "converted rule sheet"
    );
    Ok(Conversion {
        namespace: extraction.namespace,
        outcome,
        policies,
        yaml,
    })
}

/// Write a conversion to `<dir>/<namespace>.yaml`, replacing any existing file
pub fn write_output(conversion: &Conversion, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(conversion.file_name());
    std::fs::write(&path, &conversion.yaml).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Read, convert and write, printing status lines to stdout
pub fn convert_source(source: &impl TabularSource, options: &ConvertOptions) -> Result<PathBuf> {
    let grid = source.read_grid()?;
    let conversion = convert(&grid, options)?;
    println!("{}", conversion.outcome.status_line());

    let path = write_output(&conversion, &options.output_dir)?;
    println!("File created: {}", path.display());
    Ok(path)
}

/// Convert a workbook file
pub fn run(input: &Path, options: &ConvertOptions) -> Result<PathBuf> {
    convert_source(&WorkbookReader::new(input), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid {
        rows.iter().map(|r| r.iter().copied()).collect()
    }

    #[test]
    fn test_empty_sheet_yields_baseline_policy_only() {
        let sheet = grid(&[&["rules"], &["namespace: prod"]]);
        let conversion = convert(&sheet, &ConvertOptions::default()).unwrap();
        assert_eq!(conversion.namespace, "prod");
        assert_eq!(conversion.file_name(), "prod.yaml");
        assert_eq!(conversion.policies.len(), 1);
        assert_eq!(conversion.policies[0].metadata.name, "prod-default");
        assert_eq!(conversion.policies[0].spec.ingress.len(), 1);
        assert_eq!(conversion.policies[0].spec.egress.len(), 2);
        assert!(!conversion.outcome.detection.is_complete());
    }

    #[test]
    fn test_missing_namespace_is_an_extract_error() {
        let sheet = grid(&[&["rules"], &["prod"]]);
        let err = convert(&sheet, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Extract(_)));
        assert_eq!(err.exit_status(), 1);
    }

    #[test]
    fn test_write_output_names_file_after_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = grid(&[&["rules"], &["namespace: stage"]]);
        let conversion = convert(&sheet, &ConvertOptions::default()).unwrap();

        let path = write_output(&conversion, dir.path()).unwrap();

        assert_eq!(path, dir.path().join("stage.yaml"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), conversion.yaml);
    }

    #[test]
    fn test_write_output_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = grid(&[&["rules"], &["namespace: stage"]]);
        let conversion = convert(&sheet, &ConvertOptions::default()).unwrap();

        let err = write_output(&conversion, &dir.path().join("missing")).unwrap_err();

        assert!(matches!(err, Error::Write { .. }));
        assert!(err.to_string().contains("stage.yaml"));
    }
}
