//! Shared types for sheetpol
//!
//! Contains the CiliumNetworkPolicy resource model, the label string parser
//! used by both the row extractor and the rule compiler, and multi-document
//! YAML rendering.

pub mod error;
pub mod labels;
pub mod policy;
pub mod yaml;

pub use error::{Error, Result};
pub use labels::{format_labels, parse_labels, Labels};

/// Label key Cilium uses for a pod's namespace
pub const CILIUM_LABEL_NAMESPACE: &str = "io.kubernetes.pod.namespace";
