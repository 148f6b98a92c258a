//! Cilium CiliumNetworkPolicy types
//!
//! Field order in every struct is the order keys are rendered in, so it
//! follows the layout operators expect to read in the generated YAML.

use serde::{Deserialize, Serialize};

use crate::labels::Labels;

/// Cilium Network Policy for one group of workloads in a namespace
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CiliumNetworkPolicy {
    /// API version
    #[serde(default = "CiliumNetworkPolicy::api_version")]
    pub api_version: String,
    /// Kind
    #[serde(default = "CiliumNetworkPolicy::kind")]
    pub kind: String,
    /// Metadata
    pub metadata: PolicyMetadata,
    /// Spec
    pub spec: CiliumNetworkPolicySpec,
}

impl CiliumNetworkPolicy {
    const API_VERSION: &'static str = "cilium.io/v2";
    const KIND: &'static str = "CiliumNetworkPolicy";

    fn api_version() -> String {
        Self::API_VERSION.to_string()
    }
    fn kind() -> String {
        Self::KIND.to_string()
    }

    /// Create a new CiliumNetworkPolicy
    pub fn new(metadata: PolicyMetadata, spec: CiliumNetworkPolicySpec) -> Self {
        Self {
            api_version: Self::API_VERSION.to_string(),
            kind: Self::KIND.to_string(),
            metadata,
            spec,
        }
    }
}

/// Name and namespace of a generated policy
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PolicyMetadata {
    /// Resource name
    pub name: String,
    /// Resource namespace
    pub namespace: String,
}

impl PolicyMetadata {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

/// CiliumNetworkPolicy spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CiliumNetworkPolicySpec {
    /// Endpoint selector (which pods this applies to)
    pub endpoint_selector: EndpointSelector,
    /// Ingress rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingress: Vec<CiliumIngressRule>,
    /// Egress rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub egress: Vec<CiliumEgressRule>,
}

/// Endpoint selector
///
/// A selector without `matchLabels` renders as `{}` and selects every
/// endpoint in the namespace. A selector built from labels always renders
/// `matchLabels`, even when the map is empty.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSelector {
    /// Match labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<Labels>,
}

impl EndpointSelector {
    pub fn from_labels(labels: Labels) -> Self {
        Self {
            match_labels: Some(labels),
        }
    }

    /// Selector that matches every endpoint
    pub fn all() -> Self {
        Self::default()
    }
}

/// Cilium ingress rule
///
/// Exactly one of the `from*` peer lists is populated per rule.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CiliumIngressRule {
    /// From endpoints
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub from_endpoints: Vec<EndpointSelector>,
    /// From FQDNs
    #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "fromFQDNs")]
    pub from_fqdns: Vec<FqdnSelector>,
    /// From CIDR set
    #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "fromCIDRSet")]
    pub from_cidr_set: Vec<CidrRule>,
    /// To ports
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_ports: Vec<CiliumPortRule>,
    /// Opaque rules block placed beside `toPorts`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<serde_yaml::Value>,
}

/// Cilium egress rule
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CiliumEgressRule {
    /// To endpoints (in-cluster workloads)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_endpoints: Vec<EndpointSelector>,
    /// To FQDNs (external DNS names)
    /// Note: Cilium uses uppercase "FQDNs" not camelCase "Fqdns"
    #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "toFQDNs")]
    pub to_fqdns: Vec<FqdnSelector>,
    /// To CIDR set (IP ranges)
    #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "toCIDRSet")]
    pub to_cidr_set: Vec<CidrRule>,
    /// To ports
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_ports: Vec<CiliumPortRule>,
    /// Opaque rules block placed beside `toPorts`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<serde_yaml::Value>,
}

/// FQDN selector
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FqdnSelector {
    /// Exact match name
    pub match_name: String,
}

impl FqdnSelector {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            match_name: name.into(),
        }
    }
}

/// Entry of a `fromCIDRSet` / `toCIDRSet` list
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CidrRule {
    /// CIDR block, copied as written
    pub cidr: String,
}

/// Cilium port rule
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CiliumPortRule {
    /// Ports
    pub ports: Vec<CiliumPort>,
    /// Opaque L7 rules (e.g. DNS match patterns) scoped to these ports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<serde_yaml::Value>,
}

/// Cilium port specification
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CiliumPort {
    /// Port number or name
    pub port: String,
    /// Protocol (TCP, UDP, ...). Absent means any protocol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}
