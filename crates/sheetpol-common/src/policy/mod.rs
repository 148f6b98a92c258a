//! Policy type definitions
//!
//! Types for generating Cilium CiliumNetworkPolicy resources (L3/L4 endpoint,
//! FQDN and CIDR based network enforcement).

mod cilium;

pub use cilium::{
    CidrRule, CiliumEgressRule, CiliumIngressRule, CiliumNetworkPolicy, CiliumNetworkPolicySpec,
    CiliumPort, CiliumPortRule, EndpointSelector, FqdnSelector, PolicyMetadata,
};
