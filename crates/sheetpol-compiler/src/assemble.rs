//! Policy assembly
//!
//! One CiliumNetworkPolicy per group. The group's source text selects the
//! endpoints the policy applies to; the all-pods group selects everything.

use sheetpol_common::policy::{
    CiliumNetworkPolicy, CiliumNetworkPolicySpec, EndpointSelector, PolicyMetadata,
};
use sheetpol_common::{format_labels, parse_labels, Labels};
use tracing::debug;

use crate::extract::Groups;
use crate::options::RulesPlacement;
use crate::record::{Direction, GroupKey, RuleRecord};
use crate::rules::{build_egress, build_ingress};

/// Name suffix for policies whose group has no labels
const DEFAULT_SUFFIX: &str = "default";

/// Build one policy per group, in group order
pub fn assemble(
    namespace: &str,
    groups: &Groups,
    placement: RulesPlacement,
) -> Vec<CiliumNetworkPolicy> {
    groups
        .iter()
        .map(|(key, records)| build_policy(namespace, key, records, placement))
        .collect()
}

/// Build the policy for a single group
pub fn build_policy(
    namespace: &str,
    key: &GroupKey,
    records: &[RuleRecord],
    placement: RulesPlacement,
) -> CiliumNetworkPolicy {
    let labels = group_labels(key);
    let name = policy_name(namespace, &labels);

    let ingress: Vec<_> = records
        .iter()
        .filter(|r| r.direction == Direction::Ingress)
        .map(|r| build_ingress(r, placement))
        .collect();
    let egress: Vec<_> = records
        .iter()
        .filter(|r| r.direction == Direction::Egress)
        .map(|r| build_egress(r, placement))
        .collect();

    debug!(
        policy = %name,
        selector = %format_labels(&labels),
        ingress = ingress.len(),
        egress = egress.len(),
        "assembled policy"
    );

    CiliumNetworkPolicy::new(
        PolicyMetadata::new(name, namespace),
        CiliumNetworkPolicySpec {
            endpoint_selector: endpoint_selector(labels),
            ingress,
            egress,
        },
    )
}

/// A group without labels selects every endpoint: `endpointSelector: {}`
fn endpoint_selector(labels: Labels) -> EndpointSelector {
    if labels.is_empty() {
        EndpointSelector::all()
    } else {
        EndpointSelector::from_labels(labels)
    }
}

fn group_labels(key: &GroupKey) -> Labels {
    match key {
        GroupKey::AllPods => Labels::new(),
        GroupKey::Source(source) => parse_labels(source),
    }
}

/// `{namespace}-{first label value}`, or `{namespace}-default` without labels
fn policy_name(namespace: &str, labels: &Labels) -> String {
    let suffix = labels
        .values()
        .next()
        .map(String::as_str)
        .unwrap_or(DEFAULT_SUFFIX);
    format!("{}-{}", namespace, suffix)
}
