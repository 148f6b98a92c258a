//! Ingress and egress rule compilation
//!
//! Each record becomes exactly one Cilium rule: one peer selector plus a
//! single `toPorts` entry holding a single port.

use sheetpol_common::policy::{
    CidrRule, CiliumEgressRule, CiliumIngressRule, CiliumPort, CiliumPortRule, EndpointSelector,
    FqdnSelector,
};
use sheetpol_common::Labels;

use crate::classify::{classify, Peer};
use crate::options::RulesPlacement;
use crate::record::RuleRecord;

const ANY_PROTOCOL: &str = "ANY";

/// Build the ingress rule for a record, using `source` as the peer
pub fn build_ingress(record: &RuleRecord, placement: RulesPlacement) -> CiliumIngressRule {
    let mut rule = CiliumIngressRule::default();
    match resolve_peer(record.labels.as_ref(), &record.source) {
        Peer::Labels(labels) => rule.from_endpoints = vec![EndpointSelector::from_labels(labels)],
        Peer::Fqdn(name) => rule.from_fqdns = vec![FqdnSelector::name(name)],
        Peer::Cidr(cidr) => rule.from_cidr_set = vec![CidrRule { cidr }],
    }
    (rule.to_ports, rule.rules) = build_port_rules(record, placement);
    rule
}

/// Build the egress rule for a record, using `destination` as the peer
pub fn build_egress(record: &RuleRecord, placement: RulesPlacement) -> CiliumEgressRule {
    let mut rule = CiliumEgressRule::default();
    match resolve_peer(record.labels.as_ref(), &record.destination) {
        Peer::Labels(labels) => rule.to_endpoints = vec![EndpointSelector::from_labels(labels)],
        Peer::Fqdn(name) => rule.to_fqdns = vec![FqdnSelector::name(name)],
        Peer::Cidr(cidr) => rule.to_cidr_set = vec![CidrRule { cidr }],
    }
    (rule.to_ports, rule.rules) = build_port_rules(record, placement);
    rule
}

/// Explicit labels win over classification of the peer text
fn resolve_peer(labels: Option<&Labels>, text: &str) -> Peer {
    match labels {
        Some(labels) => Peer::Labels(labels.clone()),
        None => classify(text),
    }
}

/// Build the `toPorts` list and the rule-level `rules` block for a record.
///
/// The record's opaque rules land in exactly one of the two places,
/// depending on `placement`.
fn build_port_rules(
    record: &RuleRecord,
    placement: RulesPlacement,
) -> (Vec<CiliumPortRule>, Option<serde_yaml::Value>) {
    let port = CiliumPort {
        port: record.port.clone(),
        protocol: port_protocol(&record.protocol),
    };
    match placement {
        RulesPlacement::PortRule => (
            vec![CiliumPortRule {
                ports: vec![port],
                rules: record.rules.clone(),
            }],
            None,
        ),
        RulesPlacement::Rule => (
            vec![CiliumPortRule {
                ports: vec![port],
                rules: None,
            }],
            record.rules.clone(),
        ),
    }
}

/// Upper-cased protocol, or `None` for `ANY`
pub fn port_protocol(protocol: &str) -> Option<String> {
    let protocol = protocol.to_uppercase();
    (protocol != ANY_PROTOCOL).then_some(protocol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Direction;
    use sheetpol_common::parse_labels;

    fn record(direction: Direction, peer: &str, protocol: &str) -> RuleRecord {
        RuleRecord {
            protocol: protocol.to_string(),
            source: peer.to_string(),
            direction,
            destination: peer.to_string(),
            port: "8080".to_string(),
            labels: None,
            rules: None,
        }
    }

    fn dns_rules() -> serde_yaml::Value {
        serde_yaml::from_str("dns:\n- matchPattern: '*'\n").unwrap()
    }

    #[test]
    fn test_any_protocol_is_omitted() {
        let rec = record(Direction::Egress, "app:db", "any");
        let rule = build_egress(&rec, RulesPlacement::default());
        let port = &rule.to_ports[0].ports[0];
        assert_eq!(port.port, "8080");
        assert_eq!(port.protocol, None);
    }

    #[test]
    fn test_protocol_is_upper_cased() {
        let rec = record(Direction::Egress, "app:db", "tcp");
        let rule = build_egress(&rec, RulesPlacement::default());
        assert_eq!(rule.to_ports[0].ports[0].protocol.as_deref(), Some("TCP"));
    }

    #[test]
    fn test_ingress_label_peer() {
        let rule = build_ingress(
            &record(Direction::Ingress, "app:web,tier:frontend", "TCP"),
            RulesPlacement::default(),
        );
        assert_eq!(
            rule.from_endpoints,
            vec![EndpointSelector::from_labels(parse_labels("app:web,tier:frontend"))]
        );
        assert!(rule.from_fqdns.is_empty());
        assert!(rule.from_cidr_set.is_empty());
    }

    #[test]
    fn test_ingress_cidr_peer() {
        let rule = build_ingress(
            &record(Direction::Ingress, "10.0.0.0/8", "TCP"),
            RulesPlacement::default(),
        );
        assert_eq!(
            rule.from_cidr_set,
            vec![CidrRule {
                cidr: "10.0.0.0/8".to_string()
            }]
        );
        assert!(rule.from_endpoints.is_empty());
    }

    #[test]
    fn test_egress_fqdn_peer_is_lower_cased() {
        let rule = build_egress(
            &record(Direction::Egress, "API.Example.com", "TCP"),
            RulesPlacement::default(),
        );
        assert_eq!(rule.to_fqdns, vec![FqdnSelector::name("api.example.com")]);
        assert!(rule.to_endpoints.is_empty());
    }

    #[test]
    fn test_egress_uses_destination_not_source() {
        let mut rec = record(Direction::Egress, "app:db", "TCP");
        rec.source = "app:web".to_string();
        let rule = build_egress(&rec, RulesPlacement::default());
        let labels = rule.to_endpoints[0].match_labels.as_ref().unwrap();
        assert_eq!(labels["app"], "db");
    }

    #[test]
    fn test_peer_without_labels_keeps_empty_match_labels() {
        let rule = build_egress(
            &record(Direction::Egress, "backend", "TCP"),
            RulesPlacement::default(),
        );
        assert_eq!(
            rule.to_endpoints,
            vec![EndpointSelector::from_labels(Labels::new())]
        );

        let value = serde_yaml::to_value(&rule).unwrap();
        let selector = value["toEndpoints"][0].as_mapping().unwrap();
        assert_eq!(selector.len(), 1);
        assert!(value["toEndpoints"][0]["matchLabels"]
            .as_mapping()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_explicit_labels_bypass_classification() {
        let mut rec = record(Direction::Egress, "kube-system/node-local-dns", "UDP");
        rec.labels = Some(parse_labels("k8s-app:node-local-dns"));
        let rule = build_egress(&rec, RulesPlacement::default());
        let labels = rule.to_endpoints[0].match_labels.as_ref().unwrap();
        assert_eq!(labels["k8s-app"], "node-local-dns");
        assert!(rule.to_fqdns.is_empty());
    }

    #[test]
    fn test_rules_nest_in_port_rule() {
        let mut rec = record(Direction::Egress, "app:dns", "UDP");
        rec.rules = Some(dns_rules());
        let rule = build_egress(&rec, RulesPlacement::PortRule);
        assert_eq!(rule.to_ports[0].rules, Some(dns_rules()));
        assert_eq!(rule.rules, None);

        let value = serde_yaml::to_value(&rule).unwrap();
        assert_eq!(
            value["toPorts"][0]["rules"]["dns"][0]["matchPattern"].as_str(),
            Some("*")
        );
        assert!(value.get("rules").is_none());
    }

    #[test]
    fn test_rules_attach_to_rule() {
        let mut rec = record(Direction::Ingress, "app:dns", "UDP");
        rec.rules = Some(dns_rules());
        let rule = build_ingress(&rec, RulesPlacement::Rule);
        assert_eq!(rule.to_ports[0].rules, None);
        assert_eq!(rule.rules, Some(dns_rules()));

        let yaml = serde_yaml::to_string(&rule).unwrap();
        assert!(yaml.find("toPorts:").unwrap() < yaml.find("rules:").unwrap());
    }

    #[test]
    fn test_port_protocol() {
        assert_eq!(port_protocol("ANY"), None);
        assert_eq!(port_protocol("Any"), None);
        assert_eq!(port_protocol("udp").as_deref(), Some("UDP"));
        assert_eq!(port_protocol("").as_deref(), Some(""));
    }
}
