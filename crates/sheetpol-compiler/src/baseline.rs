//! Baseline rules for the all-pods policy
//!
//! Every namespace needs a handful of rules regardless of what the sheet
//! says: metrics scraping from the monitoring stack, DNS resolution through
//! node-local-dns, and the istiod control plane. The table is passed in
//! explicitly so callers can substitute their own.

use serde_yaml::{Mapping, Value};
use sheetpol_common::{Labels, CILIUM_LABEL_NAMESPACE};
use tracing::{debug, info};

use crate::extract::Groups;
use crate::options::BaselinePolicy;
use crate::record::{Direction, GroupKey, RuleRecord, ALL_PODS_KEYWORD};

/// One baseline rule
#[derive(Clone, Debug, PartialEq)]
pub struct BaselineRule {
    /// Peer name a sheet row would use for this rule; also used for detection
    pub destination: String,
    pub direction: Direction,
    pub port: String,
    pub protocol: String,
    /// Peer labels written into the rule
    pub labels: Labels,
    /// Opaque rules block, e.g. DNS match patterns
    pub rules: Option<Value>,
}

impl BaselineRule {
    /// Record for the all-pods group
    pub fn to_record(&self) -> RuleRecord {
        RuleRecord {
            protocol: self.protocol.clone(),
            source: ALL_PODS_KEYWORD.to_string(),
            direction: self.direction,
            destination: self.destination.clone(),
            port: self.port.clone(),
            labels: Some(self.labels.clone()),
            rules: self.rules.clone(),
        }
    }

    /// Whether a record in the sheet already describes this rule
    fn matches(&self, record: &RuleRecord) -> bool {
        record.destination == self.destination && record.direction == self.direction
    }
}

/// Immutable table of baseline rules
#[derive(Clone, Debug, PartialEq)]
pub struct Baseline {
    rules: Vec<BaselineRule>,
}

impl Baseline {
    pub fn new(rules: Vec<BaselineRule>) -> Self {
        Self { rules }
    }

    /// The standard table: prometheus scraping, node-local-dns and istiod
    pub fn reference() -> Self {
        Self::new(vec![
            BaselineRule {
                destination: "d8-monitoring/app:prometheus".to_string(),
                direction: Direction::Ingress,
                port: "15020".to_string(),
                protocol: "TCP".to_string(),
                labels: labels(&[
                    (CILIUM_LABEL_NAMESPACE, "d8-monitoring"),
                    ("app.kubernetes.io/name", "prometheus"),
                ]),
                rules: None,
            },
            BaselineRule {
                destination: "kube-system/node-local-dns".to_string(),
                direction: Direction::Egress,
                port: "53".to_string(),
                protocol: "UDP".to_string(),
                labels: labels(&[
                    (CILIUM_LABEL_NAMESPACE, "kube-system"),
                    ("k8s-app", "node-local-dns"),
                ]),
                rules: Some(dns_match_all()),
            },
            BaselineRule {
                destination: "d8-istio/istiod".to_string(),
                direction: Direction::Egress,
                port: "15012".to_string(),
                protocol: "TCP".to_string(),
                labels: labels(&[(CILIUM_LABEL_NAMESPACE, "d8-istio"), ("app", "istiod")]),
                rules: None,
            },
        ])
    }

    pub fn rules(&self) -> &[BaselineRule] {
        &self.rules
    }

    pub fn records(&self) -> Vec<RuleRecord> {
        self.rules.iter().map(BaselineRule::to_record).collect()
    }

    /// Check which baseline rules already appear anywhere in the groups
    pub fn detect(&self, groups: &Groups) -> Detection {
        let found = self
            .rules
            .iter()
            .filter(|rule| groups.values().flatten().any(|record| rule.matches(record)))
            .map(|rule| rule.destination.clone())
            .collect();
        Detection {
            found,
            expected: self.rules.len(),
        }
    }
}

impl Default for Baseline {
    fn default() -> Self {
        Self::reference()
    }
}

/// Which baseline rules the input already contains
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detection {
    /// Destinations of the baseline rules found in the input
    pub found: Vec<String>,
    /// Size of the baseline table
    pub expected: usize,
}

impl Detection {
    /// Every baseline rule is present in the input
    pub fn is_complete(&self) -> bool {
        self.found.len() == self.expected
    }
}

/// Result of baseline injection
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InjectOutcome {
    pub detection: Detection,
    /// The all-pods group was replaced by the baseline rules
    pub injected: bool,
}

impl InjectOutcome {
    /// Human-readable status line for the run
    pub fn status_line(&self) -> &'static str {
        match (self.detection.is_complete(), self.injected) {
            (true, true) => "Baseline rules detected in the input and added to the configuration.",
            (true, false) => {
                "Baseline rules detected in the input; all-pods rules kept as written."
            }
            (false, _) => "Baseline rules not detected in the input, added to the configuration.",
        }
    }
}

/// Put the baseline rules into the all-pods group according to `policy`,
/// then move the all-pods group to the front.
pub fn inject(groups: &mut Groups, baseline: &Baseline, policy: BaselinePolicy) -> InjectOutcome {
    let detection = baseline.detect(groups);
    debug!(
        found = ?detection.found,
        expected = detection.expected,
        "baseline detection"
    );

    let injected = match policy {
        BaselinePolicy::Always => true,
        BaselinePolicy::WhenMissing => !detection.is_complete(),
    };

    if injected {
        let records = baseline.records();
        if records.is_empty() {
            groups.shift_remove(&GroupKey::AllPods);
        } else {
            groups.insert(GroupKey::AllPods, records);
        }
        info!(rules = baseline.rules().len(), "baseline rules injected");
    }

    if let Some(index) = groups.get_index_of(&GroupKey::AllPods) {
        groups.move_index(index, 0);
    }

    InjectOutcome {
        detection,
        injected,
    }
}

fn labels(pairs: &[(&str, &str)]) -> Labels {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// `dns: [{matchPattern: '*'}]`
fn dns_match_all() -> Value {
    let mut pattern = Mapping::new();
    pattern.insert(
        Value::String("matchPattern".to_string()),
        Value::String("*".to_string()),
    );
    let mut rules = Mapping::new();
    rules.insert(
        Value::String("dns".to_string()),
        Value::Sequence(vec![Value::Mapping(pattern)]),
    );
    Value::Mapping(rules)
}
