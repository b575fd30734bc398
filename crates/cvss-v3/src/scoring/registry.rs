use super::domain::{CvssError, MetricEntry, MetricGroup};
use std::collections::HashMap;
use std::sync::OnceLock;

const BASE_KEYS: &[&str] = &["av", "ac", "pr", "ui", "scp", "ci", "ii", "ai"];
const TEMPORAL_KEYS: &[&str] = &["ex", "rl", "rc"];
const ENVIRONMENTAL_KEYS: &[&str] = &[
    "cr", "ir", "ar", "mav", "mac", "mpr", "mui", "mscp", "mci", "mii", "mai",
];

/// (metric key, human readable name, options in display order).
type MetricTable = &'static [(&'static str, &'static str, &'static [MetricEntry])];

const fn entry(title: &'static str, value: f64) -> MetricEntry {
    MetricEntry { title, value }
}

const BASE_TABLE: MetricTable = &[
    (
        "av",
        "Attack Vector",
        &[
            entry("AV:N", 0.85),
            entry("AV:A", 0.62),
            entry("AV:L", 0.55),
            entry("AV:P", 0.2),
        ],
    ),
    (
        "ac",
        "Attack Complexity",
        &[entry("AC:L", 0.77), entry("AC:H", 0.44)],
    ),
    (
        "pr",
        "Privileges Required",
        &[
            entry("PR:N", 0.85),
            entry("PR:L", 0.62),
            entry("PR:H", 0.27),
        ],
    ),
    (
        "ui",
        "User Interaction",
        &[entry("UI:N", 0.85), entry("UI:R", 0.62)],
    ),
    ("scp", "Scope", &[entry("S:U", 0.0), entry("S:C", 1.0)]),
    (
        "ci",
        "Confidentiality Impact",
        &[entry("C:N", 0.0), entry("C:L", 0.22), entry("C:H", 0.56)],
    ),
    (
        "ii",
        "Integrity Impact",
        &[entry("I:N", 0.0), entry("I:L", 0.22), entry("I:H", 0.56)],
    ),
    (
        "ai",
        "Availability Impact",
        &[entry("A:N", 0.0), entry("A:L", 0.22), entry("A:H", 0.56)],
    ),
];

const TEMPORAL_TABLE: MetricTable = &[
    (
        "ex",
        "Exploit Code Maturity",
        &[
            entry("E:X", 1.0),
            entry("E:U", 0.91),
            entry("E:P", 0.94),
            entry("E:F", 0.97),
            entry("E:H", 1.0),
        ],
    ),
    (
        "rl",
        "Remediation Level",
        &[
            entry("RL:X", 1.0),
            entry("RL:O", 0.95),
            entry("RL:T", 0.96),
            entry("RL:W", 0.97),
            entry("RL:U", 1.0),
        ],
    ),
    (
        "rc",
        "Report Confidence",
        &[
            entry("RC:X", 1.0),
            entry("RC:U", 0.92),
            entry("RC:R", 0.96),
            entry("RC:C", 1.0),
        ],
    ),
];

const ENVIRONMENTAL_TABLE: MetricTable = &[
    (
        "cr",
        "Confidentiality Requirement",
        &[
            entry("CR:X", 1.0),
            entry("CR:L", 0.5),
            entry("CR:M", 1.0),
            entry("CR:H", 1.5),
        ],
    ),
    (
        "ir",
        "Integrity Requirement",
        &[
            entry("IR:X", 1.0),
            entry("IR:L", 0.5),
            entry("IR:M", 1.0),
            entry("IR:H", 1.5),
        ],
    ),
    (
        "ar",
        "Availability Requirement",
        &[
            entry("AR:X", 1.0),
            entry("AR:L", 0.5),
            entry("AR:M", 1.0),
            entry("AR:H", 1.5),
        ],
    ),
    (
        "mav",
        "Modified Attack Vector",
        &[
            entry("MAV:X", -1.0),
            entry("MAV:N", 0.85),
            entry("MAV:A", 0.62),
            entry("MAV:L", 0.55),
            entry("MAV:P", 0.2),
        ],
    ),
    (
        "mac",
        "Modified Attack Complexity",
        &[entry("MAC:X", -1.0), entry("MAC:L", 0.77), entry("MAC:H", 0.44)],
    ),
    (
        "mpr",
        "Modified Privileges Required",
        &[
            entry("MPR:X", -1.0),
            entry("MPR:N", 0.85),
            entry("MPR:L", 0.62),
            entry("MPR:H", 0.27),
        ],
    ),
    (
        "mui",
        "Modified User Interaction",
        &[entry("MUI:X", -1.0), entry("MUI:N", 0.85), entry("MUI:R", 0.62)],
    ),
    (
        "mscp",
        "Modified Scope",
        &[entry("MS:X", -1.0), entry("MS:U", 0.0), entry("MS:C", 1.0)],
    ),
    (
        "mci",
        "Modified Confidentiality Impact",
        &[
            entry("MC:X", -1.0),
            entry("MC:N", 0.0),
            entry("MC:L", 0.22),
            entry("MC:H", 0.56),
        ],
    ),
    (
        "mii",
        "Modified Integrity Impact",
        &[
            entry("MI:X", -1.0),
            entry("MI:N", 0.0),
            entry("MI:L", 0.22),
            entry("MI:H", 0.56),
        ],
    ),
    (
        "mai",
        "Modified Availability Impact",
        &[
            entry("MA:X", -1.0),
            entry("MA:N", 0.0),
            entry("MA:L", 0.22),
            entry("MA:H", 0.56),
        ],
    ),
];

static BASE_REGISTRY: OnceLock<MetricRegistry> = OnceLock::new();
static TEMPORAL_REGISTRY: OnceLock<MetricRegistry> = OnceLock::new();
static ENVIRONMENTAL_REGISTRY: OnceLock<MetricRegistry> = OnceLock::new();

/// Catalogue row describing one metric and its selectable options.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MetricDefinition {
    pub key: &'static str,
    pub name: &'static str,
    pub options: &'static [MetricEntry],
}

/// Immutable title-to-weight table for one metric group.
#[derive(Debug)]
pub struct MetricRegistry {
    group: MetricGroup,
    keys: &'static [&'static str],
    table: MetricTable,
    by_title: HashMap<&'static str, (&'static str, MetricEntry)>,
}

impl MetricRegistry {
    pub fn for_group(group: MetricGroup) -> &'static MetricRegistry {
        match group {
            MetricGroup::Base => BASE_REGISTRY.get_or_init(|| Self::build(group)),
            MetricGroup::Temporal => TEMPORAL_REGISTRY.get_or_init(|| Self::build(group)),
            MetricGroup::Environmental => {
                ENVIRONMENTAL_REGISTRY.get_or_init(|| Self::build(group))
            }
        }
    }

    fn build(group: MetricGroup) -> Self {
        let (keys, table) = match group {
            MetricGroup::Base => (BASE_KEYS, BASE_TABLE),
            MetricGroup::Temporal => (TEMPORAL_KEYS, TEMPORAL_TABLE),
            MetricGroup::Environmental => (ENVIRONMENTAL_KEYS, ENVIRONMENTAL_TABLE),
        };

        let mut by_title = HashMap::new();
        for (key, _, options) in table {
            for option in options.iter() {
                by_title.insert(option.title, (*key, *option));
            }
        }

        Self {
            group,
            keys,
            table,
            by_title,
        }
    }

    pub fn group(&self) -> MetricGroup {
        self.group
    }

    /// Metric keys in canonical vector order.
    pub fn keys(&self) -> &'static [&'static str] {
        self.keys
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|candidate| *candidate == key)
    }

    /// Exact, case-sensitive lookup of a title anywhere in the group.
    pub fn lookup(&self, title: &str) -> Result<MetricEntry, CvssError> {
        self.by_title
            .get(title)
            .map(|(_, entry)| *entry)
            .ok_or_else(|| CvssError::UnknownMetricTitle {
                group: self.group,
                metric: None,
                title: title.to_string(),
            })
    }

    /// Lookup that also requires the title to belong to the given metric.
    pub fn lookup_for(&self, key: &'static str, title: &str) -> Result<MetricEntry, CvssError> {
        match self.by_title.get(title) {
            Some((owner, entry)) if *owner == key => Ok(*entry),
            _ => Err(CvssError::UnknownMetricTitle {
                group: self.group,
                metric: Some(key),
                title: title.to_string(),
            }),
        }
    }

    /// Resolves a caller supplied key to the registry's static key.
    pub fn canonical_key(&self, key: &str) -> Result<&'static str, CvssError> {
        self.keys
            .iter()
            .copied()
            .find(|candidate| *candidate == key)
            .ok_or_else(|| CvssError::UnknownMetricKey {
                group: self.group,
                key: key.to_string(),
            })
    }

    /// Initial title for a metric: empty for Base, the "X" option otherwise.
    pub fn default_title(&self, key: &str) -> &'static str {
        if self.group == MetricGroup::Base {
            return "";
        }

        self.table
            .iter()
            .find(|(candidate, _, _)| *candidate == key)
            .and_then(|(_, _, options)| options.first())
            .map(|option| option.title)
            .unwrap_or("")
    }

    pub fn definitions(&self) -> Vec<MetricDefinition> {
        self.table
            .iter()
            .map(|(key, name, options)| MetricDefinition {
                key: *key,
                name: *name,
                options: *options,
            })
            .collect()
    }
}

/// Group-level lookup by exact title.
pub fn lookup(group: MetricGroup, title: &str) -> Result<MetricEntry, CvssError> {
    MetricRegistry::for_group(group).lookup(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_group_exposes_keys_in_vector_order() {
        assert_eq!(
            MetricRegistry::for_group(MetricGroup::Base).keys(),
            &["av", "ac", "pr", "ui", "scp", "ci", "ii", "ai"]
        );
        assert_eq!(
            MetricRegistry::for_group(MetricGroup::Temporal).keys(),
            &["ex", "rl", "rc"]
        );
        assert_eq!(
            MetricRegistry::for_group(MetricGroup::Environmental)
                .keys()
                .len(),
            11
        );
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let entry = lookup(MetricGroup::Base, "AV:N").expect("known title");
        assert_eq!(entry.value, 0.85);

        let err = lookup(MetricGroup::Base, "av:n").expect_err("lowercase rejected");
        assert!(matches!(err, CvssError::UnknownMetricTitle { metric: None, .. }));
    }

    #[test]
    fn lookup_for_rejects_titles_from_other_metrics() {
        let registry = MetricRegistry::for_group(MetricGroup::Base);
        assert!(registry.lookup_for("ac", "AC:H").is_ok());

        let err = registry
            .lookup_for("av", "AC:H")
            .expect_err("title belongs to ac");
        assert_eq!(
            err,
            CvssError::UnknownMetricTitle {
                group: MetricGroup::Base,
                metric: Some("av"),
                title: "AC:H".to_string(),
            }
        );
    }

    #[test]
    fn groups_do_not_share_titles() {
        assert!(lookup(MetricGroup::Temporal, "AV:N").is_err());
        assert!(lookup(MetricGroup::Environmental, "PR:L").is_err());
        assert_eq!(
            lookup(MetricGroup::Environmental, "MPR:L")
                .expect("modified title")
                .value,
            0.62
        );
    }

    #[test]
    fn defaults_distinguish_unset_base_from_not_defined() {
        let base = MetricRegistry::for_group(MetricGroup::Base);
        assert_eq!(base.default_title("av"), "");

        let temporal = MetricRegistry::for_group(MetricGroup::Temporal);
        assert_eq!(temporal.default_title("ex"), "E:X");
        assert_eq!(temporal.lookup("E:X").expect("not defined").value, 1.0);

        let environmental = MetricRegistry::for_group(MetricGroup::Environmental);
        assert_eq!(environmental.default_title("mscp"), "MS:X");
        assert!(environmental
            .lookup("MS:X")
            .expect("not defined")
            .inherits_from_base());
        assert_eq!(environmental.default_title("cr"), "CR:X");
    }

    #[test]
    fn weights_stay_within_documented_range() {
        for group in MetricGroup::ordered() {
            for definition in MetricRegistry::for_group(group).definitions() {
                for option in definition.options {
                    assert!(
                        (-1.0..=1.5).contains(&option.value),
                        "{} out of range",
                        option.title
                    );
                }
            }
        }
    }
}
