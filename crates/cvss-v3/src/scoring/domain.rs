use serde::{Deserialize, Serialize};
use std::fmt;

/// Weight carried by the Environmental "Not Defined" titles that inherit from Base.
pub const INHERIT_FROM_BASE: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricGroup {
    Base,
    Temporal,
    Environmental,
}

impl MetricGroup {
    pub const fn ordered() -> [Self; 3] {
        [Self::Base, Self::Temporal, Self::Environmental]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Temporal => "Temporal",
            Self::Environmental => "Environmental",
        }
    }

    /// Number of tokens the group contributes to a full vector string.
    pub const fn token_count(self) -> usize {
        match self {
            Self::Base => 8,
            Self::Temporal => 3,
            Self::Environmental => 11,
        }
    }
}

impl fmt::Display for MetricGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A selectable option: the canonical vector token and its numeric weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricEntry {
    pub title: &'static str,
    pub value: f64,
}

impl MetricEntry {
    pub fn inherits_from_base(&self) -> bool {
        self.value == INHERIT_FROM_BASE
    }

    /// The option letter after the colon, e.g. `L` for `PR:L` and `MPR:L`.
    pub fn level(&self) -> &'static str {
        self.title
            .split_once(':')
            .map(|(_, level)| level)
            .unwrap_or(self.title)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Unchanged,
    Changed,
}

impl Scope {
    /// Scope entries are weighted 0 (Unchanged) or 1 (Changed).
    pub fn from_weight(value: f64) -> Self {
        if value == 0.0 {
            Self::Unchanged
        } else {
            Self::Changed
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Unchanged => "Unchanged",
            Self::Changed => "Changed",
        }
    }
}

/// Qualitative severity rating scale from the CVSS v3.0 specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn from_score(score: f64) -> Self {
        if score <= 0.0 {
            Self::None
        } else if score < 4.0 {
            Self::Low
        } else if score < 7.0 {
            Self::Medium
        } else if score < 9.0 {
            Self::High
        } else {
            Self::Critical
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Contract violations raised by the registry, selection state, scoring stages and codec.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CvssError {
    #[error("base metrics not selected: {}", .missing.join(", "))]
    IncompleteSelection { missing: Vec<&'static str> },
    #[error("{group} metric has no option titled '{title}'{}", metric_suffix(.metric))]
    UnknownMetricTitle {
        group: MetricGroup,
        metric: Option<&'static str>,
        title: String,
    },
    #[error("{group} group has no metric '{key}'")]
    UnknownMetricKey { group: MetricGroup, key: String },
    #[error("malformed vector ({tokens} tokens): {reason}")]
    MalformedVector { tokens: usize, reason: String },
}

fn metric_suffix(metric: &Option<&'static str>) -> String {
    match metric {
        Some(key) => format!(" (metric {key})"),
        None => String::new(),
    }
}
