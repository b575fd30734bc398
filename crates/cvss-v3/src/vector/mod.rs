//! Canonical CVSS v3 vector strings.
//!
//! Segments are recognised by position: the first eight tokens are always
//! Base, and the total token count tells whether Temporal (3 tokens) and/or
//! Environmental (11 tokens) follow. Each token must also belong to the
//! metric slot it lands in, so a reordered vector is rejected rather than
//! scored against the wrong metrics.

mod tokenizer;

use crate::scoring::domain::{CvssError, MetricGroup};
use crate::scoring::registry::MetricRegistry;
use crate::scoring::selection::{SelectionState, Selections};
use tracing::debug;

/// Where each optional segment starts within the token list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentLayout {
    pub temporal: Option<usize>,
    pub environmental: Option<usize>,
}

impl SegmentLayout {
    pub fn for_token_count(tokens: usize) -> Result<Self, CvssError> {
        let base = MetricGroup::Base.token_count();
        let temporal = MetricGroup::Temporal.token_count();
        let environmental = MetricGroup::Environmental.token_count();

        if tokens < base {
            return Err(CvssError::MalformedVector {
                tokens,
                reason: format!("expected at least {base} base metrics"),
            });
        }

        match tokens - base {
            0 => Ok(Self {
                temporal: None,
                environmental: None,
            }),
            n if n == temporal => Ok(Self {
                temporal: Some(base),
                environmental: None,
            }),
            n if n == environmental => Ok(Self {
                temporal: None,
                environmental: Some(base),
            }),
            n if n == temporal + environmental => Ok(Self {
                temporal: Some(base),
                environmental: Some(base + temporal),
            }),
            _ => Err(CvssError::MalformedVector {
                tokens,
                reason: format!(
                    "expected {base}, {}, {} or {} metrics",
                    base + temporal,
                    base + environmental,
                    base + temporal + environmental
                ),
            }),
        }
    }
}

/// Base titles, then Temporal and Environmental segments when they hold selections.
pub fn serialize(selections: &Selections) -> String {
    let mut vector = selections.base.vector();

    for state in [&selections.temporal, &selections.environmental] {
        if state.has_selections() {
            vector.push('/');
            vector.push_str(&state.vector());
        }
    }

    vector
}

/// Rebuilds all three selection groups from a vector string.
pub fn parse(vector: &str) -> Result<Selections, CvssError> {
    let tokens = tokenizer::tokenize(vector);
    let layout = SegmentLayout::for_token_count(tokens.len())?;
    debug!(tokens = tokens.len(), ?layout, "parsing cvss vector");

    let mut selections = Selections::new();
    assign(&mut selections.base, &tokens[..MetricGroup::Base.token_count()])?;

    if let Some(start) = layout.temporal {
        let end = start + MetricGroup::Temporal.token_count();
        assign(&mut selections.temporal, &tokens[start..end])?;
    }

    if let Some(start) = layout.environmental {
        let end = start + MetricGroup::Environmental.token_count();
        assign(&mut selections.environmental, &tokens[start..end])?;
    }

    Ok(selections)
}

fn assign(state: &mut SelectionState, tokens: &[&str]) -> Result<(), CvssError> {
    let keys = MetricRegistry::for_group(state.group()).keys();
    for (key, token) in keys.iter().zip(tokens) {
        state.set(key, token)?;
    }
    Ok(())
}

impl Selections {
    pub fn from_vector(vector: &str) -> Result<Self, CvssError> {
        parse(vector)
    }

    pub fn to_vector(&self) -> String {
        serialize(self)
    }
}
