use super::domain::{CvssError, MetricEntry, MetricGroup};
use super::registry::MetricRegistry;
use serde::Serialize;

/// Chosen titles for every metric of one group, stored in vector order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    group: MetricGroup,
    titles: Vec<String>,
}

impl SelectionState {
    pub fn new(group: MetricGroup) -> Self {
        let registry = MetricRegistry::for_group(group);
        let titles = registry
            .keys()
            .iter()
            .map(|key| registry.default_title(key).to_string())
            .collect();

        Self { group, titles }
    }

    pub fn group(&self) -> MetricGroup {
        self.group
    }

    fn registry(&self) -> &'static MetricRegistry {
        MetricRegistry::for_group(self.group)
    }

    /// Overwrites the choice for `key`; the title must be one of that metric's options.
    pub fn set(&mut self, key: &str, title: &str) -> Result<(), CvssError> {
        let registry = self.registry();
        let key = registry.canonical_key(key)?;
        registry.lookup_for(key, title)?;

        if let Some(index) = registry.position(key) {
            self.titles[index] = title.to_string();
        }
        Ok(())
    }

    /// Title currently stored for `key`; empty when an unset Base metric.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.registry()
            .position(key)
            .map(|index| self.titles[index].as_str())
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.group);
    }

    /// Metric keys that still hold an empty title.
    pub fn missing(&self) -> Vec<&'static str> {
        self.registry()
            .keys()
            .iter()
            .zip(&self.titles)
            .filter(|(_, title)| title.is_empty())
            .map(|(key, _)| *key)
            .collect()
    }

    pub fn is_ready(&self) -> bool {
        self.titles.iter().all(|title| !title.is_empty())
    }

    /// True when any metric differs from its default.
    pub fn has_selections(&self) -> bool {
        let registry = self.registry();
        registry
            .keys()
            .iter()
            .zip(&self.titles)
            .any(|(key, title)| title != registry.default_title(key))
    }

    /// Resolves the stored title of `key` to its registry entry.
    pub fn entry(&self, key: &'static str) -> Result<MetricEntry, CvssError> {
        let title = self.get(key).ok_or_else(|| CvssError::UnknownMetricKey {
            group: self.group,
            key: key.to_string(),
        })?;

        if title.is_empty() {
            return Err(CvssError::IncompleteSelection {
                missing: self.missing(),
            });
        }

        self.registry().lookup_for(key, title)
    }

    /// Pairs of (metric key, title) in vector order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.registry()
            .keys()
            .iter()
            .copied()
            .zip(self.titles.iter().map(String::as_str))
    }

    /// The group's titles joined with `/`, without a leading separator.
    pub fn vector(&self) -> String {
        self.titles.join("/")
    }
}

/// The full selection snapshot the scoring stages read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selections {
    #[serde(serialize_with = "serialize_state")]
    pub base: SelectionState,
    #[serde(serialize_with = "serialize_state")]
    pub temporal: SelectionState,
    #[serde(serialize_with = "serialize_state")]
    pub environmental: SelectionState,
}

impl Selections {
    pub fn new() -> Self {
        Self {
            base: SelectionState::new(MetricGroup::Base),
            temporal: SelectionState::new(MetricGroup::Temporal),
            environmental: SelectionState::new(MetricGroup::Environmental),
        }
    }

    pub fn state(&self, group: MetricGroup) -> &SelectionState {
        match group {
            MetricGroup::Base => &self.base,
            MetricGroup::Temporal => &self.temporal,
            MetricGroup::Environmental => &self.environmental,
        }
    }

    pub fn state_mut(&mut self, group: MetricGroup) -> &mut SelectionState {
        match group {
            MetricGroup::Base => &mut self.base,
            MetricGroup::Temporal => &mut self.temporal,
            MetricGroup::Environmental => &mut self.environmental,
        }
    }

    pub fn set(&mut self, group: MetricGroup, key: &str, title: &str) -> Result<(), CvssError> {
        self.state_mut(group).set(key, title)
    }

    pub fn clear(&mut self, group: MetricGroup) {
        self.state_mut(group).clear();
    }

    pub fn clear_all(&mut self) {
        *self = Self::new();
    }

    pub fn is_ready(&self) -> bool {
        self.base.is_ready()
    }
}

impl Default for Selections {
    fn default() -> Self {
        Self::new()
    }
}

fn serialize_state<S>(state: &SelectionState, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(state.titles.len()))?;
    for (key, title) in state.entries() {
        map.serialize_entry(key, title)?;
    }
    map.end()
}
