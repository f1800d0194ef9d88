use crate::spec::encoding::Channel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveMode {
    Shared,
    Independent,
}

/// Whether scales and guides of composed children are merged or kept apart,
/// per channel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolveDef {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scale: BTreeMap<String, ResolveMode>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub axis: BTreeMap<String, ResolveMode>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub legend: BTreeMap<String, ResolveMode>,
}

impl ResolveDef {
    pub fn scale(mut self, channel: Channel, mode: ResolveMode) -> Self {
        self.scale.insert(channel.as_str().to_string(), mode);
        self
    }

    pub fn axis(mut self, channel: Channel, mode: ResolveMode) -> Self {
        self.axis.insert(channel.as_str().to_string(), mode);
        self
    }

    pub fn legend(mut self, channel: Channel, mode: ResolveMode) -> Self {
        self.legend.insert(channel.as_str().to_string(), mode);
        self
    }

    /// Fold `other` into `self`, with `other` winning per channel
    pub fn merge(&mut self, other: ResolveDef) {
        self.scale.extend(other.scale);
        self.axis.extend(other.axis);
        self.legend.extend(other.legend);
    }
}
