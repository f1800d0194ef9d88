use crate::spec::guide::{AxisDef, HeaderDef, LegendDef};
use crate::spec::scale::ScaleDef;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Debug;

/// A guide or scale fragment supplied alongside a channel definition
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelChild {
    Axis(AxisDef),
    Legend(LegendDef),
    Header(HeaderDef),
    Scale(ScaleDef),
}

impl ChannelChild {
    pub fn kind(&self) -> &'static str {
        match self {
            ChannelChild::Axis(_) => "axis",
            ChannelChild::Legend(_) => "legend",
            ChannelChild::Header(_) => "header",
            ChannelChild::Scale(_) => "scale",
        }
    }
}

impl From<AxisDef> for ChannelChild {
    fn from(v: AxisDef) -> Self {
        Self::Axis(v)
    }
}

impl From<LegendDef> for ChannelChild {
    fn from(v: LegendDef) -> Self {
        Self::Legend(v)
    }
}

impl From<HeaderDef> for ChannelChild {
    fn from(v: HeaderDef) -> Self {
        Self::Header(v)
    }
}

impl From<ScaleDef> for ChannelChild {
    fn from(v: ScaleDef) -> Self {
        Self::Scale(v)
    }
}

/// Content of a guide or scale slot.
///
/// An explicit `null` switches the guide off, which is not the same as
/// leaving the slot out and letting the renderer add its default guide.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    Unset,
    Disabled,
    Set(T),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Unset
    }
}

impl<T> Slot<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Slot::Unset)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Slot::Set(_))
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Slot::Set(def) => Some(def),
            _ => None,
        }
    }
}

impl<T> From<T> for Slot<T> {
    fn from(def: T) -> Self {
        Slot::Set(def)
    }
}

impl<T: Serialize> Serialize for Slot<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Slot::Set(def) => def.serialize(serializer),
            Slot::Unset | Slot::Disabled => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Slot<T> {
    // Only reached when the key is present, absent keys fall back to `Unset`
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(def) => Slot::Set(def),
            None => Slot::Disabled,
        })
    }
}

/// Optional guide and scale slots a channel can carry.
///
/// Each channel family fixes its slot set at the type level, so a position
/// channel can hold an axis but never a legend.
pub trait Attachments:
    Debug + Clone + Default + PartialEq + Serialize + DeserializeOwned
{
    /// Store `child` in its slot, replacing any previous fragment of the same
    /// kind. Returns false when this channel has no slot for it.
    fn attach(&mut self, child: ChannelChild) -> bool;
}

/// Fold `children` into `target`. Later fragments of a kind overwrite
/// earlier ones and kinds without a slot are skipped.
pub fn resolve_children<A, I>(target: &mut A, children: I)
where
    A: Attachments,
    I: IntoIterator<Item = ChannelChild>,
{
    for child in children {
        let kind = child.kind();
        if !target.attach(child) {
            debug!("Skipping {kind} fragment on a channel without a {kind} slot");
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoAttachments {}

impl Attachments for NoAttachments {
    fn attach(&mut self, _child: ChannelChild) -> bool {
        false
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScaleAttachment {
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    pub scale: Slot<ScaleDef>,
}

impl Attachments for ScaleAttachment {
    fn attach(&mut self, child: ChannelChild) -> bool {
        match child {
            ChannelChild::Scale(scale) => {
                self.scale = Slot::Set(scale);
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisAttachments {
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    pub scale: Slot<ScaleDef>,

    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    pub axis: Slot<AxisDef>,
}

impl Attachments for AxisAttachments {
    fn attach(&mut self, child: ChannelChild) -> bool {
        match child {
            ChannelChild::Scale(scale) => self.scale = Slot::Set(scale),
            ChannelChild::Axis(axis) => self.axis = Slot::Set(axis),
            _ => return false,
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegendAttachments {
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    pub scale: Slot<ScaleDef>,

    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    pub legend: Slot<LegendDef>,
}

impl Attachments for LegendAttachments {
    fn attach(&mut self, child: ChannelChild) -> bool {
        match child {
            ChannelChild::Scale(scale) => self.scale = Slot::Set(scale),
            ChannelChild::Legend(legend) => self.legend = Slot::Set(legend),
            _ => return false,
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderAttachments {
    #[serde(default, skip_serializing_if = "Slot::is_unset")]
    pub header: Slot<HeaderDef>,
}

impl Attachments for HeaderAttachments {
    fn attach(&mut self, child: ChannelChild) -> bool {
        match child {
            ChannelChild::Header(header) => {
                self.header = Slot::Set(header);
                true
            }
            _ => false,
        }
    }
}
