use std::collections::BTreeMap;

use serde::Serialize;

use super::{Card, Dom, DomWrite, MetaKey, PLACEHOLDER_IMAGE_ALT, PLACEHOLDER_IMAGE_SRC};
use crate::mapping::ImageSlot;

/// Final `src`/`alt` for an image element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedImage {
    pub src: String,
    pub alt: String,
    pub placeholder: bool,
}

impl From<&ImageSlot> for RenderedImage {
    fn from(slot: &ImageSlot) -> Self {
        match slot {
            ImageSlot::Image(image) => Self {
                src: image.url.clone(),
                alt: image.description.clone(),
                placeholder: false,
            },
            ImageSlot::Empty => Self {
                src: PLACEHOLDER_IMAGE_SRC.to_string(),
                alt: PLACEHOLDER_IMAGE_ALT.to_string(),
                placeholder: true,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedCard {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<RenderedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl From<&Card> for RenderedCard {
    fn from(card: &Card) -> Self {
        Self {
            title: card.title.clone(),
            description: card.description.clone(),
            image: card.image.as_ref().map(RenderedImage::from),
            href: card.href.clone(),
        }
    }
}

/// Accumulated state of one insertion point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<RenderedImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slides: Option<Vec<RenderedImage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<RenderedCard>>,
}

/// Records the final state of every insertion point as a serialisable patch.
///
/// Accepts every target. Each write overwrites the aspect it touches, so
/// replaying the same writes leaves the patch unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchDom {
    pub nodes: BTreeMap<String, NodePatch>,
    pub meta: BTreeMap<MetaKey, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl PatchDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, target: &str) -> Option<&NodePatch> {
        self.nodes.get(target)
    }

    pub fn text(&self, target: &str) -> Option<&str> {
        self.node(target)?.text.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.meta.is_empty() && self.redirect.is_none()
    }

    fn node_mut(&mut self, target: &str) -> &mut NodePatch {
        self.nodes.entry(target.to_string()).or_default()
    }
}

impl Dom for PatchDom {
    fn has_target(&self, _target: &str) -> bool {
        true
    }

    fn apply(&mut self, write: &DomWrite) {
        match write {
            DomWrite::Text { target, value } => self.node_mut(target).text = Some(value.clone()),
            DomWrite::Html { target, markup } => self.node_mut(target).html = Some(markup.clone()),
            DomWrite::Attr {
                target,
                name,
                value,
            } => {
                self.node_mut(target)
                    .attrs
                    .insert(name.clone(), value.clone());
            }
            DomWrite::Visibility { target, visible } => {
                self.node_mut(target).hidden = Some(!visible);
            }
            DomWrite::Image { target, slot } => {
                self.node_mut(target).image = Some(slot.into());
            }
            DomWrite::Gallery { target, slots } => {
                self.node_mut(target).slides = Some(slots.iter().map(RenderedImage::from).collect());
            }
            DomWrite::Items { target, items } => {
                self.node_mut(target).items = Some(items.iter().map(RenderedCard::from).collect());
            }
            DomWrite::Meta { key, content } => {
                self.meta.insert(*key, content.clone());
            }
        }
    }

    fn redirect(&mut self, location: &str) {
        self.redirect = Some(location.to_string());
    }
}
