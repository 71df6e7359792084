//! The seam between the pure mapping layer and the page markup.
//!
//! Mappers produce [`DomWrite`]s addressed to insertion points named by the
//! `data-bind` attribute; a [`Dom`] implementation decides what applying them
//! means.

pub mod patch;
pub mod template;

use serde::Serialize;
use tracing::debug;

use crate::mapping::ImageSlot;

pub use patch::PatchDom;
pub use template::{TemplateDom, TemplateIndex};

/// Attribute marking an element as a mapper target.
pub const BIND_ATTR: &str = "data-bind";

/// Graphic shown where an image slot has nothing curated.
pub const PLACEHOLDER_IMAGE_SRC: &str = "images/placeholder.svg";
pub const PLACEHOLDER_IMAGE_ALT: &str = "이미지 준비 중";

/// Document-level metadata written into `<head>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MetaKey {
    Title,
    Description,
    OgImage,
}

impl MetaKey {
    pub fn selector(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "meta[name=\"description\"]",
            Self::OgImage => "meta[property=\"og:image\"]",
        }
    }
}

/// One entry of a repeated list: room cards, nav links, amenity chips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Card {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn image(mut self, image: ImageSlot) -> Self {
        self.image = Some(image);
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}

/// A single write against one insertion point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DomWrite {
    /// Replace text content.
    Text { target: String, value: String },
    /// Replace inner markup. The markup is already escaped.
    Html { target: String, markup: String },
    Attr {
        target: String,
        name: String,
        value: String,
    },
    Visibility { target: String, visible: bool },
    /// Single image (`src`/`alt`).
    Image { target: String, slot: ImageSlot },
    /// Slider or fixed-slot grid; children are replaced, never appended.
    Gallery {
        target: String,
        slots: Vec<ImageSlot>,
    },
    Items { target: String, items: Vec<Card> },
    Meta { key: MetaKey, content: String },
}

impl DomWrite {
    pub fn text(target: &str, value: impl Into<String>) -> Self {
        Self::Text {
            target: target.to_string(),
            value: value.into(),
        }
    }

    pub fn html(target: &str, markup: impl Into<String>) -> Self {
        Self::Html {
            target: target.to_string(),
            markup: markup.into(),
        }
    }

    pub fn attr(target: &str, name: &str, value: impl Into<String>) -> Self {
        Self::Attr {
            target: target.to_string(),
            name: name.to_string(),
            value: value.into(),
        }
    }

    pub fn visibility(target: &str, visible: bool) -> Self {
        Self::Visibility {
            target: target.to_string(),
            visible,
        }
    }

    pub fn image(target: &str, slot: ImageSlot) -> Self {
        Self::Image {
            target: target.to_string(),
            slot,
        }
    }

    pub fn gallery(target: &str, slots: Vec<ImageSlot>) -> Self {
        Self::Gallery {
            target: target.to_string(),
            slots,
        }
    }

    pub fn items(target: &str, items: Vec<Card>) -> Self {
        Self::Items {
            target: target.to_string(),
            items,
        }
    }

    pub fn meta(key: MetaKey, content: impl Into<String>) -> Self {
        Self::Meta {
            key,
            content: content.into(),
        }
    }

    /// Insertion point this write is bound to; metadata has none.
    pub fn target(&self) -> Option<&str> {
        match self {
            Self::Text { target, .. }
            | Self::Html { target, .. }
            | Self::Attr { target, .. }
            | Self::Visibility { target, .. }
            | Self::Image { target, .. }
            | Self::Gallery { target, .. }
            | Self::Items { target, .. } => Some(target),
            Self::Meta { .. } => None,
        }
    }
}

/// Where mapper output lands.
pub trait Dom {
    /// Whether an element with `data-bind="<target>"` exists.
    fn has_target(&self, target: &str) -> bool;

    /// Apply one write. Writes replace earlier state for the same aspect.
    fn apply(&mut self, write: &DomWrite);

    fn redirect(&mut self, location: &str);
}

/// Counts from applying a batch of writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyStats {
    pub applied: usize,
    pub missing_targets: Vec<String>,
}

/// Apply writes in order, skipping those whose insertion point is absent.
pub fn apply_writes(writes: &[DomWrite], dom: &mut dyn Dom) -> ApplyStats {
    let mut stats = ApplyStats::default();
    for write in writes {
        if let Some(target) = write.target() {
            if !dom.has_target(target) {
                debug!("No insertion point for '{}', skipping", target);
                if !stats.missing_targets.iter().any(|t| t == target) {
                    stats.missing_targets.push(target.to_string());
                }
                continue;
            }
        }
        dom.apply(write);
        stats.applied += 1;
    }
    stats
}
