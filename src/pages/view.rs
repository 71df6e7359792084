use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::PageKind;
use crate::dom::{Card, DomWrite, MetaKey};
use crate::error::{MapError, Result};
use crate::hooks::HookRequests;
use crate::mapping::accessor::{first_line, format_multiline, get_str, sanitize_text};
use crate::mapping::{first_or_placeholder, ImageSlot, ResolvedImage};

/// View-model for one page: the ordered writes plus what to tell widgets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub page: PageKind,
    pub writes: Vec<DomWrite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    pub hooks: HookRequests,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_steps: Vec<StepFailure>,
}

impl PageView {
    pub fn empty(page: PageKind) -> Self {
        Self {
            page,
            writes: Vec::new(),
            redirect: None,
            hooks: HookRequests::default(),
            failed_steps: Vec::new(),
        }
    }

    /// Last write bound to `target`.
    pub fn write_for(&self, target: &str) -> Option<&DomWrite> {
        self.writes.iter().rev().find(|w| w.target() == Some(target))
    }

    pub fn text_for(&self, target: &str) -> Option<&str> {
        match self.write_for(target)? {
            DomWrite::Text { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn meta(&self, key: MetaKey) -> Option<&str> {
        self.writes.iter().rev().find_map(|w| match w {
            DomWrite::Meta { key: k, content } if *k == key => Some(content.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepFailure {
    pub step: &'static str,
    pub error: String,
}

/// Writes and widget requests produced by one projection step.
#[derive(Debug, Default)]
pub struct Step {
    writes: Vec<DomWrite>,
    hooks: HookRequests,
}

impl Step {
    pub fn write(&mut self, write: DomWrite) {
        self.writes.push(write);
    }

    pub fn text(&mut self, target: &str, value: impl Into<String>) {
        self.write(DomWrite::text(target, value));
    }

    /// Text with the visible placeholder when the value is blank.
    pub fn text_or_placeholder(&mut self, target: &str, value: Option<&str>, label: &str) {
        self.text(target, sanitize_text(value, label));
    }

    pub fn multiline(&mut self, target: &str, value: Option<&str>, label: &str) {
        self.write(DomWrite::html(target, format_multiline(value, label)));
    }

    pub fn image(&mut self, target: &str, slot: ImageSlot) {
        self.write(DomWrite::image(target, slot));
    }

    pub fn items(&mut self, target: &str, items: Vec<Card>) {
        self.write(DomWrite::items(target, items));
    }

    pub fn visibility(&mut self, target: &str, visible: bool) {
        self.write(DomWrite::visibility(target, visible));
    }

    /// Slider content; the slider widget is re-initialised after mapping.
    pub fn slides(&mut self, target: &str, images: &[ResolvedImage]) {
        let slots = images.iter().cloned().map(ImageSlot::Image).collect();
        self.write(DomWrite::gallery(target, slots));
        self.hooks.sliders.push((target.to_string(), images.len()));
    }

    /// Fixed-size grid, placeholders included.
    pub fn grid(&mut self, target: &str, slots: Vec<ImageSlot>) {
        self.write(DomWrite::gallery(target, slots));
    }

    pub fn map_center(&mut self, latitude: f64, longitude: f64) {
        self.hooks.map_center = Some((latitude, longitude));
    }
}

/// Runs a page's projection steps in order, isolating failures.
pub struct ViewBuilder {
    view: PageView,
}

impl ViewBuilder {
    pub fn new(page: PageKind) -> Self {
        Self {
            view: PageView::empty(page),
        }
    }

    /// Run one step. A failing step contributes nothing; later steps still run.
    pub fn step<F>(&mut self, name: &'static str, project: F) -> &mut Self
    where
        F: FnOnce(&mut Step) -> Result<()>,
    {
        let mut step = Step::default();
        match project(&mut step) {
            Ok(()) => {
                self.view.writes.append(&mut step.writes);
                self.view.hooks.sliders.append(&mut step.hooks.sliders);
                if step.hooks.map_center.is_some() {
                    self.view.hooks.map_center = step.hooks.map_center;
                }
            }
            Err(MapError::MissingField(field)) => {
                debug!("{}: step '{}' skipped, missing {}", self.view.page, name, field);
            }
            Err(err) => {
                warn!("{}: step '{}' failed: {}", self.view.page, name, err);
                self.view.failed_steps.push(StepFailure {
                    step: name,
                    error: err.to_string(),
                });
            }
        }
        self
    }

    pub fn redirect(&mut self, location: impl Into<String>) -> &mut Self {
        self.view.redirect = Some(location.into());
        self
    }

    pub fn fade_in(&mut self) -> &mut Self {
        self.view.hooks.fade_in = true;
        self
    }

    pub fn finish(&mut self) -> PageView {
        let page = self.view.page;
        std::mem::replace(&mut self.view, PageView::empty(page))
    }
}

/// Values gathered by earlier steps for the final metadata step.
#[derive(Debug, Clone, Default)]
pub struct MetaSource {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl MetaSource {
    /// `"<page title> | <site name>"`, or whichever half exists.
    pub fn titled(page_title: Option<&str>, site_name: Option<&str>) -> Self {
        let title = match (page_title, site_name) {
            (Some(page), Some(site)) if page != site => Some(format!("{page} | {site}")),
            (Some(page), _) => Some(page.to_string()),
            (None, Some(site)) => Some(site.to_string()),
            (None, None) => None,
        };
        Self {
            title,
            ..Self::default()
        }
    }

    pub fn description(mut self, text: Option<&str>) -> Self {
        self.description = text.and_then(first_line).map(str::to_string);
        self
    }

    pub fn image(mut self, image: Option<&ResolvedImage>) -> Self {
        self.image = image.map(|i| i.url.clone());
        self
    }
}

/// Metadata step; runs last so it can reuse what earlier steps computed.
pub fn meta_step(step: &mut Step, source: &MetaSource) -> Result<()> {
    if source.title.is_none() && source.description.is_none() && source.image.is_none() {
        return Err(MapError::missing("metadata"));
    }
    if let Some(title) = &source.title {
        step.write(DomWrite::meta(MetaKey::Title, title.clone()));
    }
    if let Some(description) = &source.description {
        step.write(DomWrite::meta(MetaKey::Description, description.clone()));
    }
    if let Some(image) = &source.image {
        step.write(DomWrite::meta(MetaKey::OgImage, image.clone()));
    }
    Ok(())
}

/// Section value or the "skip this step" error.
pub fn require<'a>(value: Option<&'a Value>, what: &str) -> Result<&'a Value> {
    value.ok_or_else(|| MapError::missing(what))
}

/// Cards for repeated `{ title, description, images }` custom items.
pub fn custom_cards(items: &[Value], title_label: &str, description_label: &str) -> Vec<Card> {
    items
        .iter()
        .map(|item| {
            let mut card = Card::titled(sanitize_text(get_str(item, "title"), title_label))
                .description(sanitize_text(get_str(item, "description"), description_label));
            if item.get("images").is_some() {
                card = card.image(first_or_placeholder(item.get("images")));
            }
            card
        })
        .collect()
}
