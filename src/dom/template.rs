use std::collections::BTreeSet;

use scraper::{Html, Selector};
use tracing::debug;

use super::{Dom, DomWrite, PatchDom, BIND_ATTR};

/// Insertion points present in a page template and its spliced fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateIndex {
    bindings: BTreeSet<String>,
}

impl TemplateIndex {
    /// Scan a full page template for `data-bind` targets.
    pub fn parse(html: &str) -> Self {
        let mut index = Self::default();
        index.collect(&Html::parse_document(html));
        index
    }

    /// Add the targets of a fragment (header/footer) spliced into the page.
    pub fn merge_fragment(&mut self, html: &str) {
        self.collect(&Html::parse_fragment(html));
    }

    fn collect(&mut self, document: &Html) {
        let selector = Selector::parse(&format!("[{BIND_ATTR}]")).expect("static selector");
        let before = self.bindings.len();
        for element in document.select(&selector) {
            if let Some(name) = element.value().attr(BIND_ATTR) {
                let name = name.trim();
                if !name.is_empty() {
                    self.bindings.insert(name.to_string());
                }
            }
        }
        debug!("Found {} new insertion points", self.bindings.len() - before);
    }

    pub fn contains(&self, target: &str) -> bool {
        self.bindings.contains(target)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn bindings(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(String::as_str)
    }
}

/// A [`PatchDom`] that only accepts targets the template actually has.
#[derive(Debug, Clone, Default)]
pub struct TemplateDom {
    index: TemplateIndex,
    patch: PatchDom,
}

impl TemplateDom {
    pub fn new(index: TemplateIndex) -> Self {
        Self {
            index,
            patch: PatchDom::new(),
        }
    }

    pub fn from_html(html: &str) -> Self {
        Self::new(TemplateIndex::parse(html))
    }

    pub fn index_mut(&mut self) -> &mut TemplateIndex {
        &mut self.index
    }

    pub fn patch(&self) -> &PatchDom {
        &self.patch
    }

    pub fn into_patch(self) -> PatchDom {
        self.patch
    }
}

impl Dom for TemplateDom {
    fn has_target(&self, target: &str) -> bool {
        self.index.contains(target)
    }

    fn apply(&mut self, write: &DomWrite) {
        self.patch.apply(write);
    }

    fn redirect(&mut self, location: &str) {
        self.patch.redirect(location);
    }
}
