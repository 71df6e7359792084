use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{PageKind, PageMapper, RenderContext, StepFailure};
use crate::dom::{apply_writes, Dom};
use crate::error::LoadError;
use crate::hooks::Hooks;
use crate::mapping::QueryParams;
use crate::models::PropertyDocument;
use crate::source::DataSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MapperState {
    Uninitialized,
    DataLoaded,
    Mapped,
}

/// What one `render_page` call did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderReport {
    pub page: PageKind,
    pub state: MapperState,
    pub applied: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_targets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_steps: Vec<StepFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
    pub rendered_at: DateTime<Utc>,
}

/// One page view: a mapper plus the document it renders.
///
/// Moves `Uninitialized -> DataLoaded -> Mapped`. Without a document every
/// render is a no-op and the template's static content stays visible.
pub struct PageSession<M> {
    mapper: M,
    query: QueryParams,
    context: RenderContext,
    document: Option<Arc<PropertyDocument>>,
    load_error: Option<LoadError>,
    state: MapperState,
}

impl<M: PageMapper> PageSession<M> {
    pub fn new(mapper: M, query: QueryParams, context: RenderContext) -> Self {
        Self {
            mapper,
            query,
            context,
            document: None,
            load_error: None,
            state: MapperState::Uninitialized,
        }
    }

    pub fn state(&self) -> MapperState {
        self.state
    }

    pub fn kind(&self) -> PageKind {
        self.mapper.kind()
    }

    /// Load the document from `source`. A failure is logged and remembered,
    /// never raised.
    pub async fn load(&mut self, source: &dyn DataSource) -> MapperState {
        let outcome = source.load().await;
        self.accept(outcome)
    }

    /// Take the outcome of a load performed elsewhere (e.g. joined with the
    /// fragment fetches).
    pub fn accept(&mut self, outcome: Result<Arc<PropertyDocument>, LoadError>) -> MapperState {
        if self.state != MapperState::Uninitialized {
            debug!("{}: document already loaded", self.kind());
            return self.state;
        }
        match outcome {
            Ok(document) => {
                self.document = Some(document);
                self.state = MapperState::DataLoaded;
            }
            Err(err) => {
                warn!("{}: {}; leaving static content in place", self.kind(), err);
                self.load_error = Some(err);
            }
        }
        self.state
    }

    /// Project the document and write it to `dom`, then notify widgets.
    pub fn render_page(&mut self, dom: &mut dyn Dom, hooks: &mut Hooks) -> RenderReport {
        let mut report = RenderReport {
            page: self.kind(),
            state: self.state,
            applied: 0,
            missing_targets: Vec::new(),
            redirect: None,
            failed_steps: Vec::new(),
            load_error: self.load_error.as_ref().map(ToString::to_string),
            rendered_at: self.context.rendered_at,
        };

        let Some(document) = self.document.as_deref() else {
            warn!("{}: no document, nothing rendered", self.kind());
            return report;
        };
        if self.state == MapperState::Mapped {
            debug!("{}: re-rendering mapped page", self.kind());
        }

        let view = self.mapper.project(document, &self.query, &self.context);
        report.failed_steps = view.failed_steps.clone();

        if let Some(location) = &view.redirect {
            info!("{}: redirecting to {}", self.kind(), location);
            dom.redirect(location);
            report.redirect = Some(location.clone());
        }

        let stats = apply_writes(&view.writes, dom);
        report.applied = stats.applied;
        report.missing_targets = stats.missing_targets;

        self.state = MapperState::Mapped;
        report.state = self.state;

        if view.redirect.is_none() {
            hooks.after_render(&view.hooks);
        }

        info!(
            "{}: mapped {} writes ({} targets missing)",
            self.kind(),
            report.applied,
            report.missing_targets.len()
        );
        report
    }
}
