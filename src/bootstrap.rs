//! Page start-up: fetch fragments and data together, then map the page and
//! whichever shared fragments made it in.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::dom::TemplateDom;
use crate::error::LoadError;
use crate::hooks::Hooks;
use crate::mapping::QueryParams;
use crate::models::PropertyDocument;
use crate::pages::{
    LayoutMapper, LayoutParts, PageKind, PageMapper, PageSession, RenderContext, RenderReport,
};
use crate::source::{DataSource, Fragment, FragmentLoader};

/// Which fragment loads have completed successfully.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentJoin {
    pub header_ready: bool,
    pub footer_ready: bool,
}

impl FragmentJoin {
    pub fn is_complete(&self) -> bool {
        self.header_ready && self.footer_ready
    }

    pub fn parts(&self) -> LayoutParts {
        LayoutParts {
            header: self.header_ready,
            footer: self.footer_ready,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BootReport {
    pub fragments: FragmentJoin,
    pub page: RenderReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<RenderReport>,
}

pub struct Bootstrap<'a> {
    source: &'a dyn DataSource,
    fragments: &'a dyn FragmentLoader,
    context: RenderContext,
}

impl<'a> Bootstrap<'a> {
    pub fn new(source: &'a dyn DataSource, fragments: &'a dyn FragmentLoader) -> Self {
        Self {
            source,
            fragments,
            context: RenderContext::default(),
        }
    }

    pub fn with_context(mut self, context: RenderContext) -> Self {
        self.context = context;
        self
    }

    async fn fragment(&self, fragment: Fragment) -> Option<String> {
        match self.fragments.load(fragment).await {
            Ok(html) => Some(html),
            Err(e) => {
                warn!("{} fragment unavailable: {}", fragment.name(), e);
                None
            }
        }
    }

    /// Load everything, splice the fragments into `dom`, then render.
    pub async fn run<M: PageMapper>(
        &self,
        mapper: M,
        query: QueryParams,
        dom: &mut TemplateDom,
        hooks: &mut Hooks,
    ) -> BootReport {
        let kind = mapper.kind();
        info!("🚀 Starting {} page from {}", kind, self.source.describe());

        let (header, footer, document) = tokio::join!(
            self.fragment(Fragment::Header),
            self.fragment(Fragment::Footer),
            self.source.load()
        );

        let mut join = FragmentJoin::default();
        if let Some(html) = header {
            dom.index_mut().merge_fragment(&html);
            join.header_ready = true;
        }
        if let Some(html) = footer {
            dom.index_mut().merge_fragment(&html);
            join.footer_ready = true;
        }
        if !join.is_complete() {
            info!("Fragments joined partially: {:?}", join);
        }

        let page = self.render(mapper, query.clone(), document.clone(), dom, hooks);

        // A layout page already covers both fragments.
        let layout = if kind != PageKind::Layout && join.parts().any() && page.redirect.is_none() {
            let mapper = LayoutMapper::new(join.parts());
            Some(self.render(mapper, query, document, dom, hooks))
        } else {
            None
        };

        BootReport {
            fragments: join,
            page,
            layout,
        }
    }

    fn render<M: PageMapper>(
        &self,
        mapper: M,
        query: QueryParams,
        document: Result<Arc<PropertyDocument>, LoadError>,
        dom: &mut TemplateDom,
        hooks: &mut Hooks,
    ) -> RenderReport {
        let mut session = PageSession::new(mapper, query, self.context);
        session.accept(document);
        session.render_page(dom, hooks)
    }
}
