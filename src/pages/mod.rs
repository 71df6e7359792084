//! Page mappers: pure projections from the property document to page writes.

pub mod directions;
pub mod facility;
pub mod index;
pub mod layout;
pub mod main_page;
pub mod reservation;
pub mod room;
pub mod session;
pub mod view;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::mapping::QueryParams;
use crate::models::PropertyDocument;

pub use directions::DirectionsMapper;
pub use facility::FacilityMapper;
pub use index::IndexMapper;
pub use layout::{LayoutMapper, LayoutParts};
pub use main_page::MainMapper;
pub use reservation::ReservationMapper;
pub use room::RoomMapper;
pub use session::{MapperState, PageSession, RenderReport};
pub use view::{PageView, Step, StepFailure, ViewBuilder};

/// The page types a site template can be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum PageKind {
    Index,
    Main,
    Room,
    Facility,
    Reservation,
    Directions,
    /// Shared header/footer fragments.
    Layout,
}

impl PageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Main => "main",
            Self::Room => "room",
            Self::Facility => "facility",
            Self::Reservation => "reservation",
            Self::Directions => "directions",
            Self::Layout => "layout",
        }
    }

    /// Template file for the page inside a site directory.
    pub fn template_file(self) -> &'static str {
        match self {
            Self::Index => "index.html",
            Self::Main => "main.html",
            Self::Room => "room.html",
            Self::Facility => "facility.html",
            Self::Reservation => "reservation.html",
            Self::Directions => "directions.html",
            Self::Layout => "common/header.html",
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "index" => Ok(Self::Index),
            "main" => Ok(Self::Main),
            "room" => Ok(Self::Room),
            "facility" => Ok(Self::Facility),
            "reservation" => Ok(Self::Reservation),
            "directions" => Ok(Self::Directions),
            "layout" => Ok(Self::Layout),
            other => Err(format!("unknown page kind '{other}'")),
        }
    }
}

/// Inputs that are not part of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub rendered_at: DateTime<Utc>,
}

impl RenderContext {
    pub fn at(rendered_at: DateTime<Utc>) -> Self {
        Self { rendered_at }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

/// Projects the property document onto one page type.
///
/// Implementations are independent types; shared rules live in
/// [`crate::mapping`] and [`view`].
pub trait PageMapper {
    fn kind(&self) -> PageKind;

    fn project(
        &self,
        document: &PropertyDocument,
        query: &QueryParams,
        context: &RenderContext,
    ) -> PageView;
}

/// Mapper for a page kind.
pub fn mapper_for(kind: PageKind) -> Box<dyn PageMapper> {
    match kind {
        PageKind::Index => Box::new(IndexMapper),
        PageKind::Main => Box::new(MainMapper),
        PageKind::Room => Box::new(RoomMapper),
        PageKind::Facility => Box::new(FacilityMapper),
        PageKind::Reservation => Box::new(ReservationMapper),
        PageKind::Directions => Box::new(DirectionsMapper),
        PageKind::Layout => Box::new(LayoutMapper::new(LayoutParts::BOTH)),
    }
}

impl<M: PageMapper + ?Sized> PageMapper for Box<M> {
    fn kind(&self) -> PageKind {
        (**self).kind()
    }

    fn project(
        &self,
        document: &PropertyDocument,
        query: &QueryParams,
        context: &RenderContext,
    ) -> PageView {
        (**self).project(document, query, context)
    }
}
