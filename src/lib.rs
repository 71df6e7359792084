//! Maps a lodging property's JSON document onto the pages of its template site.

pub mod bootstrap;
pub mod config;
pub mod dom;
pub mod error;
pub mod hooks;
pub mod mapping;
pub mod models;
pub mod pages;
pub mod source;

pub use bootstrap::{BootReport, Bootstrap, FragmentJoin};
pub use config::{SiteConfig, SiteRoot};
pub use error::{LoadError, MapError};
pub use models::PropertyDocument;
pub use pages::{mapper_for, PageKind, PageMapper, PageSession};
