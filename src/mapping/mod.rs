pub mod accessor;
pub mod defaults;
pub mod images;
pub mod lookup;

pub use accessor::{format_multiline, safe_get, sanitize_text};
pub use images::{first_or_placeholder, resolve_selected, ImageSlot, ResolvedImage};
pub use lookup::{EntityLookup, QueryParams, Resolution};
