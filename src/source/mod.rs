pub mod file;
pub mod http;
pub mod traits;
pub mod types;

pub use file::{FileFragments, FileSource};
pub use http::{HttpFragments, HttpSource};
pub use traits::{DataSource, Fragment, FragmentLoader};
pub use types::FragmentPaths;
