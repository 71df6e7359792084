/// Well-known path of the property document inside a site.
pub const DATA_PATH: &str = "data/property.json";

pub const HEADER_PATH: &str = "common/header.html";
pub const FOOTER_PATH: &str = "common/footer.html";

pub const USER_AGENT: &str = concat!("stay-mapper/", env!("CARGO_PKG_VERSION"));

/// Site-relative paths of the shared fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentPaths {
    pub header: String,
    pub footer: String,
}

impl FragmentPaths {
    pub fn get(&self, fragment: super::Fragment) -> &str {
        match fragment {
            super::Fragment::Header => &self.header,
            super::Fragment::Footer => &self.footer,
        }
    }
}

impl Default for FragmentPaths {
    fn default() -> Self {
        Self {
            header: HEADER_PATH.to_string(),
            footer: FOOTER_PATH.to_string(),
        }
    }
}
