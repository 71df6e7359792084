use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::mapping::accessor::safe_get;

mod lenient;

/// Sub-collection name whose value wraps the real image group in older documents.
const LEGACY_GROUP_ENVELOPE: &str = "group";

/// Root of the fetched property document.
///
/// The typed fields cover what the mappers read structurally; `raw` keeps the
/// whole document so free-form custom content can be reached by dotted path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyDocument {
    #[serde(deserialize_with = "lenient::object")]
    pub property: Property,
    #[serde(deserialize_with = "lenient::seq")]
    pub rooms: Vec<Room>,
    #[serde(deserialize_with = "lenient::object")]
    pub homepage: Homepage,
    #[serde(skip)]
    raw: Value,
}

impl PropertyDocument {
    /// Build a document from parsed JSON, keeping the raw tree for path lookups.
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        let mut document = Self::deserialize(&raw)?;
        document.raw = raw;
        Ok(document)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        Self::from_value(serde_json::from_str(text)?)
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Custom content for one section of one page,
    /// i.e. `homepage.customFields.pages.<page>.sections.0.<section>`.
    pub fn custom_section(&self, page: &str, section: &str) -> Option<&Value> {
        safe_get(
            &self.raw,
            &format!("homepage.customFields.pages.{page}.sections.0.{section}"),
        )
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.property.facilities
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Property {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub address_detail: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub check_in_time: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub check_out_time: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub usage_guide: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub directions: Option<String>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "lenient::opt_f64")]
    pub longitude: Option<f64>,
    #[serde(deserialize_with = "lenient::seq")]
    pub refund_policies: Vec<Value>,
    #[serde(deserialize_with = "lenient::object")]
    pub business_info: BusinessInfo,
    #[serde(deserialize_with = "lenient::seq")]
    pub images: Vec<ImageGroup>,
    #[serde(deserialize_with = "lenient::seq")]
    pub facilities: Vec<Facility>,
}

impl Property {
    /// Street address with the optional detail line appended.
    pub fn full_address(&self) -> Option<String> {
        let base = self.address.as_deref().filter(|a| !a.trim().is_empty())?;
        match self.address_detail.as_deref().filter(|d| !d.trim().is_empty()) {
            Some(detail) => Some(format!("{base} {detail}")),
            None => Some(base.to_string()),
        }
    }

    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Business registration details shown in the footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessInfo {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub representative: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub registration_number: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub telecom_sales_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Room {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub display_order: Option<i64>,
    /// Square metres; documents carry either a number or a string.
    pub size: Option<Value>,
    #[serde(deserialize_with = "lenient::seq")]
    pub bed_types: Vec<Value>,
    #[serde(deserialize_with = "lenient::seq")]
    pub room_structures: Vec<Value>,
    #[serde(deserialize_with = "lenient::opt_u32")]
    pub base_occupancy: Option<u32>,
    #[serde(deserialize_with = "lenient::opt_u32")]
    pub max_occupancy: Option<u32>,
    #[serde(deserialize_with = "lenient::seq")]
    pub amenities: Vec<Value>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub room_info: Option<String>,
    #[serde(deserialize_with = "lenient::seq")]
    pub images: Vec<ImageGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Facility {
    #[serde(deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::opt_i64")]
    pub display_order: Option<i64>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub usage_guide: Option<String>,
    #[serde(deserialize_with = "lenient::seq")]
    pub images: Vec<ImageGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Homepage {
    /// Channel name (instagram, blog, ...) to URL.
    #[serde(deserialize_with = "lenient::string_map")]
    pub social_links: BTreeMap<String, String>,
}

/// One image group: named sub-collections such as `thumbnail`, `interior`,
/// `exterior` or `logo`, each an array of image records or URL strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageGroup(Map<String, Value>);

impl ImageGroup {
    pub fn new(collections: Map<String, Value>) -> Self {
        Self(collections)
    }

    /// Raw sub-collection by name, looking through the legacy `group` envelope.
    pub fn collection(&self, name: &str) -> Option<&Value> {
        self.0.get(name).or_else(|| {
            self.0
                .get(LEGACY_GROUP_ENVELOPE)
                .and_then(|inner| inner.get(name))
        })
    }
}

/// Find a sub-collection in the first group that has it.
pub fn find_collection<'a>(groups: &'a [ImageGroup], name: &str) -> Option<&'a Value> {
    groups.iter().find_map(|group| group.collection(name))
}
