//! Resolving the room or facility a detail page is about.

use std::cell::OnceCell;
use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::MapError;
use crate::models::{Facility, Room};

/// Query parameter naming the current room or facility.
pub const ID_PARAM: &str = "id";

/// Decoded query string of the current page URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Parse `?a=1&b=2` or `a=1&b=2`. Repeated keys keep the first value.
    pub fn parse(query: &str) -> Self {
        let query = query.trim_start_matches('?');
        let mut params = BTreeMap::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            params.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }
        Self(params)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }
}

/// Something a detail page can be about.
pub trait Entity {
    /// Human-readable kind, used in diagnostics.
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn display_order(&self) -> i64;

    /// Canonical page URL for the entity with `id`.
    fn canonical_path(id: &str) -> String;
}

impl Entity for Room {
    const KIND: &'static str = "room";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_order(&self) -> i64 {
        self.display_order.unwrap_or(0)
    }

    fn canonical_path(id: &str) -> String {
        format!("room.html?{ID_PARAM}={}", encode(id))
    }
}

impl Entity for Facility {
    const KIND: &'static str = "facility";

    fn id(&self) -> &str {
        &self.id
    }

    fn display_order(&self) -> i64 {
        self.display_order.unwrap_or(0)
    }

    fn canonical_path(id: &str) -> String {
        format!("facility.html?{ID_PARAM}={}", encode(id))
    }
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Outcome of resolving the current entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a, T> {
    Found(&'a T),
    /// The parameter named an id that is not in the collection.
    NotFound { id: String },
    /// No parameter given; go to the first entity's page instead.
    Redirect { location: String },
    /// No parameter and nothing to redirect to.
    Empty,
}

impl<'a, T: Entity> Resolution<'a, T> {
    pub fn found(&self) -> Option<&'a T> {
        match self {
            Self::Found(entity) => Some(*entity),
            _ => None,
        }
    }

    /// Entity or the error explaining why entity projections must not run.
    pub fn require(&self) -> Result<&'a T, MapError> {
        match self {
            Self::Found(entity) => Ok(*entity),
            Self::NotFound { id } => Err(MapError::EntityNotFound {
                kind: T::KIND,
                id: id.clone(),
            }),
            Self::Redirect { .. } | Self::Empty => Err(MapError::missing(ID_PARAM)),
        }
    }

    pub fn redirect(&self) -> Option<&str> {
        match self {
            Self::Redirect { location } => Some(location),
            _ => None,
        }
    }
}

/// Collections sorted by declared display order, first entity first.
pub fn in_display_order<T: Entity>(collection: &[T]) -> Vec<&T> {
    let mut ordered: Vec<&T> = collection.iter().collect();
    ordered.sort_by_key(|entity| entity.display_order());
    ordered
}

/// Memoized lookup of the entity named by a query parameter.
pub struct EntityLookup<'a, T> {
    collection: &'a [T],
    query: &'a QueryParams,
    param: &'static str,
    resolved: OnceCell<Resolution<'a, T>>,
}

impl<'a, T: Entity> EntityLookup<'a, T> {
    pub fn new(collection: &'a [T], query: &'a QueryParams) -> Self {
        Self::with_param(collection, query, ID_PARAM)
    }

    pub fn with_param(collection: &'a [T], query: &'a QueryParams, param: &'static str) -> Self {
        Self {
            collection,
            query,
            param,
            resolved: OnceCell::new(),
        }
    }

    /// Resolve once; later calls return the cached outcome.
    pub fn resolve(&self) -> &Resolution<'a, T> {
        self.resolved.get_or_init(|| self.resolve_uncached())
    }

    fn resolve_uncached(&self) -> Resolution<'a, T> {
        let Some(id) = self.query.get(self.param) else {
            return match in_display_order(self.collection).first() {
                Some(first) => {
                    let location = T::canonical_path(first.id());
                    debug!("No {} parameter, redirecting to {}", self.param, location);
                    Resolution::Redirect { location }
                }
                None => Resolution::Empty,
            };
        };

        match self.collection.iter().find(|entity| entity.id() == id) {
            Some(entity) => Resolution::Found(entity),
            None => {
                warn!("No {} with id '{}' in document", T::KIND, id);
                Resolution::NotFound { id: id.to_string() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooms() -> Vec<Room> {
        ["r1", "r2"]
            .iter()
            .map(|id| Room {
                id: id.to_string(),
                ..Room::default()
            })
            .collect()
    }

    #[test]
    fn parses_query_strings() {
        let query = QueryParams::parse("?id=room%201&lang=ko&id=other");
        assert_eq!(query.get("id"), Some("room 1"));
        assert_eq!(query.get("lang"), Some("ko"));
        assert_eq!(query.get("missing"), None);
        assert_eq!(QueryParams::parse(""), QueryParams::default());
    }

    #[test]
    fn finds_entity_by_id() {
        let rooms = rooms();
        let query = QueryParams::parse("id=r1");
        let lookup = EntityLookup::new(&rooms, &query);
        assert_eq!(lookup.resolve().found().map(|r| r.id.as_str()), Some("r1"));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let rooms = rooms();
        let query = QueryParams::parse("id=missing");
        let lookup = EntityLookup::new(&rooms, &query);
        assert_eq!(
            lookup.resolve(),
            &Resolution::NotFound {
                id: "missing".to_string()
            }
        );
        assert!(matches!(
            lookup.resolve().require(),
            Err(MapError::EntityNotFound { kind: "room", .. })
        ));
    }

    #[test]
    fn missing_param_redirects_to_first_entity() {
        let rooms = rooms();
        let query = QueryParams::default();
        let lookup = EntityLookup::new(&rooms, &query);
        assert_eq!(lookup.resolve().redirect(), Some("room.html?id=r1"));
    }

    #[test]
    fn redirect_follows_display_order() {
        let mut rooms = rooms();
        rooms[0].display_order = Some(5);
        rooms[1].display_order = Some(1);
        let query = QueryParams::default();
        let lookup = EntityLookup::new(&rooms, &query);
        assert_eq!(lookup.resolve().redirect(), Some("room.html?id=r2"));
    }

    #[test]
    fn missing_param_and_empty_collection() {
        let facilities: Vec<Facility> = Vec::new();
        let query = QueryParams::default();
        let lookup = EntityLookup::new(&facilities, &query);
        assert_eq!(lookup.resolve(), &Resolution::Empty);
    }

    #[test]
    fn resolution_is_memoized() {
        let rooms = rooms();
        let query = QueryParams::parse("id=r2");
        let lookup = EntityLookup::new(&rooms, &query);
        let first = lookup.resolve() as *const _;
        let second = lookup.resolve() as *const _;
        assert_eq!(first, second);
    }
}
