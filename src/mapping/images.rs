//! Selection and ordering of curated image collections.
//!
//! Nothing in here fails: malformed entries are dropped and missing input
//! yields an empty sequence.

use serde::Serialize;
use serde_json::Value;

/// An image that passed curation, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImage {
    pub url: String,
    pub description: String,
}

impl ResolvedImage {
    pub fn new(url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: description.into(),
        }
    }
}

/// One image position: a real image or the explicit "nothing here" marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ImageSlot {
    Image(ResolvedImage),
    Empty,
}

impl ImageSlot {
    pub fn image(&self) -> Option<&ResolvedImage> {
        match self {
            Self::Image(image) => Some(image),
            Self::Empty => None,
        }
    }
}

impl From<Option<ResolvedImage>> for ImageSlot {
    fn from(image: Option<ResolvedImage>) -> Self {
        image.map_or(Self::Empty, Self::Image)
    }
}

struct Candidate {
    image: ResolvedImage,
    sort_order: f64,
}

/// `sortOrder` as a number; numeric strings count, anything else is 0.
fn sort_key(value: Option<&Value>) -> f64 {
    let order = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    order.filter(|o: &f64| o.is_finite()).unwrap_or(0.0)
}

fn candidate(entry: &Value) -> Option<Candidate> {
    match entry {
        // Legacy shape: bare URL strings, always displayable.
        Value::String(url) if !url.trim().is_empty() => Some(Candidate {
            image: ResolvedImage::new(url.clone(), ""),
            sort_order: 0.0,
        }),
        Value::Object(record) => {
            if record.get("isSelected").and_then(Value::as_bool) != Some(true) {
                return None;
            }
            let url = record
                .get("url")
                .and_then(Value::as_str)
                .filter(|u| !u.trim().is_empty())?;
            let description = record
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default();
            let sort_order = sort_key(record.get("sortOrder"));
            Some(Candidate {
                image: ResolvedImage::new(url, description),
                sort_order,
            })
        }
        _ => None,
    }
}

/// Selected images in display order.
///
/// Keeps entries with `isSelected == true` and a non-empty `url`, ordered by
/// `sortOrder` ascending; equal orders keep their source position.
pub fn resolve_selected(images: Option<&Value>) -> Vec<ResolvedImage> {
    let Some(entries) = images.and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut candidates: Vec<Candidate> = entries.iter().filter_map(candidate).collect();
    // sort_by is stable.
    candidates.sort_by(|a, b| a.sort_order.total_cmp(&b.sort_order));
    candidates.into_iter().map(|c| c.image).collect()
}

/// First displayable image, or the empty marker.
pub fn first_or_placeholder(images: Option<&Value>) -> ImageSlot {
    resolve_selected(images).into_iter().next().into()
}

/// Exactly `slots` positions: the first images in order, padded with empty markers.
pub fn fill_slots(images: &[ResolvedImage], slots: usize) -> Vec<ImageSlot> {
    (0..slots)
        .map(|i| ImageSlot::from(images.get(i).cloned()))
        .collect()
}

/// Image at `index`, else the last one, else the empty marker.
pub fn pick_at_or_last(images: &[ResolvedImage], index: usize) -> ImageSlot {
    images.get(index).or_else(|| images.last()).cloned().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn urls(images: &[ResolvedImage]) -> Vec<&str> {
        images.iter().map(|i| i.url.as_str()).collect()
    }

    #[test]
    fn filters_unselected_and_sorts_by_order() {
        let images = json!([
            { "url": "a", "isSelected": true, "sortOrder": 2 },
            { "url": "b", "isSelected": true, "sortOrder": 1 },
            { "url": "c", "isSelected": false, "sortOrder": 0 }
        ]);
        assert_eq!(urls(&resolve_selected(Some(&images))), vec!["b", "a"]);
    }

    #[test]
    fn equal_sort_orders_keep_source_position() {
        let images = json!([
            { "url": "first", "isSelected": true, "sortOrder": 1 },
            { "url": "zero", "isSelected": true },
            { "url": "second", "isSelected": true, "sortOrder": 1 }
        ]);
        assert_eq!(
            urls(&resolve_selected(Some(&images))),
            vec!["zero", "first", "second"]
        );
    }

    #[test]
    fn string_and_fractional_sort_orders_are_numeric() {
        let images = json!([
            { "url": "two", "isSelected": true, "sortOrder": "2" },
            { "url": "one", "isSelected": true, "sortOrder": 1 },
            { "url": "half", "isSelected": true, "sortOrder": 1.5 },
            { "url": "junk", "isSelected": true, "sortOrder": "soon" }
        ]);
        assert_eq!(
            urls(&resolve_selected(Some(&images))),
            vec!["junk", "one", "half", "two"]
        );
    }

    #[test]
    fn missing_or_empty_input_yields_nothing() {
        assert!(resolve_selected(None).is_empty());
        assert!(resolve_selected(Some(&json!([]))).is_empty());
        assert!(resolve_selected(Some(&json!({ "url": "a" }))).is_empty());
    }

    #[test]
    fn malformed_entries_are_dropped() {
        let images = json!([
            { "isSelected": true, "sortOrder": 0 },
            { "url": "", "isSelected": true },
            { "url": "ok.jpg", "isSelected": "yes" },
            42,
            { "url": "keep.jpg", "isSelected": true, "description": "Lobby" }
        ]);
        let resolved = resolve_selected(Some(&images));
        assert_eq!(resolved, vec![ResolvedImage::new("keep.jpg", "Lobby")]);
    }

    #[test]
    fn legacy_url_strings_are_normalized() {
        let images = json!(["one.jpg", "", "two.jpg"]);
        assert_eq!(
            resolve_selected(Some(&images)),
            vec![ResolvedImage::new("one.jpg", ""), ResolvedImage::new("two.jpg", "")]
        );
    }

    #[test]
    fn first_or_placeholder_marks_empty_collections() {
        assert_eq!(first_or_placeholder(None), ImageSlot::Empty);
        let images = json!([{ "url": "a.jpg", "isSelected": true }]);
        assert_eq!(
            first_or_placeholder(Some(&images)),
            ImageSlot::Image(ResolvedImage::new("a.jpg", ""))
        );
    }

    #[test]
    fn fill_slots_pads_and_truncates() {
        let images = vec![ResolvedImage::new("a", ""), ResolvedImage::new("b", "")];
        let slots = fill_slots(&images, 4);
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[1].image().map(|i| i.url.as_str()), Some("b"));
        assert_eq!(slots[2], ImageSlot::Empty);
        assert_eq!(fill_slots(&images, 1).len(), 1);
    }

    #[test]
    fn pick_at_or_last_uses_literal_index() {
        let images: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|u| ResolvedImage::new(*u, ""))
            .collect();
        assert_eq!(pick_at_or_last(&images, 2).image().unwrap().url, "c");
        assert_eq!(pick_at_or_last(&images[..2], 2).image().unwrap().url, "b");
        assert_eq!(pick_at_or_last(&[], 2), ImageSlot::Empty);
    }
}
