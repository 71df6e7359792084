//! Room detail page (`room.html?id=<room id>`).

use super::view::{meta_step, MetaSource, ViewBuilder};
use super::{PageKind, PageMapper, PageView, RenderContext};
use crate::dom::Card;
use crate::error::MapError;
use crate::mapping::accessor::{labels, value_text};
use crate::mapping::images::fill_slots;
use crate::mapping::{resolve_selected, EntityLookup, ImageSlot, QueryParams, ResolvedImage};
use crate::models::{find_collection, PropertyDocument, Room};

pub const ROOM_MARQUEE: &str = "room-marquee";
pub const ROOM_SLIDES: &str = "room-slides";
pub const ROOM_NAME: &str = "room-name";
pub const ROOM_SIZE: &str = "room-size";
pub const ROOM_BED_TYPES: &str = "room-bed-types";
pub const ROOM_STRUCTURES: &str = "room-structures";
pub const ROOM_OCCUPANCY: &str = "room-occupancy";
pub const ROOM_AMENITIES: &str = "room-amenities";
pub const ROOM_INFO: &str = "room-info";
pub const ROOM_EXTERIOR: &str = "room-exterior";

const EXTERIOR_SLOTS: usize = 3;

/// Slider images: curated interior shots, else the thumbnail set.
pub fn room_slides(room: &Room) -> Vec<ResolvedImage> {
    let interior = resolve_selected(find_collection(&room.images, "interior"));
    if !interior.is_empty() {
        return interior;
    }
    resolve_selected(find_collection(&room.images, "thumbnail"))
}

/// Size in square metres; bare numbers get the unit.
fn size_text(room: &Room) -> Option<String> {
    let size = room.size.as_ref().and_then(value_text)?;
    if size.parse::<f64>().is_ok() {
        Some(format!("{size}㎡"))
    } else {
        Some(size)
    }
}

fn occupancy_text(room: &Room) -> Option<String> {
    match (room.base_occupancy, room.max_occupancy) {
        (Some(base), Some(max)) => Some(format!("기준 {base}명 / 최대 {max}명")),
        (Some(base), None) => Some(format!("기준 {base}명")),
        (None, Some(max)) => Some(format!("최대 {max}명")),
        (None, None) => None,
    }
}

fn joined(values: &[serde_json::Value]) -> Option<String> {
    let labels = labels(values);
    (!labels.is_empty()).then(|| labels.join(", "))
}

pub struct RoomMapper;

impl PageMapper for RoomMapper {
    fn kind(&self) -> PageKind {
        PageKind::Room
    }

    fn project(
        &self,
        document: &PropertyDocument,
        query: &QueryParams,
        _context: &RenderContext,
    ) -> PageView {
        let mut builder = ViewBuilder::new(PageKind::Room);
        let site_name = document.property.name.as_deref();

        builder.step("marquee", |step| {
            let name = site_name.ok_or_else(|| MapError::missing("property.name"))?;
            step.text(ROOM_MARQUEE, name);
            Ok(())
        });

        let lookup = EntityLookup::new(&document.rooms, query);
        if let Some(location) = lookup.resolve().redirect() {
            builder.redirect(location);
            return builder.finish();
        }
        let room = match lookup.resolve().require() {
            Ok(room) => room,
            Err(err) => {
                builder.step("room", |_| Err(err));
                return builder.finish();
            }
        };

        let slides = room_slides(room);

        builder
            .step("slides", |step| {
                if slides.is_empty() {
                    step.grid(ROOM_SLIDES, vec![ImageSlot::Empty]);
                } else {
                    step.slides(ROOM_SLIDES, &slides);
                }
                Ok(())
            })
            .step("name", |step| {
                step.text_or_placeholder(ROOM_NAME, room.name.as_deref(), "객실명");
                Ok(())
            })
            .step("size", |step| {
                step.text_or_placeholder(ROOM_SIZE, size_text(room).as_deref(), "객실 크기");
                Ok(())
            })
            .step("bed types", |step| {
                step.text_or_placeholder(
                    ROOM_BED_TYPES,
                    joined(&room.bed_types).as_deref(),
                    "침대 타입",
                );
                Ok(())
            })
            .step("structures", |step| {
                step.text_or_placeholder(
                    ROOM_STRUCTURES,
                    joined(&room.room_structures).as_deref(),
                    "객실 구조",
                );
                Ok(())
            })
            .step("occupancy", |step| {
                step.text_or_placeholder(
                    ROOM_OCCUPANCY,
                    occupancy_text(room).as_deref(),
                    "기준/최대 인원",
                );
                Ok(())
            })
            .step("amenities", |step| {
                let amenities = labels(&room.amenities);
                if amenities.is_empty() {
                    return Err(MapError::missing("room.amenities"));
                }
                step.items(ROOM_AMENITIES, amenities.into_iter().map(Card::titled).collect());
                Ok(())
            })
            .step("info", |step| {
                step.multiline(ROOM_INFO, room.room_info.as_deref(), "객실 설명");
                Ok(())
            })
            .step("exterior", |step| {
                let exterior = resolve_selected(find_collection(&room.images, "exterior"));
                step.grid(ROOM_EXTERIOR, fill_slots(&exterior, EXTERIOR_SLOTS));
                Ok(())
            })
            .step("meta", |step| {
                let source = MetaSource::titled(room.name.as_deref(), site_name)
                    .description(room.room_info.as_deref())
                    .image(slides.first());
                meta_step(step, &source)
            })
            .fade_in();

        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DomWrite, MetaKey, PatchDom};
    use crate::hooks::Hooks;
    use crate::pages::fixtures::document;
    use crate::pages::PageSession;
    use serde_json::json;
    use std::sync::Arc;

    fn project(document: &PropertyDocument, query: &str) -> PageView {
        RoomMapper.project(document, &QueryParams::parse(query), &RenderContext::default())
    }

    #[test]
    fn single_interior_image_becomes_single_slide() {
        let document = PropertyDocument::from_value(json!({
            "rooms": [{
                "id": "room-1",
                "name": "Deluxe",
                "images": [{ "group": { "interior": [
                    { "url": "x.jpg", "isSelected": true, "sortOrder": 0 }
                ]}}]
            }]
        }))
        .unwrap();

        let mut session =
            PageSession::new(RoomMapper, QueryParams::parse("?id=room-1"), RenderContext::default());
        session.accept(Ok(Arc::new(document)));
        let mut dom = PatchDom::new();
        session.render_page(&mut dom, &mut Hooks::none());

        let slides = dom.node(ROOM_SLIDES).unwrap().slides.as_ref().unwrap();
        assert_eq!(slides.len(), 1);
        assert_eq!(slides[0].src, "x.jpg");
        assert_eq!(dom.text(ROOM_NAME), Some("Deluxe"));
    }

    #[test]
    fn projects_room_attributes() {
        let view = project(&document(), "id=room-1");

        assert_eq!(view.text_for(ROOM_MARQUEE), Some("스테이 솔밭"));
        assert_eq!(view.text_for(ROOM_NAME), Some("디럭스"));
        assert_eq!(view.text_for(ROOM_SIZE), Some("33㎡"));
        assert_eq!(view.text_for(ROOM_BED_TYPES), Some("킹"));
        assert_eq!(view.text_for(ROOM_STRUCTURES), Some("침실 1, 욕실 1"));
        assert_eq!(view.text_for(ROOM_OCCUPANCY), Some("기준 2명 / 최대 4명"));
        assert_eq!(
            view.write_for(ROOM_INFO),
            Some(&DomWrite::html(ROOM_INFO, "바다 전망<br>테라스 포함"))
        );
        assert_eq!(view.hooks.sliders, vec![(ROOM_SLIDES.to_string(), 2)]);
        assert!(view.hooks.fade_in);
    }

    #[test]
    fn slides_follow_sort_order() {
        let view = project(&document(), "id=room-1");
        let Some(DomWrite::Gallery { slots, .. }) = view.write_for(ROOM_SLIDES) else {
            panic!("no slides");
        };
        let urls: Vec<_> = slots.iter().filter_map(|s| s.image()).map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["room1-a.jpg", "room1-b.jpg"]);
    }

    #[test]
    fn exterior_grid_keeps_fixed_slots() {
        let view = project(&document(), "id=room-1");
        let Some(DomWrite::Gallery { slots, .. }) = view.write_for(ROOM_EXTERIOR) else {
            panic!("no exterior grid");
        };
        assert_eq!(slots.len(), EXTERIOR_SLOTS);
        assert_eq!(slots[1], ImageSlot::Empty);
    }

    #[test]
    fn sparse_room_gets_placeholders() {
        let view = project(&document(), "id=room-2");

        assert_eq!(view.text_for(ROOM_NAME), Some("스위트"));
        assert_eq!(view.text_for(ROOM_SIZE), Some("[객실 크기]"));
        assert_eq!(view.text_for(ROOM_OCCUPANCY), Some("[기준/최대 인원]"));
        assert!(view.write_for(ROOM_AMENITIES).is_none());
        assert_eq!(
            view.write_for(ROOM_SLIDES),
            Some(&DomWrite::gallery(ROOM_SLIDES, vec![ImageSlot::Empty]))
        );
        assert!(view.hooks.sliders.is_empty());
    }

    #[test]
    fn unknown_room_keeps_generic_sections_only() {
        let view = project(&document(), "id=missing");

        assert_eq!(view.text_for(ROOM_MARQUEE), Some("스테이 솔밭"));
        assert!(view.write_for(ROOM_NAME).is_none());
        assert_eq!(view.failed_steps.len(), 1);
        assert!(view.redirect.is_none());
    }

    #[test]
    fn missing_id_redirects_to_first_room() {
        let view = project(&document(), "");
        assert_eq!(view.redirect.as_deref(), Some("room.html?id=room-1"));
        assert!(view.write_for(ROOM_NAME).is_none());
    }

    #[test]
    fn metadata_uses_earlier_values() {
        let view = project(&document(), "id=room-1");
        assert_eq!(view.meta(MetaKey::Title), Some("디럭스 | 스테이 솔밭"));
        assert_eq!(view.meta(MetaKey::Description), Some("바다 전망"));
        assert_eq!(view.meta(MetaKey::OgImage), Some("room1-a.jpg"));
        assert!(matches!(view.writes.last(), Some(DomWrite::Meta { .. })));
    }
}
