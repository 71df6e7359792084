//! Landing page (`index.html`).

use serde_json::Value;

use super::view::{custom_cards, meta_step, require, MetaSource, ViewBuilder};
use super::{PageKind, PageMapper, PageView, RenderContext};
use crate::dom::Card;
use crate::error::MapError;
use crate::mapping::accessor::get_str;
use crate::mapping::defaults::{has_custom_content, ESSENCE_ITEM};
use crate::mapping::images::{fill_slots, pick_at_or_last};
use crate::mapping::lookup::{in_display_order, Entity};
use crate::mapping::{
    first_or_placeholder, resolve_selected, sanitize_text, ImageSlot, QueryParams,
};
use crate::models::{find_collection, PropertyDocument, Room};

pub const INDEX_HERO_SLIDES: &str = "index-hero-slides";
pub const INDEX_HERO_TITLE: &str = "index-hero-title";
pub const INDEX_HERO_DESCRIPTION: &str = "index-hero-description";
pub const INDEX_ESSENCE: &str = "index-essence";
pub const INDEX_ESSENCE_TITLE: &str = "index-essence-title";
pub const INDEX_ESSENCE_DESCRIPTION: &str = "index-essence-description";
pub const INDEX_ESSENCE_ITEMS: &str = "index-essence-items";
pub const INDEX_ROOMS: &str = "index-rooms";
pub const INDEX_GALLERY_TITLE: &str = "index-gallery-title";
pub const INDEX_GALLERY: &str = "index-gallery";
pub const INDEX_SIGNATURE_TITLE: &str = "index-signature-title";
pub const INDEX_SIGNATURE_DESCRIPTION: &str = "index-signature-description";
pub const INDEX_SIGNATURE_IMAGE: &str = "index-signature-image";
pub const INDEX_CLOSING_TITLE: &str = "index-closing-title";
pub const INDEX_CLOSING_DESCRIPTION: &str = "index-closing-description";
pub const INDEX_CLOSING_IMAGE: &str = "index-closing-image";

const PAGE: &str = "index";
const GALLERY_SLOTS: usize = 6;
/// The closing background is the third curated image, else the last one.
const CLOSING_IMAGE_INDEX: usize = 2;

fn room_card(room: &Room) -> Card {
    Card::titled(sanitize_text(room.name.as_deref(), "객실명"))
        .image(first_or_placeholder(find_collection(&room.images, "thumbnail")))
        .href(Room::canonical_path(&room.id))
}

fn images_of(section: &Value) -> Option<&Value> {
    section.get("images")
}

pub struct IndexMapper;

impl PageMapper for IndexMapper {
    fn kind(&self) -> PageKind {
        PageKind::Index
    }

    fn project(
        &self,
        document: &PropertyDocument,
        _query: &QueryParams,
        _context: &RenderContext,
    ) -> PageView {
        let mut builder = ViewBuilder::new(PageKind::Index);
        let hero = document.custom_section(PAGE, "hero");
        let hero_images = resolve_selected(hero.and_then(images_of));

        builder
            .step("hero slides", |step| {
                require(hero, "index.hero")?;
                if hero_images.is_empty() {
                    step.grid(INDEX_HERO_SLIDES, vec![ImageSlot::Empty]);
                } else {
                    step.slides(INDEX_HERO_SLIDES, &hero_images);
                }
                Ok(())
            })
            .step("hero text", |step| {
                let hero = require(hero, "index.hero")?;
                step.text_or_placeholder(INDEX_HERO_TITLE, get_str(hero, "title"), "메인 타이틀");
                step.multiline(
                    INDEX_HERO_DESCRIPTION,
                    get_str(hero, "description"),
                    "메인 설명",
                );
                Ok(())
            })
            .step("essence", |step| {
                let essence = require(document.custom_section(PAGE, "essence"), "index.essence")?;
                let items = essence.get("items");
                if !has_custom_content(items, ESSENCE_ITEM) {
                    step.visibility(INDEX_ESSENCE, false);
                    return Ok(());
                }
                step.visibility(INDEX_ESSENCE, true);
                step.text_or_placeholder(
                    INDEX_ESSENCE_TITLE,
                    get_str(essence, "title"),
                    "특징 섹션 타이틀",
                );
                step.multiline(
                    INDEX_ESSENCE_DESCRIPTION,
                    get_str(essence, "description"),
                    "특징 섹션 설명",
                );
                let items = items.and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();
                step.items(
                    INDEX_ESSENCE_ITEMS,
                    custom_cards(items, "특징 타이틀", "특징 설명"),
                );
                Ok(())
            })
            .step("rooms", |step| {
                if document.rooms.is_empty() {
                    return Err(MapError::missing("rooms"));
                }
                let cards = in_display_order(&document.rooms)
                    .into_iter()
                    .map(room_card)
                    .collect();
                step.items(INDEX_ROOMS, cards);
                Ok(())
            })
            .step("gallery", |step| {
                let gallery = require(document.custom_section(PAGE, "gallery"), "index.gallery")?;
                step.text_or_placeholder(
                    INDEX_GALLERY_TITLE,
                    get_str(gallery, "title"),
                    "갤러리 타이틀",
                );
                let images = resolve_selected(images_of(gallery));
                step.grid(INDEX_GALLERY, fill_slots(&images, GALLERY_SLOTS));
                Ok(())
            })
            .step("signature", |step| {
                let signature =
                    require(document.custom_section(PAGE, "signature"), "index.signature")?;
                step.text_or_placeholder(
                    INDEX_SIGNATURE_TITLE,
                    get_str(signature, "title"),
                    "시그니처 타이틀",
                );
                step.multiline(
                    INDEX_SIGNATURE_DESCRIPTION,
                    get_str(signature, "description"),
                    "시그니처 설명",
                );
                step.image(INDEX_SIGNATURE_IMAGE, first_or_placeholder(images_of(signature)));
                Ok(())
            })
            .step("closing", |step| {
                let closing = require(document.custom_section(PAGE, "closing"), "index.closing")?;
                step.text_or_placeholder(
                    INDEX_CLOSING_TITLE,
                    get_str(closing, "title"),
                    "클로징 타이틀",
                );
                step.multiline(
                    INDEX_CLOSING_DESCRIPTION,
                    get_str(closing, "description"),
                    "클로징 설명",
                );
                let images = resolve_selected(images_of(closing));
                step.image(
                    INDEX_CLOSING_IMAGE,
                    pick_at_or_last(&images, CLOSING_IMAGE_INDEX),
                );
                Ok(())
            })
            .step("meta", |step| {
                let source = MetaSource::titled(None, document.property.name.as_deref())
                    .description(hero.and_then(|h| get_str(h, "description")))
                    .image(hero_images.first());
                meta_step(step, &source)
            })
            .fade_in();

        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DomWrite, MetaKey};
    use crate::mapping::ResolvedImage;
    use crate::pages::fixtures::document;
    use serde_json::json;

    fn project(document: &PropertyDocument) -> PageView {
        IndexMapper.project(document, &QueryParams::default(), &RenderContext::default())
    }

    fn with_essence_items(items: Value) -> PropertyDocument {
        PropertyDocument::from_value(json!({
            "homepage": { "customFields": { "pages": { "index": { "sections": [{
                "essence": { "title": "특징", "items": items }
            }]}}}}
        }))
        .unwrap()
    }

    #[test]
    fn hero_slides_and_text() {
        let view = project(&document());
        let Some(DomWrite::Gallery { slots, .. }) = view.write_for(INDEX_HERO_SLIDES) else {
            panic!("no hero slides");
        };
        assert_eq!(slots[0].image().map(|i| i.url.as_str()), Some("hero-1.jpg"));
        assert_eq!(view.text_for(INDEX_HERO_TITLE), Some("숲 속의 쉼"));
        assert_eq!(
            view.write_for(INDEX_HERO_DESCRIPTION),
            Some(&DomWrite::html(INDEX_HERO_DESCRIPTION, "솔밭 사이<br>조용한 하루"))
        );
    }

    #[test]
    fn all_default_essence_is_suppressed() {
        let view = project(&with_essence_items(json!([
            { "title": "특징 타이틀", "description": "특징 설명" },
            { "title": "특징 타이틀", "description": "특징 설명" }
        ])));
        assert_eq!(
            view.write_for(INDEX_ESSENCE),
            Some(&DomWrite::visibility(INDEX_ESSENCE, false))
        );
        assert!(view.write_for(INDEX_ESSENCE_ITEMS).is_none());
    }

    #[test]
    fn edited_essence_renders_in_full() {
        let view = project(&with_essence_items(json!([
            { "title": "특징 타이틀", "description": "특징 설명" },
            { "title": "노천탕", "description": "사계절 온수" }
        ])));
        assert_eq!(
            view.write_for(INDEX_ESSENCE),
            Some(&DomWrite::visibility(INDEX_ESSENCE, true))
        );
        let Some(DomWrite::Items { items, .. }) = view.write_for(INDEX_ESSENCE_ITEMS) else {
            panic!("no essence items");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].title, "노천탕");
        assert_eq!(view.text_for(INDEX_ESSENCE_TITLE), Some("특징"));
    }

    #[test]
    fn room_cards_link_to_detail_pages() {
        let view = project(&document());
        let Some(DomWrite::Items { items, .. }) = view.write_for(INDEX_ROOMS) else {
            panic!("no room cards");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].href.as_deref(), Some("room.html?id=room-1"));
        assert_eq!(
            items[0].image,
            Some(ImageSlot::Image(ResolvedImage::new("room1-thumb.jpg", "")))
        );
        assert_eq!(items[1].image, Some(ImageSlot::Empty));
    }

    #[test]
    fn gallery_has_six_slots() {
        let view = project(&document());
        let Some(DomWrite::Gallery { slots, .. }) = view.write_for(INDEX_GALLERY) else {
            panic!("no gallery");
        };
        assert_eq!(slots.len(), GALLERY_SLOTS);
        assert_eq!(slots.iter().filter(|s| **s == ImageSlot::Empty).count(), 4);
    }

    #[test]
    fn closing_image_falls_back_to_last() {
        let view = project(&document());
        assert_eq!(
            view.write_for(INDEX_CLOSING_IMAGE),
            Some(&DomWrite::image(
                INDEX_CLOSING_IMAGE,
                ImageSlot::Image(ResolvedImage::new("c2.jpg", ""))
            ))
        );
        assert_eq!(
            view.write_for(INDEX_CLOSING_DESCRIPTION),
            Some(&DomWrite::html(INDEX_CLOSING_DESCRIPTION, "[클로징 설명]"))
        );
    }

    #[test]
    fn missing_sections_are_left_alone() {
        let view = project(&PropertyDocument::default());
        assert!(view.writes.is_empty());
        assert!(view.failed_steps.is_empty());
    }

    #[test]
    fn metadata_comes_last() {
        let view = project(&document());
        assert_eq!(view.meta(MetaKey::Title), Some("스테이 솔밭"));
        assert_eq!(view.meta(MetaKey::Description), Some("솔밭 사이"));
        assert_eq!(view.meta(MetaKey::OgImage), Some("hero-1.jpg"));
        assert!(matches!(view.writes.last(), Some(DomWrite::Meta { .. })));
    }
}
