//! About-the-property page (`main.html`).

use serde_json::Value;

use super::view::{custom_cards, meta_step, require, MetaSource, ViewBuilder};
use super::{PageKind, PageMapper, PageView, RenderContext};
use crate::error::MapError;
use crate::mapping::accessor::get_str;
use crate::mapping::images::fill_slots;
use crate::mapping::{first_or_placeholder, resolve_selected, QueryParams};
use crate::models::PropertyDocument;

pub const MAIN_HERO_IMAGE: &str = "main-hero-image";
pub const MAIN_HERO_TITLE: &str = "main-hero-title";
pub const MAIN_HERO_DESCRIPTION: &str = "main-hero-description";
pub const MAIN_ABOUT_ITEMS: &str = "main-about-items";
pub const MAIN_EXPERIENCE: &str = "main-experience";
pub const MAIN_EXPERIENCE_TITLE: &str = "main-experience-title";
pub const MAIN_EXPERIENCE_ITEMS: &str = "main-experience-items";
pub const MAIN_GALLERY: &str = "main-gallery";

const PAGE: &str = "main";
const GALLERY_SLOTS: usize = 4;

pub struct MainMapper;

impl PageMapper for MainMapper {
    fn kind(&self) -> PageKind {
        PageKind::Main
    }

    fn project(
        &self,
        document: &PropertyDocument,
        _query: &QueryParams,
        _context: &RenderContext,
    ) -> PageView {
        let mut builder = ViewBuilder::new(PageKind::Main);
        let hero = document.custom_section(PAGE, "hero");
        let hero_image = first_or_placeholder(hero.and_then(|h| h.get("images")));
        let hero_title = hero.and_then(|h| get_str(h, "title"));

        builder
            .step("hero", |step| {
                let hero = require(hero, "main.hero")?;
                step.image(MAIN_HERO_IMAGE, hero_image.clone());
                step.text_or_placeholder(MAIN_HERO_TITLE, get_str(hero, "title"), "소개 타이틀");
                step.multiline(
                    MAIN_HERO_DESCRIPTION,
                    get_str(hero, "description"),
                    "소개 설명",
                );
                Ok(())
            })
            .step("about", |step| {
                let about = require(document.custom_section(PAGE, "about"), "main.about")?;
                let blocks = about
                    .as_array()
                    .filter(|blocks| !blocks.is_empty())
                    .ok_or_else(|| MapError::missing("main.about"))?;
                step.items(MAIN_ABOUT_ITEMS, custom_cards(blocks, "소개 항목", "소개 내용"));
                Ok(())
            })
            .step("experience", |step| {
                let experience =
                    require(document.custom_section(PAGE, "experience"), "main.experience")?;
                let items = experience
                    .get("items")
                    .and_then(Value::as_array)
                    .filter(|items| !items.is_empty());
                let Some(items) = items else {
                    step.visibility(MAIN_EXPERIENCE, false);
                    return Ok(());
                };
                step.visibility(MAIN_EXPERIENCE, true);
                step.text_or_placeholder(
                    MAIN_EXPERIENCE_TITLE,
                    get_str(experience, "title"),
                    "경험 타이틀",
                );
                step.items(MAIN_EXPERIENCE_ITEMS, custom_cards(items, "경험 항목", "경험 설명"));
                Ok(())
            })
            .step("gallery", |step| {
                let gallery = require(document.custom_section(PAGE, "gallery"), "main.gallery")?;
                let images = resolve_selected(gallery.get("images"));
                step.grid(MAIN_GALLERY, fill_slots(&images, GALLERY_SLOTS));
                Ok(())
            })
            .step("meta", |step| {
                let source = MetaSource::titled(hero_title, document.property.name.as_deref())
                    .description(hero.and_then(|h| get_str(h, "description")))
                    .image(hero_image.image());
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
    use crate::mapping::{ImageSlot, ResolvedImage};
    use crate::pages::fixtures::document;
    use serde_json::json;

    fn project(document: &PropertyDocument) -> PageView {
        MainMapper.project(document, &QueryParams::default(), &RenderContext::default())
    }

    #[test]
    fn hero_uses_first_selected_image() {
        let view = project(&document());
        assert_eq!(
            view.write_for(MAIN_HERO_IMAGE),
            Some(&DomWrite::image(
                MAIN_HERO_IMAGE,
                ImageSlot::Image(ResolvedImage::new("main-hero.jpg", ""))
            ))
        );
        assert_eq!(view.text_for(MAIN_HERO_TITLE), Some("솔밭 이야기"));
        assert_eq!(
            view.write_for(MAIN_HERO_DESCRIPTION),
            Some(&DomWrite::html(MAIN_HERO_DESCRIPTION, "[소개 설명]"))
        );
    }

    #[test]
    fn about_blocks_become_cards_with_placeholders() {
        let view = project(&document());
        let Some(DomWrite::Items { items, .. }) = view.write_for(MAIN_ABOUT_ITEMS) else {
            panic!("no about items");
        };
        assert_eq!(items[0].title, "공간");
        assert_eq!(items[1].title, "[소개 항목]");
        assert_eq!(items[1].description.as_deref(), Some("햇살"));
        assert_eq!(items[1].image, None);
    }

    #[test]
    fn empty_experience_is_hidden() {
        let document = PropertyDocument::from_value(json!({
            "homepage": { "customFields": { "pages": { "main": { "sections": [{
                "experience": { "title": "경험", "items": [] }
            }]}}}}
        }))
        .unwrap();
        let view = project(&document);
        assert_eq!(
            view.write_for(MAIN_EXPERIENCE),
            Some(&DomWrite::visibility(MAIN_EXPERIENCE, false))
        );
    }

    #[test]
    fn hero_without_images_uses_placeholder() {
        let document = PropertyDocument::from_value(json!({
            "homepage": { "customFields": { "pages": { "main": { "sections": [{
                "hero": { "title": "소개", "images": [{ "url": "a.jpg", "isSelected": false }] }
            }]}}}}
        }))
        .unwrap();
        let view = project(&document);
        assert_eq!(
            view.write_for(MAIN_HERO_IMAGE),
            Some(&DomWrite::image(MAIN_HERO_IMAGE, ImageSlot::Empty))
        );
        assert!(view.meta(MetaKey::OgImage).is_none());
        assert_eq!(view.meta(MetaKey::Title), Some("소개"));
    }

    #[test]
    fn metadata_title_combines_hero_and_site() {
        let view = project(&document());
        assert_eq!(view.meta(MetaKey::Title), Some("솔밭 이야기 | 스테이 솔밭"));
        assert_eq!(view.meta(MetaKey::OgImage), Some("main-hero.jpg"));
    }
}
