//! Facility detail page (`facility.html?id=<facility id>`).

use super::view::{meta_step, MetaSource, ViewBuilder};
use super::{PageKind, PageMapper, PageView, RenderContext};
use crate::error::MapError;
use crate::mapping::images::fill_slots;
use crate::mapping::{resolve_selected, EntityLookup, ImageSlot, QueryParams, ResolvedImage};
use crate::models::{find_collection, Facility, PropertyDocument};

pub const FACILITY_MARQUEE: &str = "facility-marquee";
pub const FACILITY_SLIDES: &str = "facility-slides";
pub const FACILITY_NAME: &str = "facility-name";
pub const FACILITY_DESCRIPTION: &str = "facility-description";
pub const FACILITY_USAGE_GUIDE: &str = "facility-usage-guide";
pub const FACILITY_GALLERY: &str = "facility-gallery";

const GALLERY_SLOTS: usize = 4;

fn facility_slides(facility: &Facility) -> Vec<ResolvedImage> {
    let interior = resolve_selected(find_collection(&facility.images, "interior"));
    if !interior.is_empty() {
        return interior;
    }
    resolve_selected(find_collection(&facility.images, "exterior"))
}

pub struct FacilityMapper;

impl PageMapper for FacilityMapper {
    fn kind(&self) -> PageKind {
        PageKind::Facility
    }

    fn project(
        &self,
        document: &PropertyDocument,
        query: &QueryParams,
        _context: &RenderContext,
    ) -> PageView {
        let mut builder = ViewBuilder::new(PageKind::Facility);
        let site_name = document.property.name.as_deref();

        builder.step("marquee", |step| {
            let name = site_name.ok_or_else(|| MapError::missing("property.name"))?;
            step.text(FACILITY_MARQUEE, name);
            Ok(())
        });

        let lookup = EntityLookup::new(document.facilities(), query);
        if let Some(location) = lookup.resolve().redirect() {
            builder.redirect(location);
            return builder.finish();
        }
        let facility = match lookup.resolve().require() {
            Ok(facility) => facility,
            Err(err) => {
                builder.step("facility", |_| Err(err));
                return builder.finish();
            }
        };

        let slides = facility_slides(facility);

        builder
            .step("slides", |step| {
                if slides.is_empty() {
                    step.grid(FACILITY_SLIDES, vec![ImageSlot::Empty]);
                } else {
                    step.slides(FACILITY_SLIDES, &slides);
                }
                Ok(())
            })
            .step("name", |step| {
                step.text_or_placeholder(FACILITY_NAME, facility.name.as_deref(), "시설명");
                Ok(())
            })
            .step("description", |step| {
                step.multiline(
                    FACILITY_DESCRIPTION,
                    facility.description.as_deref(),
                    "시설 설명",
                );
                Ok(())
            })
            .step("usage guide", |step| {
                step.multiline(
                    FACILITY_USAGE_GUIDE,
                    facility.usage_guide.as_deref(),
                    "이용 안내",
                );
                Ok(())
            })
            .step("gallery", |step| {
                let exterior = resolve_selected(find_collection(&facility.images, "exterior"));
                step.grid(FACILITY_GALLERY, fill_slots(&exterior, GALLERY_SLOTS));
                Ok(())
            })
            .step("meta", |step| {
                let source = MetaSource::titled(facility.name.as_deref(), site_name)
                    .description(facility.description.as_deref())
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
    use crate::dom::{DomWrite, MetaKey};
    use crate::pages::fixtures::document;

    fn project(document: &PropertyDocument, query: &str) -> PageView {
        FacilityMapper.project(document, &QueryParams::parse(query), &RenderContext::default())
    }

    #[test]
    fn projects_facility() {
        let view = project(&document(), "id=fac-1");

        assert_eq!(view.text_for(FACILITY_NAME), Some("바베큐장"));
        assert_eq!(
            view.write_for(FACILITY_DESCRIPTION),
            Some(&DomWrite::html(FACILITY_DESCRIPTION, "야외 바베큐<br>우천 시 운영 중단"))
        );
        assert_eq!(view.hooks.sliders, vec![(FACILITY_SLIDES.to_string(), 2)]);
        assert_eq!(view.meta(MetaKey::OgImage), Some("bbq-0.jpg"));
    }

    #[test]
    fn gallery_pads_to_four_slots() {
        let view = project(&document(), "id=fac-1");
        let Some(DomWrite::Gallery { slots, .. }) = view.write_for(FACILITY_GALLERY) else {
            panic!("no gallery");
        };
        assert_eq!(slots.len(), GALLERY_SLOTS);
        assert_eq!(slots[0].image().map(|i| i.url.as_str()), Some("bbq-ext.jpg"));
        assert!(slots[1..].iter().all(|s| *s == ImageSlot::Empty));
    }

    #[test]
    fn not_found_leaves_static_content() {
        let view = project(&document(), "id=pool");
        assert!(view.write_for(FACILITY_NAME).is_none());
        assert_eq!(view.text_for(FACILITY_MARQUEE), Some("스테이 솔밭"));
        assert_eq!(view.failed_steps[0].step, "facility");
    }

    #[test]
    fn no_facilities_and_no_id_renders_nothing_entity_specific() {
        let view = project(&PropertyDocument::default(), "");
        assert!(view.redirect.is_none());
        assert!(view.writes.is_empty());
        assert!(view.failed_steps.is_empty());
    }

    #[test]
    fn missing_id_redirects_to_first_facility() {
        let view = project(&document(), "");
        assert_eq!(view.redirect.as_deref(), Some("facility.html?id=fac-1"));
    }
}
