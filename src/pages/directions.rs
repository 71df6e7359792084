//! Directions page (`directions.html`): address, contact and the map.

use super::view::{meta_step, require, MetaSource, ViewBuilder};
use super::{PageKind, PageMapper, PageView, RenderContext};
use crate::error::MapError;
use crate::mapping::{first_or_placeholder, QueryParams};
use crate::models::PropertyDocument;

pub const DIRECTIONS_HERO_IMAGE: &str = "directions-hero-image";
pub const DIRECTIONS_PROPERTY_NAME: &str = "directions-property-name";
pub const DIRECTIONS_ADDRESS: &str = "directions-address";
pub const DIRECTIONS_PHONE: &str = "directions-phone";
pub const DIRECTIONS_GUIDE: &str = "directions-guide";

const PAGE: &str = "directions";

pub struct DirectionsMapper;

impl PageMapper for DirectionsMapper {
    fn kind(&self) -> PageKind {
        PageKind::Directions
    }

    fn project(
        &self,
        document: &PropertyDocument,
        _query: &QueryParams,
        _context: &RenderContext,
    ) -> PageView {
        let mut builder = ViewBuilder::new(PageKind::Directions);
        let property = &document.property;
        let address = property.full_address();

        builder
            .step("hero", |step| {
                let hero = require(document.custom_section(PAGE, "hero"), "directions.hero")?;
                step.image(DIRECTIONS_HERO_IMAGE, first_or_placeholder(hero.get("images")));
                Ok(())
            })
            .step("identity", |step| {
                step.text_or_placeholder(DIRECTIONS_PROPERTY_NAME, property.name.as_deref(), "숙소명");
                step.text_or_placeholder(DIRECTIONS_ADDRESS, address.as_deref(), "주소");
                step.text_or_placeholder(DIRECTIONS_PHONE, property.phone.as_deref(), "연락처");
                Ok(())
            })
            .step("guide", |step| {
                step.multiline(DIRECTIONS_GUIDE, property.directions.as_deref(), "오시는 길 안내");
                Ok(())
            })
            .step("map", |step| {
                let (latitude, longitude) = property
                    .coordinates()
                    .ok_or_else(|| MapError::missing("property.latitude/longitude"))?;
                step.map_center(latitude, longitude);
                Ok(())
            })
            .step("meta", |step| {
                let source = MetaSource::titled(Some("오시는 길"), property.name.as_deref())
                    .description(address.as_deref());
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
    use crate::mapping::ImageSlot;
    use crate::pages::fixtures::document;

    fn project(document: &PropertyDocument) -> PageView {
        DirectionsMapper.project(document, &QueryParams::default(), &RenderContext::default())
    }

    #[test]
    fn projects_location_and_requests_map() {
        let view = project(&document());

        assert_eq!(view.text_for(DIRECTIONS_ADDRESS), Some("강원도 강릉시 솔밭길 12 별관"));
        assert_eq!(view.text_for(DIRECTIONS_PHONE), Some("033-123-4567"));
        assert_eq!(view.hooks.map_center, Some((37.7519, 128.8761)));
        assert_eq!(
            view.write_for(DIRECTIONS_HERO_IMAGE),
            Some(&DomWrite::image(DIRECTIONS_HERO_IMAGE, ImageSlot::Empty))
        );
        assert_eq!(view.meta(MetaKey::Title), Some("오시는 길 | 스테이 솔밭"));
    }

    #[test]
    fn no_coordinates_no_map() {
        let view = project(&PropertyDocument::default());
        assert!(view.hooks.map_center.is_none());
        assert_eq!(view.text_for(DIRECTIONS_ADDRESS), Some("[주소]"));
    }
}
