//! Shared header and footer fragments.

use std::collections::BTreeSet;

use chrono::Datelike;

use super::view::ViewBuilder;
use super::{PageKind, PageMapper, PageView, RenderContext};
use crate::dom::{Card, DomWrite};
use crate::error::MapError;
use crate::mapping::lookup::{in_display_order, Entity};
use crate::mapping::{resolve_selected, sanitize_text, ImageSlot, QueryParams};
use crate::models::{find_collection, PropertyDocument};

pub const HEADER_PROPERTY_NAME: &str = "header-property-name";
pub const HEADER_LOGO: &str = "header-logo";
pub const HEADER_ROOM_LINKS: &str = "header-room-links";
pub const HEADER_FACILITY_LINKS: &str = "header-facility-links";

pub const FOOTER_PROPERTY_NAME: &str = "footer-property-name";
pub const FOOTER_ADDRESS: &str = "footer-address";
pub const FOOTER_PHONE: &str = "footer-phone";
pub const FOOTER_EMAIL: &str = "footer-email";
pub const FOOTER_COMPANY_NAME: &str = "footer-company-name";
pub const FOOTER_REPRESENTATIVE: &str = "footer-representative";
pub const FOOTER_BUSINESS_NUMBER: &str = "footer-business-number";
pub const FOOTER_TELECOM_NUMBER: &str = "footer-telecom-number";
pub const FOOTER_COPYRIGHT: &str = "footer-copyright";

/// Channels the footer template has an icon for.
pub const SOCIAL_CHANNELS: [&str; 4] = ["instagram", "facebook", "blog", "youtube"];

pub fn social_target(channel: &str) -> String {
    format!("footer-social-{channel}")
}

/// Which fragments have been spliced into the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParts {
    pub header: bool,
    pub footer: bool,
}

impl LayoutParts {
    pub const BOTH: Self = Self {
        header: true,
        footer: true,
    };

    pub fn any(self) -> bool {
        self.header || self.footer
    }
}

fn nav_links<T, F>(entities: &[T], name: F, label: &str) -> Vec<Card>
where
    T: Entity,
    F: Fn(&T) -> Option<&str>,
{
    in_display_order(entities)
        .into_iter()
        .map(|entity| {
            Card::titled(sanitize_text(name(entity), label)).href(T::canonical_path(entity.id()))
        })
        .collect()
}

pub struct LayoutMapper {
    parts: LayoutParts,
}

impl LayoutMapper {
    pub fn new(parts: LayoutParts) -> Self {
        Self { parts }
    }

    fn header(&self, builder: &mut ViewBuilder, document: &PropertyDocument) {
        let property = &document.property;
        builder
            .step("header name", |step| {
                step.text_or_placeholder(HEADER_PROPERTY_NAME, property.name.as_deref(), "숙소명");
                Ok(())
            })
            .step("header logo", |step| {
                let logo = resolve_selected(find_collection(&property.images, "logo"))
                    .into_iter()
                    .next()
                    .ok_or_else(|| MapError::missing("property.images.logo"))?;
                step.image(HEADER_LOGO, ImageSlot::Image(logo));
                Ok(())
            })
            .step("header room links", |step| {
                if document.rooms.is_empty() {
                    return Err(MapError::missing("rooms"));
                }
                let links = nav_links(&document.rooms, |room| room.name.as_deref(), "객실명");
                step.items(HEADER_ROOM_LINKS, links);
                Ok(())
            })
            .step("header facility links", |step| {
                if document.facilities().is_empty() {
                    return Err(MapError::missing("property.facilities"));
                }
                let links = nav_links(
                    document.facilities(),
                    |facility| facility.name.as_deref(),
                    "시설명",
                );
                step.items(HEADER_FACILITY_LINKS, links);
                Ok(())
            });
    }

    fn footer(&self, builder: &mut ViewBuilder, document: &PropertyDocument, context: &RenderContext) {
        let property = &document.property;
        let business = &property.business_info;
        builder
            .step("footer identity", |step| {
                step.text_or_placeholder(FOOTER_PROPERTY_NAME, property.name.as_deref(), "숙소명");
                step.text_or_placeholder(FOOTER_ADDRESS, property.full_address().as_deref(), "주소");
                step.text_or_placeholder(FOOTER_PHONE, property.phone.as_deref(), "연락처");
                step.text_or_placeholder(FOOTER_EMAIL, property.email.as_deref(), "이메일");
                Ok(())
            })
            .step("footer business", |step| {
                step.text_or_placeholder(
                    FOOTER_COMPANY_NAME,
                    business.company_name.as_deref(),
                    "상호명",
                );
                step.text_or_placeholder(
                    FOOTER_REPRESENTATIVE,
                    business.representative.as_deref(),
                    "대표자명",
                );
                step.text_or_placeholder(
                    FOOTER_BUSINESS_NUMBER,
                    business.registration_number.as_deref(),
                    "사업자등록번호",
                );
                step.text_or_placeholder(
                    FOOTER_TELECOM_NUMBER,
                    business.telecom_sales_number.as_deref(),
                    "통신판매업신고번호",
                );
                Ok(())
            })
            .step("footer copyright", |step| {
                let holder = business
                    .company_name
                    .as_deref()
                    .or(property.name.as_deref())
                    .filter(|h| !h.trim().is_empty())
                    .ok_or_else(|| MapError::missing("property.name"))?;
                let year = context.rendered_at.year();
                step.text(FOOTER_COPYRIGHT, format!("© {year} {holder}. All rights reserved."));
                Ok(())
            })
            .step("footer social", |step| {
                let links = &document.homepage.social_links;
                let channels: BTreeSet<&str> = SOCIAL_CHANNELS
                    .iter()
                    .copied()
                    .chain(links.keys().map(String::as_str))
                    .collect();
                for channel in channels {
                    let target = social_target(channel);
                    match links.get(channel).filter(|url| !url.trim().is_empty()) {
                        Some(url) => {
                            step.write(DomWrite::attr(&target, "href", url.clone()));
                            step.visibility(&target, true);
                        }
                        None => step.visibility(&target, false),
                    }
                }
                Ok(())
            });
    }
}

impl PageMapper for LayoutMapper {
    fn kind(&self) -> PageKind {
        PageKind::Layout
    }

    fn project(
        &self,
        document: &PropertyDocument,
        _query: &QueryParams,
        context: &RenderContext,
    ) -> PageView {
        let mut builder = ViewBuilder::new(PageKind::Layout);
        if self.parts.header {
            self.header(&mut builder, document);
        }
        if self.parts.footer {
            self.footer(&mut builder, document, context);
        }
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::ResolvedImage;
    use crate::pages::fixtures::document;
    use chrono::{TimeZone, Utc};

    fn project(parts: LayoutParts) -> PageView {
        let context = RenderContext::at(Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap());
        LayoutMapper::new(parts).project(&document(), &QueryParams::default(), &context)
    }

    #[test]
    fn header_links_and_logo() {
        let view = project(LayoutParts::BOTH);

        assert_eq!(view.text_for(HEADER_PROPERTY_NAME), Some("스테이 솔밭"));
        assert_eq!(
            view.write_for(HEADER_LOGO),
            Some(&DomWrite::image(
                HEADER_LOGO,
                ImageSlot::Image(ResolvedImage::new("logo.png", ""))
            ))
        );
        let Some(DomWrite::Items { items, .. }) = view.write_for(HEADER_FACILITY_LINKS) else {
            panic!("no facility links");
        };
        assert_eq!(items[0].title, "바베큐장");
        assert_eq!(items[0].href.as_deref(), Some("facility.html?id=fac-1"));
    }

    #[test]
    fn footer_business_and_copyright() {
        let view = project(LayoutParts::BOTH);

        assert_eq!(view.text_for(FOOTER_BUSINESS_NUMBER), Some("123-45-67890"));
        assert_eq!(view.text_for(FOOTER_REPRESENTATIVE), Some("김솔"));
        assert_eq!(
            view.text_for(FOOTER_COPYRIGHT),
            Some("© 2026 솔밭컴퍼니. All rights reserved.")
        );
    }

    #[test]
    fn social_links_shown_or_hidden() {
        let view = project(LayoutParts::BOTH);

        assert_eq!(
            view.write_for(&social_target("instagram")),
            Some(&DomWrite::visibility(&social_target("instagram"), true))
        );
        assert!(view.writes.contains(&DomWrite::attr(
            &social_target("instagram"),
            "href",
            "https://instagram.com/solbat"
        )));
        assert_eq!(
            view.write_for(&social_target("youtube")),
            Some(&DomWrite::visibility(&social_target("youtube"), false))
        );

        let document = PropertyDocument::from_value(serde_json::json!({
            "homepage": { "socialLinks": {
                "blog": "   ",
                "kakao": "https://pf.kakao.com/solbat"
            }}
        }))
        .unwrap();
        let view = LayoutMapper::new(LayoutParts::BOTH).project(
            &document,
            &QueryParams::default(),
            &RenderContext::default(),
        );
        assert_eq!(
            view.write_for(&social_target("blog")),
            Some(&DomWrite::visibility(&social_target("blog"), false))
        );
        assert!(!view
            .writes
            .iter()
            .any(|w| matches!(w, DomWrite::Attr { target, .. } if *target == social_target("blog"))));
        assert_eq!(
            view.write_for(&social_target("kakao")),
            Some(&DomWrite::visibility(&social_target("kakao"), true))
        );
        assert!(view.writes.contains(&DomWrite::attr(
            &social_target("kakao"),
            "href",
            "https://pf.kakao.com/solbat"
        )));
    }

    #[test]
    fn only_spliced_parts_are_mapped() {
        let view = project(LayoutParts {
            header: false,
            footer: true,
        });
        assert!(view.write_for(HEADER_PROPERTY_NAME).is_none());
        assert!(view.write_for(FOOTER_PHONE).is_some());
        assert!(!LayoutParts {
            header: false,
            footer: false
        }
        .any());
    }
}
