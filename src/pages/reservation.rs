//! Reservation information page (`reservation.html`).

use serde_json::Value;

use super::view::{meta_step, require, MetaSource, ViewBuilder};
use super::{PageKind, PageMapper, PageView, RenderContext};
use crate::dom::Card;
use crate::error::MapError;
use crate::mapping::accessor::get_str;
use crate::mapping::{first_or_placeholder, QueryParams};
use crate::models::PropertyDocument;

pub const RESERVATION_HERO_IMAGE: &str = "reservation-hero-image";
pub const RESERVATION_HERO_TITLE: &str = "reservation-hero-title";
pub const RESERVATION_CHECK_IN: &str = "reservation-check-in";
pub const RESERVATION_CHECK_OUT: &str = "reservation-check-out";
pub const RESERVATION_USAGE_GUIDE: &str = "reservation-usage-guide";
pub const RESERVATION_REFUND_POLICIES: &str = "reservation-refund-policies";
pub const RESERVATION_PHONE: &str = "reservation-phone";

const PAGE: &str = "reservation";

/// One line of the refund table.
///
/// Entries are plain strings, `{ description }`, or `{ daysBefore, refundRate }`.
pub fn refund_policy_text(policy: &Value) -> Option<String> {
    if let Some(text) = policy.as_str().filter(|t| !t.trim().is_empty()) {
        return Some(text.to_string());
    }
    if let Some(text) = get_str(policy, "description") {
        return Some(text.to_string());
    }
    let days = policy.get("daysBefore").and_then(Value::as_u64)?;
    let rate = policy.get("refundRate").and_then(Value::as_u64)?;
    let when = if days == 0 {
        "이용 당일".to_string()
    } else {
        format!("이용 {days}일 전")
    };
    if rate == 0 {
        Some(format!("{when} 취소: 환불 불가"))
    } else {
        Some(format!("{when} 취소: {rate}% 환불"))
    }
}

pub struct ReservationMapper;

impl PageMapper for ReservationMapper {
    fn kind(&self) -> PageKind {
        PageKind::Reservation
    }

    fn project(
        &self,
        document: &PropertyDocument,
        _query: &QueryParams,
        _context: &RenderContext,
    ) -> PageView {
        let mut builder = ViewBuilder::new(PageKind::Reservation);
        let property = &document.property;
        let hero = document.custom_section(PAGE, "hero");
        let hero_image = first_or_placeholder(hero.and_then(|h| h.get("images")));

        builder
            .step("hero", |step| {
                let hero = require(hero, "reservation.hero")?;
                step.image(RESERVATION_HERO_IMAGE, hero_image.clone());
                step.text_or_placeholder(
                    RESERVATION_HERO_TITLE,
                    get_str(hero, "title"),
                    "예약 안내 타이틀",
                );
                Ok(())
            })
            .step("check-in/out", |step| {
                step.text_or_placeholder(
                    RESERVATION_CHECK_IN,
                    property.check_in_time.as_deref(),
                    "체크인 시간",
                );
                step.text_or_placeholder(
                    RESERVATION_CHECK_OUT,
                    property.check_out_time.as_deref(),
                    "체크아웃 시간",
                );
                Ok(())
            })
            .step("usage guide", |step| {
                step.multiline(
                    RESERVATION_USAGE_GUIDE,
                    property.usage_guide.as_deref(),
                    "이용 안내",
                );
                Ok(())
            })
            .step("refund policies", |step| {
                let lines: Vec<Card> = property
                    .refund_policies
                    .iter()
                    .filter_map(refund_policy_text)
                    .map(Card::titled)
                    .collect();
                if lines.is_empty() {
                    return Err(MapError::missing("property.refundPolicies"));
                }
                step.items(RESERVATION_REFUND_POLICIES, lines);
                Ok(())
            })
            .step("contact", |step| {
                step.text_or_placeholder(RESERVATION_PHONE, property.phone.as_deref(), "연락처");
                Ok(())
            })
            .step("meta", |step| {
                let title = hero.and_then(|h| get_str(h, "title")).unwrap_or("예약 안내");
                let source = MetaSource::titled(Some(title), property.name.as_deref())
                    .description(property.usage_guide.as_deref())
                    .image(hero_image.image());
                meta_step(step, &source)
            })
            .fade_in();

        builder.finish()
    }
}
