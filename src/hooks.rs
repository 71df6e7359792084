//! External widgets notified once a page has been mapped.
//!
//! Each widget owns its state; the session hands it the requests a
//! [`PageView`](crate::pages::PageView) carries instead of the widget
//! discovering them through globals.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, trace};

/// Slideshow/carousel exposing an explicit re-initialisation entry point.
pub trait SliderWidget {
    fn reinitialize(&mut self, target: &str, slide_count: usize);
}

/// Scroll-linked fade-in registrar.
pub trait FadeInRegistrar {
    fn setup(&mut self);
}

/// Interactive map initialised with the property location.
pub trait MapWidget {
    fn initialize(&mut self, latitude: f64, longitude: f64);
}

/// What a mapped page asks of its widgets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookRequests {
    /// Slider targets with their slide counts.
    pub sliders: Vec<(String, usize)>,
    pub fade_in: bool,
    pub map_center: Option<(f64, f64)>,
}

impl HookRequests {
    pub fn is_empty(&self) -> bool {
        self.sliders.is_empty() && !self.fade_in && self.map_center.is_none()
    }
}

/// Optional widgets; absent ones are skipped.
#[derive(Default)]
pub struct Hooks {
    pub slider: Option<Box<dyn SliderWidget>>,
    pub fade_in: Option<Box<dyn FadeInRegistrar>>,
    pub map: Option<Box<dyn MapWidget>>,
}

impl Hooks {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_slider(mut self, slider: impl SliderWidget + 'static) -> Self {
        self.slider = Some(Box::new(slider));
        self
    }

    pub fn with_fade_in(mut self, fade_in: impl FadeInRegistrar + 'static) -> Self {
        self.fade_in = Some(Box::new(fade_in));
        self
    }

    pub fn with_map(mut self, map: impl MapWidget + 'static) -> Self {
        self.map = Some(Box::new(map));
        self
    }

    /// Deliver post-render requests to whichever widgets are present.
    pub fn after_render(&mut self, requests: &HookRequests) {
        match self.slider.as_mut() {
            Some(slider) => {
                for (target, count) in &requests.sliders {
                    slider.reinitialize(target, *count);
                }
            }
            None if !requests.sliders.is_empty() => trace!("No slider widget, skipping re-init"),
            None => {}
        }

        if requests.fade_in {
            match self.fade_in.as_mut() {
                Some(fade_in) => fade_in.setup(),
                None => trace!("No fade-in registrar, skipping setup"),
            }
        }

        if let Some((latitude, longitude)) = requests.map_center {
            match self.map.as_mut() {
                Some(map) => map.initialize(latitude, longitude),
                None => trace!("No map widget, skipping initialisation"),
            }
        }
    }
}

/// Position and size of one slider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderState {
    pub position: usize,
    pub slide_count: usize,
}

impl SliderState {
    pub fn advance(&mut self) {
        if self.slide_count > 0 {
            self.position = (self.position + 1) % self.slide_count;
        }
    }
}

/// Carousel keeping one explicit [`SliderState`] per slider target.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    states: BTreeMap<String, SliderState>,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, target: &str) -> Option<SliderState> {
        self.states.get(target).copied()
    }

    pub fn advance(&mut self, target: &str) {
        if let Some(state) = self.states.get_mut(target) {
            state.advance();
        }
    }
}

impl SliderWidget for Carousel {
    fn reinitialize(&mut self, target: &str, slide_count: usize) {
        debug!("Re-initialising slider '{}' with {} slides", target, slide_count);
        self.states.insert(
            target.to_string(),
            SliderState {
                position: 0,
                slide_count,
            },
        );
    }
}
