//! Preloader overlay
//!
//! Fades out on page load or after a fallback delay, whichever comes first,
//! then is detached once the fade has run.

use std::time::Duration;

use crate::traits::Dom;
use crate::types::{Effect, TimerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreloaderPhase {
    #[default]
    Visible,
    Fading,
    Removed,
}

#[derive(Debug, Clone)]
pub struct Preloader<E> {
    overlay: E,
    fade_class: String,
    fallback: Duration,
    fade: Duration,
    phase: PreloaderPhase,
}

impl<E: Clone> Preloader<E> {
    pub fn new(overlay: E, fade_class: impl Into<String>, fallback: Duration, fade: Duration) -> Self {
        Self {
            overlay,
            fade_class: fade_class.into(),
            fallback,
            fade,
            phase: PreloaderPhase::Visible,
        }
    }

    pub fn phase(&self) -> PreloaderPhase {
        self.phase
    }

    /// Arm the fallback timer.
    pub fn start(&self) -> Vec<Effect> {
        vec![Effect::StartTimer {
            timer: TimerId::PreloaderFallback,
            after: self.fallback,
        }]
    }

    /// Page finished loading.
    pub fn on_load<D: Dom<Element = E>>(&mut self, dom: &mut D) -> Vec<Effect> {
        self.begin_fade(dom, "load")
    }

    pub fn on_timer<D: Dom<Element = E>>(&mut self, dom: &mut D, timer: &TimerId) -> Vec<Effect> {
        match timer {
            TimerId::PreloaderFallback => self.begin_fade(dom, "fallback timer"),
            TimerId::PreloaderRemove if self.phase == PreloaderPhase::Fading => {
                dom.remove(&self.overlay);
                self.phase = PreloaderPhase::Removed;
                log::debug!("[preloader] removed");
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn begin_fade<D: Dom<Element = E>>(&mut self, dom: &mut D, cause: &str) -> Vec<Effect> {
        if self.phase != PreloaderPhase::Visible {
            return Vec::new();
        }
        dom.add_class(&self.overlay, &self.fade_class);
        self.phase = PreloaderPhase::Fading;
        log::debug!("[preloader] fading out ({cause})");
        vec![Effect::StartTimer {
            timer: TimerId::PreloaderRemove,
            after: self.fade,
        }]
    }
}
