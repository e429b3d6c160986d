use crate::{
    anchor::{self, ClickOutcome},
    ease::Ease,
    effect::EffectConfig,
    page::{ElementId, Page},
    reveal::RevealObserver,
    sched::FrameScheduler,
    tween::ScrollTween,
};

/// Frames an anchor smooth-scroll takes to reach its target.
pub const SMOOTH_SCROLL_FRAMES: u32 = 30;

/// One element discovered at startup, with its parsed configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegisteredElement {
    pub id: ElementId,
    pub config: EffectConfig,
}

/// Scroll-driven effect controller.
///
/// Owns the sampled scroll offset, the single ticking flag, and the
/// element set registered at construction. All state is instance-local;
/// listeners hold the controller, never globals.
///
/// The event contract mirrors a browser main thread: `on_scroll` may
/// fire any number of times between frames but requests at most one
/// frame callback; `frame_pass` applies every effect from one offset
/// snapshot and then re-arms scheduling.
pub struct ScrollController<S: FrameScheduler> {
    scroll_y: f64,
    ticking: bool,
    elements: Vec<RegisteredElement>,
    reveal: RevealObserver,
    tween: Option<ScrollTween>,
    sched: S,
}

impl<S: FrameScheduler> ScrollController<S> {
    /// Scans the page once, parses each marked element's attributes into
    /// a typed config, and runs the initial pass. Elements added to the
    /// document afterwards are never registered.
    #[tracing::instrument(skip_all)]
    pub fn new(page: &mut dyn Page, sched: S) -> Self {
        let elements = page
            .effect_elements()
            .into_iter()
            .map(|(id, attrs)| RegisteredElement {
                id,
                config: EffectConfig::from_attrs(&attrs),
            })
            .collect::<Vec<_>>();
        tracing::debug!(
            effects = elements.len(),
            candidates = page.reveal_candidates().len(),
            "registered page"
        );

        let reveal = RevealObserver::with_candidates(page.reveal_candidates());
        let mut controller = Self {
            scroll_y: page.viewport().scroll_y,
            ticking: false,
            elements,
            reveal,
            tween: None,
            sched,
        };
        controller.frame_pass(page);
        controller
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    pub fn elements(&self) -> &[RegisteredElement] {
        &self.elements
    }

    pub fn reveal(&self) -> &RevealObserver {
        &self.reveal
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.sched
    }

    /// Scroll notification from the host. Records the offset and asks
    /// for one frame callback; further notifications before that frame
    /// only update the offset. A user scroll interrupts any active
    /// anchor tween.
    pub fn on_scroll(&mut self, y: f64) {
        self.scroll_y = y;
        self.tween = None;
        self.schedule();
    }

    /// Click notification for a link. Same-document fragments with a
    /// resolvable target start (or redirect) the smooth-scroll tween;
    /// the returned outcome tells the host whether to suppress default
    /// navigation.
    pub fn on_anchor_click(&mut self, page: &dyn Page, href: &str) -> ClickOutcome {
        let outcome = anchor::resolve_click(page, href);
        if let ClickOutcome::SmoothScroll { top, .. } = outcome {
            match &mut self.tween {
                Some(tw) if !tw.is_done() => tw.retarget(top),
                _ => {
                    self.tween = Some(ScrollTween::new(
                        self.scroll_y,
                        top,
                        SMOOTH_SCROLL_FRAMES,
                        Ease::InOutCubic,
                    ));
                }
            }
            self.schedule();
        }
        outcome
    }

    /// One frame pass: advance the tween if any, write every registered
    /// element's style from a single offset snapshot, run the reveal
    /// check, then clear the ticking flag. Re-applying with an unchanged
    /// offset writes identical values.
    #[tracing::instrument(skip_all)]
    pub fn frame_pass(&mut self, page: &mut dyn Page) {
        if let Some(tween) = &mut self.tween {
            let y = tween.step();
            page.set_scroll_y(y);
            self.scroll_y = page.viewport().scroll_y;
            if tween.is_done() {
                self.tween = None;
            }
        }

        let scroll_y = self.scroll_y;
        for el in &self.elements {
            if let Some(style) = el.config.style_at(scroll_y) {
                tracing::trace!(element = el.id.0, %style, "apply");
                page.apply_style(el.id, style);
            }
        }

        self.reveal.observe(page);

        self.ticking = false;
        if self.tween.is_some() {
            self.schedule();
        }
    }

    fn schedule(&mut self) {
        if !self.ticking {
            self.sched.request_frame();
            self.ticking = true;
        }
    }
}
