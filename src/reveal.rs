use std::collections::BTreeMap;

use crate::page::{ElementId, Page, Viewport};

/// Class carried by candidate elements in markup.
pub const REVEAL_CLASS: &str = "scroll-reveal";
/// Class written once a candidate has intersected the viewport.
pub const REVEALED_CLASS: &str = "revealed";

/// Fraction of a candidate's area that must be visible to trigger.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// The viewport's bottom edge is pulled up by this much, so candidates
/// reveal slightly before reaching the true bottom edge.
pub const BOTTOM_MARGIN_PX: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RevealState {
    Unrevealed,
    Revealed, // terminal
}

/// Watches reveal candidates and marks each one exactly once when it
/// first intersects the shrunk viewport. Leaving the viewport afterwards
/// changes nothing.
#[derive(Clone, Debug, Default)]
pub struct RevealObserver {
    states: BTreeMap<ElementId, RevealState>,
}

impl RevealObserver {
    pub fn with_candidates(candidates: impl IntoIterator<Item = ElementId>) -> Self {
        Self {
            states: candidates
                .into_iter()
                .map(|id| (id, RevealState::Unrevealed))
                .collect(),
        }
    }

    pub fn candidate_count(&self) -> usize {
        self.states.len()
    }

    pub fn is_revealed(&self, el: ElementId) -> bool {
        self.states.get(&el) == Some(&RevealState::Revealed)
    }

    /// Checks every unrevealed candidate against the current viewport
    /// and writes the marker onto those that now qualify. Returns the
    /// newly revealed ids.
    pub fn observe(&mut self, page: &mut dyn Page) -> Vec<ElementId> {
        let viewport = page.viewport();
        let mut newly = Vec::new();
        for (&id, state) in self.states.iter_mut() {
            if *state == RevealState::Revealed {
                continue;
            }
            let Some(rect) = page.element_rect(id) else {
                continue;
            };
            if visible_fraction(rect, viewport) >= REVEAL_THRESHOLD {
                *state = RevealState::Revealed;
                newly.push(id);
            }
        }
        for &id in &newly {
            tracing::debug!(element = id.0, "reveal");
            page.mark_revealed(id);
        }
        newly
    }
}

/// Fraction of `rect` inside the viewport after shrinking its bottom
/// edge by [`BOTTOM_MARGIN_PX`]. Zero-area rects count as fully hidden.
fn visible_fraction(rect: kurbo::Rect, viewport: Viewport) -> f64 {
    let area = rect.area();
    if area <= 0.0 {
        return 0.0;
    }
    let vis = viewport.shrunk_doc_rect(BOTTOM_MARGIN_PX);
    let w = (rect.x1.min(vis.x1) - rect.x0.max(vis.x0)).max(0.0);
    let h = (rect.y1.min(vis.y1) - rect.y0.max(vis.y0)).max(0.0);
    (w * h) / area
}
