use crate::{
    effect::StyleValue,
    error::{ScrollFxError, ScrollFxResult},
};

/// Stable handle to an element in the hosting document.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u32);

/// Raw effect attributes as scanned from markup, before typed parsing.
/// Presence of this record on an element is the effect marker itself.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawEffectAttrs {
    pub speed: Option<String>,
    pub direction: Option<String>,
    pub offset: Option<String>,
}

/// Current viewport: vertical scroll offset plus visible size.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> ScrollFxResult<Self> {
        let v = Self {
            scroll_y: 0.0,
            width,
            height,
        };
        v.validate()?;
        Ok(v)
    }

    pub fn validate(&self) -> ScrollFxResult<()> {
        if !(self.width.is_finite() && self.height.is_finite() && self.scroll_y.is_finite()) {
            return Err(ScrollFxError::validation("viewport must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ScrollFxError::validation("viewport size must be > 0"));
        }
        Ok(())
    }

    /// Document-space rectangle currently visible.
    pub fn doc_rect(self) -> kurbo::Rect {
        kurbo::Rect::new(0.0, self.scroll_y, self.width, self.scroll_y + self.height)
    }

    /// Visible rectangle with the bottom edge pulled up by `margin_px`.
    /// The reveal observer uses this to trigger slightly before an
    /// element reaches the true bottom edge.
    pub fn shrunk_doc_rect(self, margin_px: f64) -> kurbo::Rect {
        let r = self.doc_rect();
        kurbo::Rect::new(r.x0, r.y0, r.x1, (r.y1 - margin_px).max(r.y0))
    }
}

/// Seam to the hosting document. The real document and its rendering
/// APIs are external collaborators; tests and the simulator binary use
/// [`crate::MemoryPage`].
pub trait Page {
    /// Elements carrying the effect marker, with their raw attributes.
    /// Scanned once at controller construction; elements added to the
    /// document later are never picked up.
    fn effect_elements(&self) -> Vec<(ElementId, RawEffectAttrs)>;

    /// Elements carrying the reveal-candidate marker.
    fn reveal_candidates(&self) -> Vec<ElementId>;

    /// Document-space bounding rectangle of an element.
    fn element_rect(&self, el: ElementId) -> Option<kurbo::Rect>;

    /// Writes one computed style value onto an element.
    fn apply_style(&mut self, el: ElementId, style: StyleValue);

    /// Resolves a fragment identifier (without the leading `#`) to the
    /// element it names, if any.
    fn resolve_fragment(&self, fragment: &str) -> Option<ElementId>;

    fn viewport(&self) -> Viewport;

    /// Moves the viewport to a vertical offset. Called once per frame by
    /// an active scroll tween; never animated by the page itself.
    fn set_scroll_y(&mut self, y: f64);

    /// Adds the persistent revealed marker to an element. Idempotent.
    fn mark_revealed(&mut self, el: ElementId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_rejects_degenerate_sizes() {
        assert!(Viewport::new(0.0, 600.0).is_err());
        assert!(Viewport::new(800.0, -1.0).is_err());
        assert!(Viewport::new(800.0, f64::NAN).is_err());
        assert!(Viewport::new(800.0, 600.0).is_ok());
    }

    #[test]
    fn doc_rect_tracks_scroll() {
        let mut v = Viewport::new(800.0, 600.0).unwrap();
        v.scroll_y = 250.0;
        assert_eq!(v.doc_rect(), kurbo::Rect::new(0.0, 250.0, 800.0, 850.0));
    }

    #[test]
    fn shrunk_rect_never_inverts() {
        let v = Viewport::new(800.0, 40.0).unwrap();
        let r = v.shrunk_doc_rect(50.0);
        assert_eq!(r.y1, r.y0);
    }
}
