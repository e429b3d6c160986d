use std::collections::BTreeMap;

use crate::{
    effect::StyleValue,
    error::{ScrollFxError, ScrollFxResult},
    page::{ElementId, Page, RawEffectAttrs, Viewport},
    reveal::{REVEAL_CLASS, REVEALED_CLASS},
};

/// One element of an in-memory document.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PageElement {
    /// Markup id; anchor fragments resolve against it. Empty = anonymous.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub classes: Vec<String>,
    /// Present iff the element carries the effect marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<RawEffectAttrs>,
    /// Document-space bounding rectangle.
    pub rect: kurbo::Rect,
}

/// Styles written onto one element so far. Transform and opacity are
/// separate channels, mirroring how a real document styles them.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AppliedStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<StyleValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

/// In-memory [`Page`] used by tests and the simulator binary. Element
/// ids are indices into `elements`; applied styles are recorded so
/// callers can assert on (or dump) the resulting page state.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MemoryPage {
    pub viewport: Viewport,
    pub elements: Vec<PageElement>,
    #[serde(default)]
    pub applied: BTreeMap<ElementId, AppliedStyle>,
}

impl MemoryPage {
    pub fn new(viewport: Viewport, elements: Vec<PageElement>) -> Self {
        Self {
            viewport,
            elements,
            applied: BTreeMap::new(),
        }
    }

    pub fn validate(&self) -> ScrollFxResult<()> {
        self.viewport.validate()?;

        let mut names: Vec<&str> = self
            .elements
            .iter()
            .map(|e| e.name.as_str())
            .filter(|n| !n.is_empty())
            .collect();
        names.sort_unstable();
        if names.windows(2).any(|w| w[0] == w[1]) {
            return Err(ScrollFxError::validation("element names must be unique"));
        }

        for (i, el) in self.elements.iter().enumerate() {
            let r = el.rect;
            let finite =
                r.x0.is_finite() && r.y0.is_finite() && r.x1.is_finite() && r.y1.is_finite();
            if !finite || r.x1 < r.x0 || r.y1 < r.y0 {
                return Err(ScrollFxError::validation(format!(
                    "element {i} has a degenerate rect"
                )));
            }
        }

        Ok(())
    }

    pub fn applied_style(&self, el: ElementId) -> Option<&AppliedStyle> {
        self.applied.get(&el)
    }

    pub fn is_revealed(&self, el: ElementId) -> bool {
        self.elements
            .get(el.0 as usize)
            .is_some_and(|e| e.classes.iter().any(|c| c == REVEALED_CLASS))
    }
}

impl Page for MemoryPage {
    fn effect_elements(&self) -> Vec<(ElementId, RawEffectAttrs)> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(i, e)| {
                e.effect
                    .as_ref()
                    .map(|attrs| (ElementId(i as u32), attrs.clone()))
            })
            .collect()
    }

    fn reveal_candidates(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.classes.iter().any(|c| c == REVEAL_CLASS))
            .map(|(i, _)| ElementId(i as u32))
            .collect()
    }

    fn element_rect(&self, el: ElementId) -> Option<kurbo::Rect> {
        self.elements.get(el.0 as usize).map(|e| e.rect)
    }

    fn apply_style(&mut self, el: ElementId, style: StyleValue) {
        if self.elements.get(el.0 as usize).is_none() {
            return;
        }
        let slot = self.applied.entry(el).or_default();
        match style {
            StyleValue::Opacity(v) => slot.opacity = Some(v),
            other => slot.transform = Some(other),
        }
    }

    fn resolve_fragment(&self, fragment: &str) -> Option<ElementId> {
        if fragment.is_empty() {
            return None;
        }
        self.elements
            .iter()
            .position(|e| e.name == fragment)
            .map(|i| ElementId(i as u32))
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_scroll_y(&mut self, y: f64) {
        self.viewport.scroll_y = y.max(0.0);
    }

    fn mark_revealed(&mut self, el: ElementId) {
        if let Some(e) = self.elements.get_mut(el.0 as usize)
            && !e.classes.iter().any(|c| c == REVEALED_CLASS)
        {
            e.classes.push(REVEALED_CLASS.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(name: &str, rect: kurbo::Rect) -> PageElement {
        PageElement {
            name: name.to_string(),
            classes: vec![],
            effect: None,
            rect,
        }
    }

    fn page() -> MemoryPage {
        let vp = Viewport::new(800.0, 600.0).unwrap();
        MemoryPage::new(
            vp,
            vec![
                PageElement {
                    effect: Some(RawEffectAttrs {
                        speed: Some("0.5".to_string()),
                        ..RawEffectAttrs::default()
                    }),
                    ..plain("hero", kurbo::Rect::new(0.0, 0.0, 800.0, 400.0))
                },
                plain("section2", kurbo::Rect::new(0.0, 900.0, 800.0, 1300.0)),
            ],
        )
    }

    #[test]
    fn discovery_returns_only_marked_elements() {
        let p = page();
        let found = p.effect_elements();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, ElementId(0));
    }

    #[test]
    fn styles_land_on_separate_channels() {
        let mut p = page();
        p.apply_style(ElementId(0), StyleValue::TranslateY(-50.0));
        p.apply_style(ElementId(0), StyleValue::Opacity(0.5));
        let s = p.applied_style(ElementId(0)).unwrap();
        assert_eq!(s.transform, Some(StyleValue::TranslateY(-50.0)));
        assert_eq!(s.opacity, Some(0.5));
    }

    #[test]
    fn fragment_resolution() {
        let p = page();
        assert_eq!(p.resolve_fragment("section2"), Some(ElementId(1)));
        assert_eq!(p.resolve_fragment("missing"), None);
        assert_eq!(p.resolve_fragment(""), None);
    }

    #[test]
    fn revealed_marker_is_idempotent() {
        let mut p = page();
        p.mark_revealed(ElementId(1));
        p.mark_revealed(ElementId(1));
        let count = p.elements[1]
            .classes
            .iter()
            .filter(|c| c.as_str() == REVEALED_CLASS)
            .count();
        assert_eq!(count, 1);
        assert!(p.is_revealed(ElementId(1)));
    }

    #[test]
    fn validate_rejects_duplicate_names() {
        let mut p = page();
        p.elements[1].name = "hero".to_string();
        assert!(p.validate().is_err());
    }

    #[test]
    fn scroll_is_clamped_at_top() {
        let mut p = page();
        p.set_scroll_y(-10.0);
        assert_eq!(p.viewport().scroll_y, 0.0);
    }
}
