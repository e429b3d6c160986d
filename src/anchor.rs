use crate::page::{ElementId, Page};

/// Result of intercepting a click on a link.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClickOutcome {
    /// Default navigation proceeds: bare `#`, a non-fragment href, or a
    /// fragment with no matching element.
    Default,
    /// Default suppressed; the viewport animates toward the target's
    /// top edge.
    SmoothScroll { target: ElementId, top: f64 },
}

impl ClickOutcome {
    /// Whether the handler suppresses the platform's default navigation.
    pub fn prevents_default(&self) -> bool {
        matches!(self, Self::SmoothScroll { .. })
    }
}

/// Classifies a click on a link. Only same-document fragment hrefs with
/// a resolvable target get special handling; everything else is left to
/// the platform.
pub fn resolve_click(page: &dyn Page, href: &str) -> ClickOutcome {
    let Some(fragment) = href.strip_prefix('#') else {
        return ClickOutcome::Default;
    };
    if fragment.is_empty() {
        return ClickOutcome::Default;
    }
    match page.resolve_fragment(fragment) {
        Some(target) => {
            let top = page.element_rect(target).map_or(0.0, |r| r.y0);
            ClickOutcome::SmoothScroll { target, top }
        }
        None => ClickOutcome::Default,
    }
}
