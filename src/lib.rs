#![forbid(unsafe_code)]

pub mod anchor;
pub mod controller;
pub mod ease;
pub mod effect;
pub mod error;
pub mod page;
pub mod page_mem;
pub mod reveal;
pub mod sched;
pub mod tween;

pub use anchor::ClickOutcome;
pub use controller::{RegisteredElement, ScrollController};
pub use ease::Ease;
pub use effect::{Direction, EffectConfig, StyleValue};
pub use error::{ScrollFxError, ScrollFxResult};
pub use page::{ElementId, Page, RawEffectAttrs, Viewport};
pub use page_mem::{AppliedStyle, MemoryPage, PageElement};
pub use reveal::RevealObserver;
pub use sched::{FrameQueue, FrameScheduler};
pub use tween::ScrollTween;
