use crate::page::RawEffectAttrs;

/// Coefficient used when the speed attribute is absent or unparseable.
pub const DEFAULT_SPEED: f64 = 0.5;

/// Scroll distance over which a full-speed scale effect adds 1.0.
const SCALE_DIVISOR: f64 = 1000.0;

/// Scroll distance over which a full-speed opacity effect fades to 0.
const OPACITY_DIVISOR: f64 = 500.0;

/// Effect axis for a registered element.
///
/// `Unrecognized` carries unknown markup keywords as a documented no-op:
/// such elements stay registered but never receive a style write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Scale,
    Rotate,
    Opacity,
    Unrecognized,
}

impl Direction {
    /// Maps a markup keyword to a direction. Anything outside the known
    /// set becomes `Unrecognized`, never an error.
    pub fn from_keyword(s: &str) -> Self {
        match s {
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            "scale" => Self::Scale,
            "rotate" => Self::Rotate,
            "opacity" => Self::Opacity,
            _ => Self::Unrecognized,
        }
    }
}

/// Per-element effect parameters, parsed once at discovery.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EffectConfig {
    /// Multiplier applied to the scroll offset.
    pub speed: f64,
    pub direction: Direction,
    /// Constant additive bias, in px. Only the translate directions use it.
    pub offset: f64,
}

impl EffectConfig {
    /// Parses raw markup attributes into a typed config.
    ///
    /// Never fails: a missing or unparseable value falls back to its
    /// default (speed 0.5, direction up, offset 0).
    pub fn from_attrs(attrs: &RawEffectAttrs) -> Self {
        let speed = attrs
            .speed
            .as_deref()
            .and_then(parse_float)
            .unwrap_or(DEFAULT_SPEED);
        let direction = attrs
            .direction
            .as_deref()
            .map(Direction::from_keyword)
            .unwrap_or(Direction::Up);
        let offset = attrs.offset.as_deref().and_then(parse_float).unwrap_or(0.0);
        Self {
            speed,
            direction,
            offset,
        }
    }

    /// Style produced at the given scroll offset, or `None` for
    /// `Unrecognized` (the element is silently skipped).
    pub fn style_at(&self, scroll_y: f64) -> Option<StyleValue> {
        let v = scroll_y * self.speed;
        match self.direction {
            Direction::Up => Some(StyleValue::TranslateY(-v + self.offset)),
            Direction::Down => Some(StyleValue::TranslateY(v + self.offset)),
            Direction::Left => Some(StyleValue::TranslateX(-v + self.offset)),
            Direction::Right => Some(StyleValue::TranslateX(v + self.offset)),
            Direction::Scale => Some(StyleValue::Scale(1.0 + v / SCALE_DIVISOR)),
            Direction::Rotate => Some(StyleValue::Rotate(v)),
            Direction::Opacity => {
                Some(StyleValue::Opacity((1.0 - v / OPACITY_DIVISOR).clamp(0.0, 1.0)))
            }
            Direction::Unrecognized => None,
        }
    }
}

fn parse_float(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One computed style write. Translate values are px, rotation degrees.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleValue {
    TranslateX(f64),
    TranslateY(f64),
    Scale(f64),
    Rotate(f64),
    Opacity(f64),
}

impl StyleValue {
    /// True for variants written to the transform channel. Opacity has
    /// its own channel; the two never overwrite each other.
    pub fn is_transform(self) -> bool {
        !matches!(self, Self::Opacity(_))
    }
}

impl std::fmt::Display for StyleValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TranslateX(v) => write!(f, "translateX({v}px)"),
            Self::TranslateY(v) => write!(f, "translateY({v}px)"),
            Self::Scale(v) => write!(f, "scale({v})"),
            Self::Rotate(v) => write!(f, "rotate({v}deg)"),
            Self::Opacity(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(speed: Option<&str>, direction: Option<&str>, offset: Option<&str>) -> RawEffectAttrs {
        RawEffectAttrs {
            speed: speed.map(str::to_string),
            direction: direction.map(str::to_string),
            offset: offset.map(str::to_string),
        }
    }

    #[test]
    fn missing_attrs_use_defaults() {
        let cfg = EffectConfig::from_attrs(&attrs(None, None, None));
        assert_eq!(cfg.speed, DEFAULT_SPEED);
        assert_eq!(cfg.direction, Direction::Up);
        assert_eq!(cfg.offset, 0.0);
    }

    #[test]
    fn unparseable_attrs_use_defaults() {
        let cfg = EffectConfig::from_attrs(&attrs(Some("fast"), Some("sideways"), Some("")));
        assert_eq!(cfg.speed, DEFAULT_SPEED);
        assert_eq!(cfg.direction, Direction::Unrecognized);
        assert_eq!(cfg.offset, 0.0);
    }

    #[test]
    fn zero_speed_is_a_valid_coefficient() {
        let cfg = EffectConfig::from_attrs(&attrs(Some("0"), None, None));
        assert_eq!(cfg.speed, 0.0);
        assert_eq!(cfg.style_at(500.0), Some(StyleValue::TranslateY(0.0)));
    }

    #[test]
    fn translate_formulas_match_table() {
        let mk = |direction| EffectConfig {
            speed: 0.5,
            direction,
            offset: 10.0,
        };
        assert_eq!(
            mk(Direction::Up).style_at(100.0),
            Some(StyleValue::TranslateY(-40.0))
        );
        assert_eq!(
            mk(Direction::Down).style_at(100.0),
            Some(StyleValue::TranslateY(60.0))
        );
        assert_eq!(
            mk(Direction::Left).style_at(100.0),
            Some(StyleValue::TranslateX(-40.0))
        );
        assert_eq!(
            mk(Direction::Right).style_at(100.0),
            Some(StyleValue::TranslateX(60.0))
        );
    }

    #[test]
    fn scale_and_rotate_ignore_offset() {
        let cfg = EffectConfig {
            speed: 2.0,
            direction: Direction::Scale,
            offset: 99.0,
        };
        assert_eq!(cfg.style_at(100.0), Some(StyleValue::Scale(1.2)));

        let cfg = EffectConfig {
            speed: 0.3,
            direction: Direction::Rotate,
            offset: 99.0,
        };
        assert_eq!(cfg.style_at(100.0), Some(StyleValue::Rotate(30.0)));
    }

    #[test]
    fn opacity_is_clamped_both_bounds() {
        let cfg = EffectConfig {
            speed: 0.2,
            direction: Direction::Opacity,
            offset: 0.0,
        };
        // 1 - 3000*0.2/500 = -0.2 clamps to 0.
        assert_eq!(cfg.style_at(3000.0), Some(StyleValue::Opacity(0.0)));
        // Negative scroll products clamp to 1.
        assert_eq!(cfg.style_at(-3000.0), Some(StyleValue::Opacity(1.0)));

        let cfg = EffectConfig {
            speed: 0.25,
            direction: Direction::Opacity,
            offset: 0.0,
        };
        assert_eq!(cfg.style_at(1000.0), Some(StyleValue::Opacity(0.5)));
    }

    #[test]
    fn unrecognized_direction_produces_no_style() {
        let cfg = EffectConfig {
            speed: 1.0,
            direction: Direction::Unrecognized,
            offset: 0.0,
        };
        assert_eq!(cfg.style_at(100.0), None);
    }

    #[test]
    fn display_matches_css_text() {
        assert_eq!(StyleValue::TranslateY(-50.0).to_string(), "translateY(-50px)");
        assert_eq!(StyleValue::TranslateX(12.5).to_string(), "translateX(12.5px)");
        assert_eq!(StyleValue::Scale(1.05).to_string(), "scale(1.05)");
        assert_eq!(StyleValue::Rotate(30.0).to_string(), "rotate(30deg)");
        assert_eq!(StyleValue::Opacity(0.8).to_string(), "0.8");
    }
}
