use crate::ease::Ease;

/// Frame-driven viewport animation from one scroll offset to another.
///
/// Stepped once per frame pass by the controller. Retargetable: a new
/// anchor click mid-flight restarts the tween from the current sampled
/// position, so the viewport never jumps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTween {
    from: f64,
    to: f64,
    duration_frames: u32, // >= 1
    elapsed: u32,
    ease: Ease,
}

impl ScrollTween {
    pub fn new(from: f64, to: f64, duration_frames: u32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration_frames: duration_frames.max(1),
            elapsed: 0,
            ease,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_done(&self) -> bool {
        self.elapsed >= self.duration_frames
    }

    /// Offset at the current progress point.
    pub fn value(&self) -> f64 {
        let t = f64::from(self.elapsed) / f64::from(self.duration_frames);
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    /// Advances one frame and returns the new offset. Saturates at the
    /// target once the duration is spent.
    pub fn step(&mut self) -> f64 {
        self.elapsed = (self.elapsed + 1).min(self.duration_frames);
        self.value()
    }

    /// Redirects the tween toward a new target, starting from the
    /// current sampled offset with a fresh duration.
    pub fn retarget(&mut self, to: f64) {
        *self = Self::new(self.value(), to, self.duration_frames, self.ease);
    }
}
