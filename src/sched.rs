/// Frame-callback seam. The hosting runtime's render clock is an
/// external collaborator; the controller only ever asks for "one
/// callback before the next rendered frame" through this trait.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Single-slot pending-request queue.
///
/// `request_frame` arms the slot; a driving loop drains it with
/// [`FrameQueue::take`] and runs one controller pass per drained
/// request. Repeated requests before the drain collapse into one.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameQueue {
    pending: bool,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Clears the slot, returning whether a frame had been requested.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) {
        self.pending = true;
    }
}
