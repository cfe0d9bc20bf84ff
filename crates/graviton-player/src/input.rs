//! Per-frame input sample and the intents it queues for the physics tick.

/// Raw input read once per rendered frame. The controller never remaps it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputFrame {
    /// Forward/back axis, roughly `[-1, 1]`. Positive walks forward.
    pub forward_axis: f32,
    /// Strafe axis, roughly `[-1, 1]`. Positive walks right.
    pub strafe_axis: f32,
    /// Horizontal mouse delta. Positive turns right.
    pub look_yaw: f32,
    /// Vertical mouse delta. Positive looks up.
    pub look_pitch: f32,
    /// Jump pressed this frame.
    pub jump: bool,
    /// Grab/release pressed this frame.
    pub grab: bool,
    /// Fling pressed this frame.
    pub fling: bool,
}

impl InputFrame {
    /// A frame with only movement axes set.
    pub fn walk(forward_axis: f32, strafe_axis: f32) -> Self {
        Self {
            forward_axis,
            strafe_axis,
            ..Default::default()
        }
    }

    /// A frame with only mouse deltas set.
    pub fn look(yaw: f32, pitch: f32) -> Self {
        Self {
            look_yaw: yaw,
            look_pitch: pitch,
            ..Default::default()
        }
    }
}

/// Edge-triggered manipulator requests waiting for the next physics tick.
///
/// Booleans, not counters: two presses before one tick coalesce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueuedIntents {
    pub grab: bool,
    pub fling: bool,
}

impl QueuedIntents {
    /// ORs this frame's edges into the queue.
    pub fn record(&mut self, frame: &InputFrame) {
        self.grab |= frame.grab;
        self.fling |= frame.fling;
    }

    /// Returns the queued intents and clears them.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}
