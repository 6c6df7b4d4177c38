//! Tweens and timelines for page animation
//!
//! Times are in seconds relative to whatever clock the caller uses (pages
//! pass seconds since they were mounted).

/// Easing curves
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out, the default for plain tweens
    Power1Out,
    /// Quartic ease-out
    Power3Out,
    /// Overshoots then settles; the parameter sets the overshoot
    BackOut(f32),
}

impl Ease {
    /// Map linear progress `t` in [0, 1] to eased progress
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::BackOut(overshoot) => {
                let u = t - 1.0;
                1.0 + (overshoot + 1.0) * u.powi(3) + overshoot * u.powi(2)
            }
        }
    }
}

impl Default for Ease {
    fn default() -> Self {
        Ease::Power1Out
    }
}

/// A single timed transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub start: f32,
    pub duration: f32,
    pub ease: Ease,
}

impl Tween {
    pub fn new(duration: f32, ease: Ease) -> Self {
        Self { start: 0.0, duration, ease }
    }

    pub fn delayed(mut self, delay: f32) -> Self {
        self.start = delay;
        self
    }

    pub fn end(&self) -> f32 {
        self.start + self.duration
    }

    /// Eased progress at `time`: 0 before start, 1 after end
    pub fn progress(&self, time: f32) -> f32 {
        if time <= self.start {
            return self.ease.apply(0.0);
        }
        if self.duration <= 0.0 || time >= self.end() {
            return 1.0;
        }
        self.ease.apply((time - self.start) / self.duration)
    }

    /// Value moving from `from` to `to` over the tween
    pub fn lerp(&self, time: f32, from: f32, to: f32) -> f32 {
        from + (to - from) * self.progress(time)
    }

    #[cfg(test)]
    pub fn is_finished(&self, time: f32) -> bool {
        time >= self.end()
    }
}

/// Tweens sequenced one after another
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    steps: Vec<Tween>,
    cursor: f32,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step starting when the previous one ends
    pub fn then(&mut self, duration: f32, ease: Ease) -> usize {
        self.then_overlapping(duration, ease, 0.0)
    }

    /// Append a step starting `overlap` seconds before the previous one ends
    pub fn then_overlapping(&mut self, duration: f32, ease: Ease, overlap: f32) -> usize {
        let start = (self.cursor - overlap).max(0.0);
        let tween = Tween::new(duration, ease).delayed(start);
        self.cursor = self.cursor.max(tween.end());
        self.steps.push(tween);
        self.steps.len() - 1
    }

    pub fn step(&self, index: usize) -> Option<&Tween> {
        self.steps.get(index)
    }

    /// Progress of step `index`; unknown steps count as finished
    pub fn progress(&self, index: usize, time: f32) -> f32 {
        self.step(index).map_or(1.0, |t| t.progress(time))
    }

    #[cfg(test)]
    pub fn duration(&self) -> f32 {
        self.cursor
    }

    #[cfg(test)]
    pub fn is_finished(&self, time: f32) -> bool {
        time >= self.cursor
    }
}

/// A value that can be sent towards a new target mid-flight
///
/// Retargeting starts from the current animated value, so leaving a card
/// halfway through its hover grow shrinks back from where it got to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animated {
    from: f32,
    to: f32,
    tween: Tween,
}

impl Animated {
    pub fn new(value: f32, duration: f32, ease: Ease) -> Self {
        Self {
            from: value,
            to: value,
            tween: Tween::new(duration, ease),
        }
    }

    pub fn value(&self, time: f32) -> f32 {
        self.tween.lerp(time, self.from, self.to)
    }

    /// Head for `target` starting at `time`. Same target is a no-op.
    pub fn retarget(&mut self, time: f32, target: f32) {
        if target == self.to {
            return;
        }
        self.from = self.value(time);
        self.to = target;
        self.tween.start = time;
    }

    #[cfg(test)]
    pub fn is_settled(&self, time: f32) -> bool {
        self.tween.is_finished(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.0001
    }

    #[test]
    fn test_ease_endpoints() {
        for ease in [Ease::Linear, Ease::Power1Out, Ease::Power3Out, Ease::BackOut(1.7)] {
            assert!(close(ease.apply(0.0), 0.0), "{:?}", ease);
            assert!(close(ease.apply(1.0), 1.0), "{:?}", ease);
        }
    }

    #[test]
    fn test_ease_shapes() {
        assert!(close(Ease::Power1Out.apply(0.5), 0.75));
        assert!(close(Ease::Power3Out.apply(0.5), 0.9375));
        // Back overshoots past 1 before settling
        assert!(Ease::BackOut(1.7).apply(0.7) > 1.0);
    }

    #[test]
    fn test_tween_progress() {
        let t = Tween::new(1.0, Ease::Linear).delayed(0.5);
        assert_eq!(t.progress(0.0), 0.0);
        assert!(close(t.progress(1.0), 0.5));
        assert_eq!(t.progress(2.0), 1.0);
        assert!(close(t.lerp(1.0, 100.0, 0.0), 50.0));
    }

    #[test]
    fn test_zero_duration() {
        let t = Tween::new(0.0, Ease::Linear);
        assert_eq!(t.progress(0.1), 1.0);
    }

    #[test]
    fn test_timeline_sequence_and_overlap() {
        let mut tl = Timeline::new();
        let fade = tl.then(1.0, Ease::Power3Out);
        let title = tl.then(1.0, Ease::BackOut(1.7));
        let subtitle = tl.then_overlapping(0.8, Ease::Power3Out, 0.5);

        assert_eq!(tl.step(fade).unwrap().start, 0.0);
        assert_eq!(tl.step(title).unwrap().start, 1.0);
        assert!(close(tl.step(subtitle).unwrap().start, 1.5));
        assert!(close(tl.duration(), 2.3));
        assert!(!tl.is_finished(2.0));
        assert!(tl.is_finished(2.3));
        assert_eq!(tl.progress(99, 0.0), 1.0);
    }

    #[test]
    fn test_animated_retarget_from_current() {
        let mut scale = Animated::new(1.0, 0.2, Ease::Linear);
        scale.retarget(0.0, 1.05);
        assert!(close(scale.value(0.1), 1.025));

        // Leave halfway: shrink back from 1.025
        scale.retarget(0.1, 1.0);
        assert!(close(scale.value(0.1), 1.025));
        assert!(close(scale.value(0.2), 1.0125));
        assert!(close(scale.value(0.3), 1.0));
        assert!(scale.is_settled(0.3));
    }

    #[test]
    fn test_animated_same_target_keeps_running() {
        let mut scale = Animated::new(1.0, 0.2, Ease::Linear);
        scale.retarget(0.0, 1.05);
        scale.retarget(0.1, 1.05);
        assert!(close(scale.value(0.2), 1.05));
    }
}
