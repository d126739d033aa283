use std::time::Duration;

/// Timer period for control animations (~60 Hz).
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Cubic ease-out: fast start, slow finish. `t` is clamped to `[0, 1]`.
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Eased position in `[0, 1]` moving towards either bound in fixed steps.
///
/// Every retarget starts a new leg from the value currently displayed, so
/// reversing mid-flight never jumps. A leg's duration is proportional to
/// the distance it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    /// Linear progress through the current leg.
    t: f32,
    /// Per-tick progress across the full `[0, 1]` range.
    step: f32,
    leg_step: f32,
    running: bool,
}

impl Tween {
    /// A tween resting at `0` (or `1` when `at_end`) that takes `duration`
    /// to travel the full range at [`TICK_INTERVAL`] ticks.
    pub fn new(duration: Duration, at_end: bool) -> Self {
        let ticks = (duration.as_secs_f32() / TICK_INTERVAL.as_secs_f32()).ceil().max(1.0);
        let rest = if at_end { 1.0 } else { 0.0 };
        Self { from: rest, to: rest, t: 1.0, step: 1.0 / ticks, leg_step: 1.0 / ticks, running: false }
    }

    /// Bound the tween is heading for (or resting at).
    #[inline]
    pub fn target(&self) -> f32 {
        self.to
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Eased position in `[0, 1]`.
    pub fn value(&self) -> f32 {
        if self.t >= 1.0 {
            self.to
        } else {
            self.from + (self.to - self.from) * ease_out(self.t)
        }
    }

    /// Heads towards `1` (`forward`) or `0`. Returns `true` when there is
    /// distance left to travel, i.e. the caller should start its timer.
    pub fn retarget(&mut self, forward: bool) -> bool {
        let target = if forward { 1.0 } else { 0.0 };
        if target == self.to {
            return self.running;
        }
        self.from = self.value();
        self.to = target;
        let distance = (self.to - self.from).abs();
        if distance <= 0.0 {
            self.t = 1.0;
            self.running = false;
        } else {
            self.t = 0.0;
            self.leg_step = (self.step / distance).min(1.0);
            self.running = true;
        }
        self.running
    }

    /// Jumps to the bound without animating.
    pub fn snap(&mut self, forward: bool) {
        let rest = if forward { 1.0 } else { 0.0 };
        self.from = rest;
        self.to = rest;
        self.t = 1.0;
        self.running = false;
    }

    /// Advances one timer period. Returns `true` while more ticks are needed.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.t = (self.t + self.leg_step).min(1.0);
        if self.t >= 1.0 {
            self.running = false;
        }
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_out_hits_both_bounds_and_front_loads() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        assert!(ease_out(0.5) > 0.5);
        assert_eq!(ease_out(2.0), 1.0);
    }

    #[test]
    fn tween_stops_exactly_at_the_bound() {
        let mut t = Tween::new(Duration::from_millis(160), false);
        assert!(t.retarget(true));
        let mut ticks = 0;
        while t.tick() {
            ticks += 1;
            assert!(ticks < 100, "tween never finished");
        }
        assert_eq!(t.value(), 1.0);
        assert_eq!(t.target(), 1.0);
        assert!(!t.is_running());
        // One more tick after completion does nothing.
        assert!(!t.tick());
    }

    #[test]
    fn tween_reverses_mid_flight() {
        let mut t = Tween::new(Duration::from_millis(160), false);
        t.retarget(true);
        t.tick();
        t.tick();
        let mid = t.value();
        assert!(t.retarget(false));
        t.tick();
        assert!(t.value() < mid);
        while t.tick() {}
        assert_eq!(t.value(), 0.0);
    }

    #[test]
    fn reversing_keeps_the_value_continuous() {
        let mut t = Tween::new(Duration::from_millis(120), false);
        t.retarget(true);
        for _ in 0..3 {
            t.tick();
        }
        let before = t.value();
        assert!(before > 0.0 && before < 1.0);
        t.retarget(false);
        assert!((t.value() - before).abs() < 1e-6, "value jumped from {before} to {}", t.value());

        // And back again.
        t.tick();
        let before = t.value();
        t.retarget(true);
        assert!((t.value() - before).abs() < 1e-6);
    }

    #[test]
    fn shorter_leg_takes_fewer_ticks() {
        let mut t = Tween::new(Duration::from_millis(160), false);
        t.retarget(true);
        t.tick();
        t.tick();
        t.retarget(false);
        let mut ticks = 1;
        while t.tick() {
            ticks += 1;
        }
        assert!(ticks < 10, "{ticks} ticks for a partial leg");
    }

    #[test]
    fn retarget_to_current_bound_does_not_run() {
        let mut t = Tween::new(Duration::from_millis(100), true);
        assert!(!t.retarget(true));
        assert!(!t.tick());
    }

    #[test]
    fn retarget_to_same_bound_keeps_running() {
        let mut t = Tween::new(Duration::from_millis(160), false);
        t.retarget(true);
        t.tick();
        let v = t.value();
        assert!(t.retarget(true));
        assert_eq!(t.value(), v);
    }

    #[test]
    fn reversed_leg_decelerates_into_zero() {
        let mut t = Tween::new(Duration::from_millis(160), true);
        t.retarget(false);
        t.tick();
        // Heading back to 0 the eased value also moves fastest first.
        assert!(1.0 - t.value() > 0.1);
    }
}
