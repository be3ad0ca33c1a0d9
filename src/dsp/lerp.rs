//! Parameter smoothing by repeated single-step interpolation.

/*
Smoothing by Repeated Lerp
==========================

Control data (a hand hovering over a sensor) arrives at tens of updates per
second. Jumping straight to each new target makes the pitch step audibly, so
every update moves the live value only part of the way:

    value = value + (target - value) * fraction

Calling this once per control update with a fixed fraction is a one-pole
lowpass on the parameter. The remaining distance shrinks geometrically:

    remaining after n updates = (1 - fraction)^n * initial distance

    fraction = 0.1, 60 updates/s:
        after  10 updates (~166ms)  35% of the distance remains
        after  22 updates (~366ms)  10% remains
        after  44 updates (~733ms)   1% remains

Edge cases
----------

  fraction = 0.0   value never moves
  fraction = 1.0   value snaps to the target in one call
  0 < f < 1        monotone approach, never overshoots

There is no ramp scheduler behind this. If the caller stops calling, the value
stops moving.
*/

/// Move `current` a `fraction` of the way toward `target`.
///
/// `fraction` is expected in `[0, 1]`. Values outside that range extrapolate.
#[inline]
pub fn lerp(current: f32, target: f32, fraction: f32) -> f32 {
    current + (target - current) * fraction
}

/// Number of single-step lerps needed before the remaining distance falls
/// below `tolerance` of the original distance.
///
/// Returns `None` for fractions that never converge (`<= 0`).
pub fn steps_to_settle(fraction: f32, tolerance: f32) -> Option<u32> {
    if fraction <= 0.0 || tolerance <= 0.0 {
        return None;
    }
    if fraction >= 1.0 || tolerance >= 1.0 {
        return Some(1);
    }
    let steps = tolerance.ln() / (1.0 - fraction).ln();
    Some(steps.ceil() as u32)
}
