/// First-order low-pass step: move `current` toward `target` by `factor` of the gap.
pub(crate) fn ease_toward(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

/// Clamp `v` into `[-cap, cap]`. A non-finite value collapses to 0.
pub(crate) fn clamp_abs(v: f64, cap: f64) -> f64 {
    if !v.is_finite() {
        return 0.0;
    }
    let cap = cap.abs();
    v.clamp(-cap, cap)
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
