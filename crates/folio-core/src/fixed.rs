use fixed::types::I32F32;

/// Q32.32 fixed-point used for reveal ratios (skill-bar fill, etc.).
pub type Ratio = I32F32;

/// Ticks are the atomic unit of reveal time. By convention one tick is one
/// millisecond of wall-clock time.
pub type Ticks = u64;

/// Convert a 0..=100 percentage into a 0..=1 ratio. Values above 100 clamp.
#[inline]
pub fn ratio_from_percent(percent: u8) -> Ratio {
    Ratio::from_num(percent.min(100)) / Ratio::from_num(100)
}

/// Convert an f64 to Ratio. Use only for initialization, never per tick.
#[inline]
pub fn f64_to_ratio(v: f64) -> Ratio {
    Ratio::from_num(v)
}

/// Convert Ratio to f64. Use only for display.
#[inline]
pub fn ratio_to_f64(v: Ratio) -> f64 {
    v.to_num::<f64>()
}

/// Fraction `step / steps` of `target`, exact at `step == steps`.
///
/// Computed from the step index rather than by repeated addition so the last
/// step lands on `target` with no accumulated rounding.
#[inline]
pub fn interpolate(target: Ratio, step: u32, steps: u32) -> Ratio {
    if steps == 0 || step >= steps {
        return target;
    }
    target.saturating_mul(Ratio::saturating_from_num(step)) / Ratio::saturating_from_num(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_to_ratio() {
        assert_eq!(ratio_from_percent(0), Ratio::ZERO);
        assert_eq!(ratio_from_percent(100), Ratio::ONE);
        assert_eq!(ratio_to_f64(ratio_from_percent(50)), 0.5);
    }

    #[test]
    fn percent_above_hundred_clamps() {
        assert_eq!(ratio_from_percent(250), Ratio::ONE);
    }

    #[test]
    fn interpolate_hits_target_exactly() {
        let target = ratio_from_percent(85);
        assert_eq!(interpolate(target, 3, 3), target);
        assert_eq!(interpolate(target, 0, 3), Ratio::ZERO);
    }

    #[test]
    fn interpolate_is_monotonic() {
        let target = ratio_from_percent(73);
        let values: Vec<Ratio> = (0..=7).map(|k| interpolate(target, k, 7)).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn interpolate_zero_steps_returns_target() {
        let target = f64_to_ratio(0.25);
        assert_eq!(interpolate(target, 0, 0), target);
    }
}
