/// Linear interpolation of `x` between `(x0, y0)` and `(x1, y1)`.
///
/// `x` must lie in `x0..=x1`. Products are taken in `u64` so that full-scale
/// codes times millivolt spans cannot overflow.
pub fn interpolate(x0: u32, x1: u32, y0: u32, y1: u32, x: u32) -> u32 {
    if x1 == x0 {
        return y0;
    }

    let dx = u64::from(x - x0);
    let span = u64::from(x1 - x0);

    let offset = if y0 > y1 {
        dx * u64::from(y0 - y1) / span
    } else {
        dx * u64::from(y1 - y0) / span
    };

    // offset never exceeds |y1 - y0|, which fits in u32
    let offset = offset as u32;

    if y0 > y1 {
        y0 - offset
    } else {
        y0 + offset
    }
}

/// Like [`interpolate`], but continues the line through `(x0, y0)` and
/// `(x1, y1)` past both ends.
///
/// Requires `x0 < x1` and `y0 <= y1`. Below `x0` the result saturates at
/// zero, above `x1` at `u32::MAX`.
pub fn extend(x0: u32, x1: u32, y0: u32, y1: u32, x: u32) -> u32 {
    let rise = u64::from(y1 - y0);
    let run = u64::from(x1 - x0);

    if x < x0 {
        let drop = u64::from(x0 - x) * rise / run;
        // bounded by y0
        u64::from(y0).saturating_sub(drop) as u32
    } else if x > x1 {
        let gain = u64::from(x - x1) * rise / run;
        u32::try_from(u64::from(y1).saturating_add(gain)).unwrap_or(u32::MAX)
    } else {
        interpolate(x0, x1, y0, y1, x)
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn interpolate() {
        assert_eq!(super::interpolate(0, 10, 0, 100, 0), 0);
        assert_eq!(super::interpolate(0, 10, 0, 100, 2), 20);
        assert_eq!(super::interpolate(0, 10, 0, 100, 5), 50);
        assert_eq!(super::interpolate(0, 10, 0, 100, 10), 100);
    }

    #[test]
    fn interpolate_flipped_y() {
        assert_eq!(super::interpolate(0, 10, 100, 0, 0), 100);
        assert_eq!(super::interpolate(0, 10, 100, 0, 8), 20);
        assert_eq!(super::interpolate(0, 10, 100, 0, 10), 0);
    }

    #[test]
    fn degenerate_segment() {
        assert_eq!(super::interpolate(7, 7, 42, 99, 7), 42);
    }

    #[test]
    fn wide_products_do_not_overflow() {
        assert_eq!(
            super::interpolate(0, 4095, 0, 3_300_000, 4095),
            3_300_000
        );
        assert_eq!(super::interpolate(0, 4095, 0, 3_300_000, 2048), 1_650_402);
    }

    #[test]
    fn extends_past_both_ends() {
        assert_eq!(super::extend(10, 20, 100, 200, 15), 150);
        assert_eq!(super::extend(10, 20, 100, 200, 5), 50);
        assert_eq!(super::extend(10, 20, 100, 200, 0), 0);
        assert_eq!(super::extend(10, 20, 100, 200, 30), 300);
    }

    #[test]
    fn extension_saturates() {
        assert_eq!(super::extend(1000, 1001, 0, 1000, 0), 0);
        assert_eq!(super::extend(0, 1, 0, u32::MAX / 2, u32::MAX), u32::MAX);
    }
}
