use crate::error::StateError;

/// How [`round_tick`] snaps a tick onto the spacing grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Nearest multiple; a tick exactly halfway goes to the larger multiple.
    Auto,
    /// Smallest multiple greater than or equal to the tick.
    Up,
    /// Largest multiple strictly less than the tick. An exact multiple
    /// moves down one step, so a lower boundary sitting on the grid still
    /// opens a non‑empty range below it.
    Down,
}

/// Snaps `tick` to a multiple of `tick_spacing` according to `rounding`.
///
/// Uses floor division, so negative ticks round on the number line rather
/// than toward zero: `round_tick(-61, 60, Rounding::Down) == -120`.
pub fn round_tick(tick: i32, tick_spacing: i32, rounding: Rounding) -> Result<i32, StateError> {
    if tick_spacing <= 0 {
        return Err(StateError::InvalidTickSpacing);
    }

    let remainder = tick.rem_euclid(tick_spacing);
    let floor = tick
        .checked_sub(remainder)
        .ok_or(StateError::TickOutOfBounds)?;

    let rounded = match rounding {
        Rounding::Down if remainder == 0 => floor.checked_sub(tick_spacing),
        Rounding::Down => Some(floor),
        Rounding::Up if remainder == 0 => Some(floor),
        Rounding::Up => floor.checked_add(tick_spacing),
        // remainder * 2 >= spacing, written without overflow
        Rounding::Auto if remainder >= tick_spacing - remainder => floor.checked_add(tick_spacing),
        Rounding::Auto => Some(floor),
    };
    rounded.ok_or(StateError::TickOutOfBounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPACING: i32 = 60;

    fn round(tick: i32, rounding: Rounding) -> i32 {
        round_tick(tick, SPACING, rounding).unwrap()
    }

    #[test]
    fn round_up_positive() {
        let exact = 284 * SPACING;
        assert_eq!(round(exact, Rounding::Up), exact);
        assert_eq!(round(exact - 1, Rounding::Up), exact);
        assert_eq!(round(exact - SPACING + 1, Rounding::Up), exact);
        assert_eq!(round(exact + 1, Rounding::Up), exact + SPACING);
        assert_eq!(round(exact + SPACING - 1, Rounding::Up), exact + SPACING);
        assert_eq!(round(exact + SPACING, Rounding::Up), exact + SPACING);
        assert_eq!(round(exact + SPACING + 1, Rounding::Up), exact + 2 * SPACING);
    }

    #[test]
    fn round_up_negative() {
        let exact = -284 * SPACING;
        assert_eq!(round(exact, Rounding::Up), exact);
        assert_eq!(round(exact - 1, Rounding::Up), exact);
        assert_eq!(round(exact - SPACING + 1, Rounding::Up), exact);
        assert_eq!(round(exact + 1, Rounding::Up), exact + SPACING);
        assert_eq!(round(exact + SPACING - 1, Rounding::Up), exact + SPACING);
        assert_eq!(round(exact + SPACING, Rounding::Up), exact + SPACING);
        assert_eq!(round(exact + SPACING + 1, Rounding::Up), exact + 2 * SPACING);
    }

    #[test]
    fn round_down_positive() {
        let exact = 284 * SPACING;
        assert_eq!(round(exact, Rounding::Down), exact - SPACING);
        assert_eq!(round(exact - 1, Rounding::Down), exact - SPACING);
        assert_eq!(round(exact - SPACING + 1, Rounding::Down), exact - SPACING);
        assert_eq!(round(exact + 1, Rounding::Down), exact);
        assert_eq!(round(exact + SPACING - 1, Rounding::Down), exact);
        assert_eq!(round(exact + SPACING, Rounding::Down), exact);
        assert_eq!(round(exact + SPACING + 1, Rounding::Down), exact + SPACING);
    }

    #[test]
    fn round_down_negative() {
        let exact = -284 * SPACING;
        assert_eq!(round(exact, Rounding::Down), exact - SPACING);
        assert_eq!(round(exact - 1, Rounding::Down), exact - SPACING);
        assert_eq!(round(exact - SPACING + 1, Rounding::Down), exact - SPACING);
        assert_eq!(round(exact + 1, Rounding::Down), exact);
        assert_eq!(round(exact + SPACING - 1, Rounding::Down), exact);
        assert_eq!(round(exact + SPACING, Rounding::Down), exact);
        assert_eq!(round(exact + SPACING + 1, Rounding::Down), exact + SPACING);
    }

    #[test]
    fn round_auto_positive() {
        let exact = 284 * SPACING;
        assert_eq!(round(exact, Rounding::Auto), exact);
        assert_eq!(round(exact + 1, Rounding::Auto), exact);
        assert_eq!(round(exact + SPACING / 2 - 1, Rounding::Auto), exact);
        assert_eq!(round(exact + SPACING / 2, Rounding::Auto), exact + SPACING);
        assert_eq!(round(exact + SPACING / 2 + 1, Rounding::Auto), exact + SPACING);
        assert_eq!(round(exact + SPACING - 1, Rounding::Auto), exact + SPACING);
        assert_eq!(round(exact + SPACING + 1, Rounding::Auto), exact + SPACING);
        assert_eq!(round(exact - 1, Rounding::Auto), exact);
        assert_eq!(round(exact - SPACING / 2 + 1, Rounding::Auto), exact);
        assert_eq!(round(exact - SPACING / 2, Rounding::Auto), exact);
        assert_eq!(round(exact - SPACING / 2 - 1, Rounding::Auto), exact - SPACING);
    }

    #[test]
    fn round_auto_negative() {
        let exact = -284 * SPACING;
        assert_eq!(round(exact, Rounding::Auto), exact);
        assert_eq!(round(exact + 1, Rounding::Auto), exact);
        assert_eq!(round(exact + SPACING / 2 - 1, Rounding::Auto), exact);
        assert_eq!(round(exact + SPACING / 2, Rounding::Auto), exact + SPACING);
        assert_eq!(round(exact + SPACING / 2 + 1, Rounding::Auto), exact + SPACING);
        assert_eq!(round(exact + SPACING - 1, Rounding::Auto), exact + SPACING);
        assert_eq!(round(exact + SPACING + 1, Rounding::Auto), exact + SPACING);
        assert_eq!(round(exact - 1, Rounding::Auto), exact);
        assert_eq!(round(exact - SPACING / 2 + 1, Rounding::Auto), exact);
        assert_eq!(round(exact - SPACING / 2, Rounding::Auto), exact);
        assert_eq!(round(exact - SPACING / 2 - 1, Rounding::Auto), exact - SPACING);
    }

    #[test]
    fn round_auto_odd_spacing_has_no_ties() {
        assert_eq!(round_tick(5, 11, Rounding::Auto).unwrap(), 0);
        assert_eq!(round_tick(6, 11, Rounding::Auto).unwrap(), 11);
        assert_eq!(round_tick(-5, 11, Rounding::Auto).unwrap(), 0);
        assert_eq!(round_tick(-6, 11, Rounding::Auto).unwrap(), -11);
    }

    #[test]
    fn rejects_non_positive_spacing() {
        for spacing in [0, -60] {
            assert!(matches!(
                round_tick(120, spacing, Rounding::Auto),
                Err(StateError::InvalidTickSpacing)
            ));
        }
    }

    #[test]
    fn reports_overflow_at_i32_edges() {
        assert!(matches!(
            round_tick(i32::MAX, SPACING, Rounding::Up),
            Err(StateError::TickOutOfBounds)
        ));
        assert!(matches!(
            round_tick(i32::MIN, 1, Rounding::Down),
            Err(StateError::TickOutOfBounds)
        ));
    }
}
