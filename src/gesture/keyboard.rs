//! Keyboard stepping.

use crate::event::Key;
use crate::value::NumericRange;

/// Multiplier applied to `step` for Page Up / Page Down.
pub const PAGE_STEPS: f64 = 10.0;

/// Value after pressing `key`, or `None` if the key is not a stepping key
/// or would not change the value.
///
/// Right and Up increase, Left and Down decrease, Page Up / Page Down move
/// ten steps, Home and End jump to the bounds.
pub fn key_step(range: &NumericRange, value: f64, key: Key) -> Option<f64> {
    let step = range.step();
    let target = match key {
        Key::Right | Key::Up => value + step,
        Key::Left | Key::Down => value - step,
        Key::PageUp => value + step * PAGE_STEPS,
        Key::PageDown => value - step * PAGE_STEPS,
        Key::Home => range.min(),
        Key::End => range.max(),
        _ => return None,
    };
    let snapped = range.snap(target);
    (snapped != value).then_some(snapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_move_one_step() {
        let r = NumericRange::new(0.0, 1.0, 0.1);
        assert_eq!(key_step(&r, 0.2, Key::Right), Some(0.3));
        assert_eq!(key_step(&r, 0.2, Key::Up), Some(0.3));
        assert_eq!(key_step(&r, 0.2, Key::Left), Some(0.1));
        assert_eq!(key_step(&r, 0.2, Key::Down), Some(0.1));
    }

    #[test]
    fn page_keys_move_ten_steps() {
        let r = NumericRange::new(0.0, 100.0, 2.0);
        assert_eq!(key_step(&r, 50.0, Key::PageUp), Some(70.0));
        assert_eq!(key_step(&r, 10.0, Key::PageDown), Some(0.0));
    }

    #[test]
    fn home_end_jump_to_bounds() {
        let r = NumericRange::new(-5.0, 5.0, 1.0);
        assert_eq!(key_step(&r, 2.0, Key::Home), Some(-5.0));
        assert_eq!(key_step(&r, 2.0, Key::End), Some(5.0));
    }

    #[test]
    fn no_change_at_bounds() {
        let r = NumericRange::new(0.0, 10.0, 1.0);
        assert_eq!(key_step(&r, 10.0, Key::Right), None);
        assert_eq!(key_step(&r, 0.0, Key::Home), None);
    }

    #[test]
    fn other_keys_are_ignored() {
        let r = NumericRange::default();
        assert_eq!(key_step(&r, 3.0, Key::Enter), None);
        assert_eq!(key_step(&r, 3.0, Key::Char('a')), None);
    }
}
