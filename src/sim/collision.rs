//! Overlap and proximity queries over entity boxes
//!
//! Both queries break ties by iteration order (first found wins), so
//! callers keep their entity lists in spawn order.

use std::cmp::Ordering;

use glam::Vec2;

use super::rect::Rect;

/// Index of the leftmost box overlapping `target`
///
/// Several overlaps are resolved by the smallest `x`; equal `x` keeps the
/// earliest box.
pub fn leftmost_overlap<'a, I>(target: &Rect, boxes: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Rect>,
{
    boxes
        .into_iter()
        .enumerate()
        .filter(|(_, b)| target.overlaps(b))
        .min_by(|(_, a), (_, b)| a.x.total_cmp(&b.x))
        .map(|(i, _)| i)
}

/// Index of the box whose centre is nearest to `point`
pub fn nearest_to<'a, I>(point: Vec2, boxes: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Rect>,
{
    boxes
        .into_iter()
        .enumerate()
        .map(|(i, b)| (i, b.center().distance(point)))
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leftmost_overlap_picks_smallest_x() {
        let player = Rect::new(280.0, 500.0, 50.0, 50.0);
        let boxes = [
            Rect::new(305.0, 480.0, 290.0, 80.0),
            Rect::new(5.0, 480.0, 290.0, 80.0),
        ];
        assert_eq!(leftmost_overlap(&player, &boxes), Some(1));
    }

    #[test]
    fn test_leftmost_overlap_ignores_misses() {
        let player = Rect::new(400.0, 500.0, 50.0, 50.0);
        let boxes = [
            Rect::new(5.0, 480.0, 290.0, 80.0),
            Rect::new(305.0, 480.0, 290.0, 80.0),
        ];
        assert_eq!(leftmost_overlap(&player, &boxes), Some(1));
        assert_eq!(leftmost_overlap(&player, &boxes[..1]), None);
    }

    #[test]
    fn test_leftmost_overlap_equal_x_keeps_first() {
        let player = Rect::new(0.0, 0.0, 100.0, 400.0);
        let boxes = [
            Rect::new(20.0, 175.0, 80.0, 150.0),
            Rect::new(20.0, 10.0, 80.0, 150.0),
        ];
        assert_eq!(leftmost_overlap(&player, &boxes), Some(0));
    }

    #[test]
    fn test_nearest_to() {
        let boxes = [
            Rect::from_center(Vec2::new(100.0, 0.0), 10.0, 10.0),
            Rect::from_center(Vec2::new(30.0, 40.0), 10.0, 10.0),
            Rect::from_center(Vec2::new(-30.0, -40.0), 10.0, 10.0),
        ];
        // Two boxes tie at distance 50; the earlier one wins
        assert_eq!(nearest_to(Vec2::ZERO, &boxes), Some(1));
        let none: [Rect; 0] = [];
        assert_eq!(nearest_to(Vec2::ZERO, &none), None);
    }
}
