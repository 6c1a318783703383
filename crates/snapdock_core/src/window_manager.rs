//! Shared placement helpers used by the desktop reducer.

use crate::geometry::{is_in_taskbar_band, taskbar_slot_for_x, SnapPreview};
use crate::model::{Dimensions, DesktopWindow, Point, SlotToken, TaskbarGeometry};

/// Moves `item` to the tail of `items`, keeping the relative order of everything else.
///
/// Returns `false` (leaving `items` untouched) when `item` is absent.
pub fn move_to_tail<T: PartialEq>(items: &mut Vec<T>, item: &T) -> bool {
    let Some(index) = items.iter().position(|candidate| candidate == item) else {
        return false;
    };
    if index + 1 != items.len() {
        let moved = items.remove(index);
        items.push(moved);
    }
    true
}

/// Moves the element at `from` so that it ends up at `to` (clamped to the last index).
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() {
        return;
    }
    let to = to.min(items.len() - 1);
    if from == to {
        return;
    }
    let moved = items.remove(from);
    items.insert(to, moved);
}

/// Repositions `token` in the taskbar order for a drag at `pointer`.
///
/// Over the taskbar band the token takes the slot under the pointer; anywhere else it is parked
/// at the tail so the remaining icons close ranks. Returns `false` when the token is absent.
pub fn relocate_taskbar_token(
    order: &mut Vec<SlotToken>,
    token: SlotToken,
    pointer: Point,
    taskbar: TaskbarGeometry,
) -> bool {
    let Some(from) = order.iter().position(|candidate| *candidate == token) else {
        return false;
    };
    let to = if is_in_taskbar_band(pointer.y, taskbar.icon_size, taskbar.icon_margin) {
        taskbar_slot_for_x(pointer.x, taskbar.icon_margin, taskbar.icon_size, order.len())
    } else {
        order.len() - 1
    };
    move_item(order, from, to);
    true
}

/// Applies the per-axis resize policy: `start + delta`, floored at `min` and optionally capped.
pub fn resize_dimensions(
    start: Dimensions,
    delta: Point,
    min: f64,
    max: Option<Dimensions>,
) -> Dimensions {
    let width = (start.width + delta.x).max(min);
    let height = (start.height + delta.y).max(min);
    match max {
        Some(max) => Dimensions {
            width: width.min(max.width.max(min)),
            height: height.min(max.height.max(min)),
        },
        None => Dimensions { width, height },
    }
}

/// Places a window released on the desktop: onto the pending snap target if there is one,
/// otherwise at `pointer - grab_offset`.
///
/// Snapped sizes go through the same floor and cap as an interactive resize.
pub fn place_dropped_window(
    window: &mut DesktopWindow,
    pointer: Point,
    grab_offset: Point,
    preview: Option<&SnapPreview>,
    min: f64,
    max: Option<Dimensions>,
) {
    match preview {
        Some(preview) => {
            window.top_left = preview.target.origin();
            window.dimensions =
                resize_dimensions(preview.target.dimensions(), Point::default(), min, max);
        }
        None => window.top_left = pointer.minus(grab_offset),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::geometry::SnapRegion;
    use crate::model::{Rect, WindowId};

    fn w(id: u64) -> SlotToken {
        SlotToken::Window(WindowId(id))
    }

    #[test]
    fn move_to_tail_is_noop_for_missing_or_last_item() {
        let mut items = vec![1, 2, 3];
        assert!(!move_to_tail(&mut items, &9));
        assert_eq!(items, vec![1, 2, 3]);
        assert!(move_to_tail(&mut items, &3));
        assert_eq!(items, vec![1, 2, 3]);
        assert!(move_to_tail(&mut items, &1));
        assert_eq!(items, vec![2, 3, 1]);
    }

    #[test]
    fn move_item_clamps_target_index() {
        let mut items = vec!['a', 'b', 'c'];
        move_item(&mut items, 0, 10);
        assert_eq!(items, vec!['b', 'c', 'a']);
        move_item(&mut items, 2, 0);
        assert_eq!(items, vec!['a', 'b', 'c']);
        move_item(&mut items, 5, 0);
        assert_eq!(items, vec!['a', 'b', 'c']);
    }

    #[test]
    fn token_follows_pointer_inside_band_and_parks_at_tail_outside() {
        let taskbar = TaskbarGeometry::PRIMARY;
        let mut order = vec![w(3), w(4), SlotToken::Placeholder];

        assert!(relocate_taskbar_token(
            &mut order,
            SlotToken::Placeholder,
            Point::new(5.0, 5.0),
            taskbar
        ));
        assert_eq!(order, vec![SlotToken::Placeholder, w(3), w(4)]);

        relocate_taskbar_token(&mut order, SlotToken::Placeholder, Point::new(120.0, 50.0), taskbar);
        assert_eq!(order, vec![w(3), SlotToken::Placeholder, w(4)]);

        relocate_taskbar_token(&mut order, SlotToken::Placeholder, Point::new(120.0, 400.0), taskbar);
        assert_eq!(order, vec![w(3), w(4), SlotToken::Placeholder]);
    }

    #[test]
    fn relocating_missing_token_leaves_order_untouched() {
        let mut order = vec![w(3), w(4)];
        assert!(!relocate_taskbar_token(
            &mut order,
            SlotToken::Placeholder,
            Point::new(5.0, 5.0),
            TaskbarGeometry::PRIMARY
        ));
        assert_eq!(order, vec![w(3), w(4)]);
    }

    #[test]
    fn resize_floors_each_axis_independently() {
        let start = Dimensions::new(300.0, 300.0);
        assert_eq!(
            resize_dimensions(start, Point::new(-250.0, 40.0), 100.0, None),
            Dimensions::new(100.0, 340.0)
        );
        assert_eq!(
            resize_dimensions(start, Point::new(-10_000.0, -10_000.0), 100.0, None),
            Dimensions::new(100.0, 100.0)
        );
    }

    #[test]
    fn resize_respects_optional_cap() {
        let start = Dimensions::new(300.0, 300.0);
        let cap = Some(Dimensions::new(500.0, 320.0));
        assert_eq!(
            resize_dimensions(start, Point::new(400.0, 5.0), 100.0, cap),
            Dimensions::new(500.0, 305.0)
        );
        // A cap below the floor never wins over the floor.
        assert_eq!(
            resize_dimensions(start, Point::new(0.0, 0.0), 100.0, Some(Dimensions::new(50.0, 50.0))),
            Dimensions::new(100.0, 100.0)
        );
    }

    #[test]
    fn dropped_window_prefers_snap_target() {
        let mut window = DesktopWindow {
            id: WindowId(1),
            top_left: Point::new(0.0, 0.0),
            dimensions: Dimensions::new(300.0, 300.0),
            color: "#000".to_string(),
            animate_in_from: None,
        };
        place_dropped_window(
            &mut window,
            Point::new(400.0, 300.0),
            Point::new(20.0, 10.0),
            None,
            100.0,
            None,
        );
        assert_eq!(window.top_left, Point::new(380.0, 290.0));
        assert_eq!(window.dimensions, Dimensions::new(300.0, 300.0));

        let preview = SnapPreview {
            region: SnapRegion::Right,
            target: Rect::new(500.0, 100.0, 500.0, 700.0),
            triggered_from: Point::new(990.0, 400.0),
        };
        place_dropped_window(
            &mut window,
            Point::new(990.0, 400.0),
            Point::new(20.0, 10.0),
            Some(&preview),
            100.0,
            None,
        );
        assert_eq!(window.top_left, Point::new(500.0, 100.0));
        assert_eq!(window.dimensions, Dimensions::new(500.0, 700.0));
    }

    #[test]
    fn snapped_window_keeps_minimum_size() {
        let mut window = DesktopWindow {
            id: WindowId(1),
            top_left: Point::new(40.0, 140.0),
            dimensions: Dimensions::new(300.0, 300.0),
            color: "#000".to_string(),
            animate_in_from: None,
        };
        // Top-left quarter of a 300x250 viewport under a 100px band.
        let preview = SnapPreview {
            region: SnapRegion::TopLeft,
            target: Rect::new(0.0, 100.0, 150.0, 75.0),
            triggered_from: Point::new(2.0, 110.0),
        };
        place_dropped_window(
            &mut window,
            Point::new(2.0, 110.0),
            Point::new(20.0, 10.0),
            Some(&preview),
            100.0,
            None,
        );
        assert_eq!(window.top_left, Point::new(0.0, 100.0));
        assert_eq!(window.dimensions, Dimensions::new(150.0, 100.0));
    }
}
