//! Pointer geometry for taskbar docking and snap (tiling) previews.
//!
//! Everything here is a pure function of its arguments.

use serde::{Deserialize, Serialize};

use crate::model::{Dimensions, Point, Rect};

/// Screen regions that trigger a snap preview while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapRegion {
    TopLeft,
    BottomLeft,
    Left,
    BottomRight,
    TopRight,
    Right,
    Bottom,
    Top,
}

impl SnapRegion {
    /// Rectangle a window dropped in this region takes, below a taskbar of height `band`.
    pub fn target_rect(self, viewport: Dimensions, band: f64) -> Rect {
        let half_w = viewport.width / 2.0;
        let usable_h = viewport.height - band;
        let half_h = usable_h / 2.0;
        let lower_y = band + half_h;
        match self {
            Self::TopLeft => Rect::new(0.0, band, half_w, half_h),
            Self::BottomLeft => Rect::new(0.0, lower_y, half_w, half_h),
            Self::Left => Rect::new(0.0, band, half_w, usable_h),
            Self::BottomRight => Rect::new(half_w, lower_y, half_w, half_h),
            Self::TopRight => Rect::new(half_w, band, half_w, half_h),
            Self::Right => Rect::new(half_w, band, half_w, usable_h),
            Self::Bottom => Rect::new(0.0, lower_y, viewport.width, half_h),
            Self::Top => Rect::new(0.0, band, viewport.width, usable_h),
        }
    }
}

/// Pending tiling target shown while a drag sits inside a trigger zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapPreview {
    pub region: SnapRegion,
    pub target: Rect,
    pub triggered_from: Point,
}

/// True iff `y` is over the taskbar (the band spans `0..=2*margin + icon_size`).
pub fn is_in_taskbar_band(y: f64, icon_size: f64, margin: f64) -> bool {
    y <= 2.0 * margin + icon_size
}

/// Maps a pointer x coordinate to a taskbar slot, clamped to `0..slot_count`.
///
/// A slot is claimed once the pointer passes the centre of the icon before it.
pub fn taskbar_slot_for_x(x: f64, margin: f64, icon_size: f64, slot_count: usize) -> usize {
    let Some(last) = slot_count.checked_sub(1) else {
        return 0;
    };
    let raw = ((x - margin - icon_size / 2.0) / (margin + icon_size)).ceil();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else if raw >= last as f64 {
        last
    } else {
        raw as usize
    }
}

/// Classifies a drag point against the corner and edge trigger zones.
///
/// The checks run in a fixed order and the first match wins; top corners and the side edges
/// only fire below the taskbar band so docking gestures never read as tiling.
pub fn classify_snap_region(
    point: Point,
    viewport: Dimensions,
    band: f64,
    corner_zone: f64,
    edge_zone: f64,
) -> Option<SnapRegion> {
    let Point { x, y } = point;
    let Dimensions {
        width: w,
        height: h,
    } = viewport;

    let left_corner = x < corner_zone;
    let right_corner = x > w - corner_zone;
    let top_corner = y < band + corner_zone;
    let bottom_corner = y > h - corner_zone;
    let left_side = x < edge_zone;
    let right_side = x > w - edge_zone;
    let bottom_side = y > h - edge_zone;
    let top_side = y < band + edge_zone;
    let under_top_bar = y > band;

    if left_corner && top_corner && under_top_bar {
        Some(SnapRegion::TopLeft)
    } else if left_corner && bottom_corner {
        Some(SnapRegion::BottomLeft)
    } else if left_side && under_top_bar {
        Some(SnapRegion::Left)
    } else if right_corner && bottom_corner {
        Some(SnapRegion::BottomRight)
    } else if right_corner && top_corner && under_top_bar {
        Some(SnapRegion::TopRight)
    } else if right_side && under_top_bar {
        Some(SnapRegion::Right)
    } else if bottom_side {
        Some(SnapRegion::Bottom)
    } else if under_top_bar && top_side {
        Some(SnapRegion::Top)
    } else {
        None
    }
}

/// Computes the snap preview a drag at `point` would trigger, if any.
///
/// Returns `None` until the viewport has been measured with some area below the taskbar.
pub fn compute_snap_preview(
    point: Point,
    viewport: Dimensions,
    band: f64,
    corner_zone: f64,
    edge_zone: f64,
) -> Option<SnapPreview> {
    if viewport.width <= 0.0 || viewport.height <= band {
        return None;
    }
    classify_snap_region(point, viewport, band, corner_zone, edge_zone).map(|region| SnapPreview {
        region,
        target: region.target_rect(viewport, band),
        triggered_from: point,
    })
}
