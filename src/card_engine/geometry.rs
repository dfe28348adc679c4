use serde::{Deserialize, Serialize};

/// Axis-aligned bounding rectangle in display units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Rect {
            left,
            top,
            right: left + width,
            bottom: top + height,
            width,
            height,
        }
    }

    /// Copy of this rectangle moved by `(dx, dy)`.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Rect::new(self.left + dx, self.top + dy, self.width, self.height)
    }
}

/// True if the two rectangles share interior area.
///
/// Strict comparisons: rectangles that only touch along an edge do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left < b.right && a.right > b.left && a.top < b.bottom && a.bottom > b.top
}

/// Translation that centers `card` over `zone`, measured from `card`'s own position.
pub fn centering_offset(card: &Rect, zone: &Rect) -> (f32, f32) {
    let dx = zone.left - card.left + (zone.width - card.width) / 2.0;
    let dy = zone.top - card.top + (zone.height - card.height) / 2.0;
    (dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rectangles_detected() {
        let a = Rect::new(0.0, 0.0, 100.0, 50.0);
        let b = Rect::new(80.0, 40.0, 30.0, 30.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn shared_edge_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 50.0);
        let right = Rect::new(100.0, 0.0, 40.0, 50.0);
        let below = Rect::new(0.0, 50.0, 100.0, 10.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&right, &a));
        assert!(!overlaps(&a, &below));
        assert!(!overlaps(&below, &a));
    }

    #[test]
    fn overlap_is_symmetric_over_a_grid() {
        let base = Rect::new(10.0, 10.0, 20.0, 20.0);
        for x in -2..6 {
            for y in -2..6 {
                let other = Rect::new(x as f32 * 7.5, y as f32 * 7.5, 12.0, 9.0);
                assert_eq!(
                    overlaps(&base, &other),
                    overlaps(&other, &base),
                    "asymmetric overlap at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn centering_offset_aligns_centers() {
        let card = Rect::new(10.0, 300.0, 80.0, 40.0);
        let zone = Rect::new(200.0, 50.0, 120.0, 60.0);
        let (dx, dy) = centering_offset(&card, &zone);
        let moved = card.translated(dx, dy);
        assert!((moved.left + moved.width / 2.0 - (zone.left + zone.width / 2.0)).abs() < 1e-4);
        assert!((moved.top + moved.height / 2.0 - (zone.top + zone.height / 2.0)).abs() < 1e-4);
    }
}
