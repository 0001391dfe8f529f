//! The eight resize handles of a selected box.

use crate::ir::{BBoxXYXY, Coord, Pixel};

/// Which box edges a handle moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edges {
    pub x0: bool,
    pub x1: bool,
    pub y0: bool,
    pub y1: bool,
}

/// A resize handle, indexed 0 through 7.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
    TopMid = 4,
    BottomMid = 5,
    LeftMid = 6,
    RightMid = 7,
}

impl Handle {
    /// All handles in index order. Hit-testing walks this order.
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::TopRight,
        Handle::BottomLeft,
        Handle::BottomRight,
        Handle::TopMid,
        Handle::BottomMid,
        Handle::LeftMid,
        Handle::RightMid,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Edges this handle drags.
    ///
    /// Handles 0, 4 and 6 move `x0`; 1, 5 and 7 move `x1`; 0, 1, 4 and 5 move
    /// `y0`; 2, 3, 6 and 7 move `y1`. The mid handles therefore also move one
    /// perpendicular edge.
    pub fn edges(self) -> Edges {
        let i = self.index();
        Edges {
            x0: matches!(i, 0 | 4 | 6),
            x1: matches!(i, 1 | 5 | 7),
            y0: matches!(i, 0 | 1 | 4 | 5),
            y1: matches!(i, 2 | 3 | 6 | 7),
        }
    }

    /// Centre of this handle on `bbox`, taken from the raw (unnormalized)
    /// corners so a handle keeps following its edge mid-resize.
    pub fn position(self, bbox: &BBoxXYXY<Pixel>) -> Coord<Pixel> {
        let (x0, y0, x1, y1) = (bbox.min.x, bbox.min.y, bbox.max.x, bbox.max.y);
        let mx = (x0 + x1) / 2.0;
        let my = (y0 + y1) / 2.0;
        let (x, y) = match self {
            Handle::TopLeft => (x0, y0),
            Handle::TopRight => (x1, y0),
            Handle::BottomLeft => (x0, y1),
            Handle::BottomRight => (x1, y1),
            Handle::TopMid => (mx, y0),
            Handle::BottomMid => (mx, y1),
            Handle::LeftMid => (x0, my),
            Handle::RightMid => (x1, my),
        };
        Coord::new(x, y)
    }

    /// Moves this handle's edges of `bbox` to `point`.
    pub fn apply(self, bbox: &BBoxXYXY<Pixel>, point: Coord<Pixel>) -> BBoxXYXY<Pixel> {
        let edges = self.edges();
        let mut out = *bbox;
        if edges.x0 {
            out.min.x = point.x;
        }
        if edges.x1 {
            out.max.x = point.x;
        }
        if edges.y0 {
            out.min.y = point.y;
        }
        if edges.y1 {
            out.max.y = point.y;
        }
        out
    }
}

/// First handle (in index order) within `tolerance` of `point` on both axes.
pub fn hit_handle(bbox: &BBoxXYXY<Pixel>, point: Coord<Pixel>, tolerance: f64) -> Option<Handle> {
    Handle::ALL.into_iter().find(|handle| {
        let pos = handle.position(bbox);
        (point.x - pos.x).abs() <= tolerance && (point.y - pos.y).abs() <= tolerance
    })
}

/// Square markers of side `size` centred on every handle.
pub fn handle_rects(bbox: &BBoxXYXY<Pixel>, size: f64) -> [BBoxXYXY<Pixel>; 8] {
    let half = size / 2.0;
    Handle::ALL.map(|handle| {
        let c = handle.position(bbox);
        BBoxXYXY::from_xyxy(c.x - half, c.y - half, c.x + half, c.y + half)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox() -> BBoxXYXY<Pixel> {
        BBoxXYXY::from_xyxy(100.0, 100.0, 200.0, 160.0)
    }

    #[test]
    fn edge_mapping_per_handle() {
        let x0: Vec<usize> = Handle::ALL.iter().filter(|h| h.edges().x0).map(|h| h.index()).collect();
        let x1: Vec<usize> = Handle::ALL.iter().filter(|h| h.edges().x1).map(|h| h.index()).collect();
        let y0: Vec<usize> = Handle::ALL.iter().filter(|h| h.edges().y0).map(|h| h.index()).collect();
        let y1: Vec<usize> = Handle::ALL.iter().filter(|h| h.edges().y1).map(|h| h.index()).collect();
        assert_eq!(x0, vec![0, 4, 6]);
        assert_eq!(x1, vec![1, 5, 7]);
        assert_eq!(y0, vec![0, 1, 4, 5]);
        assert_eq!(y1, vec![2, 3, 6, 7]);
    }

    #[test]
    fn positions_cover_corners_and_midpoints() {
        let b = bbox();
        assert_eq!(Handle::TopLeft.position(&b), Coord::new(100.0, 100.0));
        assert_eq!(Handle::BottomRight.position(&b), Coord::new(200.0, 160.0));
        assert_eq!(Handle::TopMid.position(&b), Coord::new(150.0, 100.0));
        assert_eq!(Handle::RightMid.position(&b), Coord::new(200.0, 130.0));
    }

    #[test]
    fn hit_tolerance_is_per_axis() {
        let b = bbox();
        assert_eq!(hit_handle(&b, Coord::new(108.0, 92.0), 8.0), Some(Handle::TopLeft));
        assert_eq!(hit_handle(&b, Coord::new(108.1, 100.0), 8.0), None);
        assert_eq!(hit_handle(&b, Coord::new(150.0, 130.0), 8.0), None);
    }

    #[test]
    fn top_left_moves_only_its_corner() {
        let out = Handle::TopLeft.apply(&bbox(), Coord::new(90.0, 80.0));
        assert_eq!(out.to_array(), [90.0, 80.0, 200.0, 160.0]);
    }

    #[test]
    fn from_index_round_trips() {
        for handle in Handle::ALL {
            assert_eq!(Handle::from_index(handle.index()), Some(handle));
        }
        assert_eq!(Handle::from_index(8), None);
    }

    #[test]
    fn handle_rects_are_centred() {
        let rects = handle_rects(&bbox(), 8.0);
        assert_eq!(rects[0].to_array(), [96.0, 96.0, 104.0, 104.0]);
    }
}
