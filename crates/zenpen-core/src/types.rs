//! Geometry and selection snapshot types shared by the core and its hosts.

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Clone, Debug, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Horizontal midpoint.
    pub fn center_x(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// A point in page coordinates.
#[derive(Clone, Debug, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Scroll offsets and visible height of the page.
#[derive(Clone, Debug, Copy, PartialEq, Default)]
pub struct Viewport {
    pub scroll_x: f64,
    pub scroll_y: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_x: f64, scroll_y: f64, height: f64) -> Self {
        Self {
            scroll_x,
            scroll_y,
            height,
        }
    }

    /// Vertical centre of the visible area, in viewport coordinates.
    pub fn center_y(&self) -> f64 {
        self.height / 2.0
    }
}

/// What the host reports about the current selection.
///
/// `rect` is the bounding rectangle of the first range, absent when the
/// selection has no ranges.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSnapshot<N> {
    pub focus: Option<N>,
    pub collapsed: bool,
    pub rect: Option<Rect>,
}

impl<N> Default for SelectionSnapshot<N> {
    fn default() -> Self {
        Self {
            focus: None,
            collapsed: true,
            rect: None,
        }
    }
}

impl<N> SelectionSnapshot<N> {
    /// A non-collapsed selection ending in `focus`.
    pub fn range(focus: N, rect: Rect) -> Self {
        Self {
            focus: Some(focus),
            collapsed: false,
            rect: Some(rect),
        }
    }

    /// A caret in `focus`.
    pub fn caret(focus: N, rect: Rect) -> Self {
        Self {
            focus: Some(focus),
            collapsed: true,
            rect: Some(rect),
        }
    }

    pub fn has_range(&self) -> bool {
        self.rect.is_some()
    }
}

/// Where an event originated, as far as the bubble cares.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub enum EventOrigin {
    /// Anywhere in the document outside the toolbar's input controls.
    #[default]
    Document,
    /// The link input, the link control, or the toolbar's input group.
    ToolbarInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_geometry() {
        let rect = Rect::new(100.0, 40.0, 200.0, 60.0);
        assert_eq!(rect.center_x(), 150.0);
        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 20.0);
    }

    #[test]
    fn test_selection_constructors() {
        let sel = SelectionSnapshot::range(1u32, Rect::default());
        assert!(!sel.collapsed);
        assert!(sel.has_range());

        let sel = SelectionSnapshot::caret(1u32, Rect::default());
        assert!(sel.collapsed);

        let sel: SelectionSnapshot<u32> = SelectionSnapshot::default();
        assert!(sel.collapsed);
        assert!(sel.focus.is_none());
        assert!(!sel.has_range());
    }
}
