//! Formatting bubble: visibility, position and active-state tracking.
//!
//! # State machine
//!
//! ```text
//!   Hidden ──valid selection──▶ Active ──collapse──▶ Fading
//!      ▲                          ▲                    │
//!      └──────── fade timer ──────┼────────────────────┘
//!                                 └── valid selection ─┘
//! ```
//!
//! A valid selection is non-collapsed, not part of an IME composition and
//! inside the editable article. Fade timers are never cancelled; when one
//! fires it only hides the toolbar if the state is still `Fading`.

use smol_str::SmolStr;

use crate::actions::FormatKind;
use crate::timer::{DeferredQueue, Millis};
use crate::tree::{AncestorSet, NodeTree, scan_ancestors};
use crate::types::{Point, Rect, SelectionSnapshot, Viewport};

/// Position the toolbar is parked at while hidden.
pub const OFFSCREEN: Point = Point::new(-999.0, -999.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BubbleVisibility {
    #[default]
    Hidden,
    Active,
    Fading,
}

impl BubbleVisibility {
    /// Modifier class applied next to the toolbar's base class.
    pub fn class(self) -> Option<&'static str> {
        match self {
            BubbleVisibility::Hidden => None,
            BubbleVisibility::Active => Some("active"),
            BubbleVisibility::Fading => Some("fade"),
        }
    }
}

/// Which toolbar controls are lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatFlags {
    pub bold: bool,
    pub italic: bool,
    pub quote: bool,
    pub link: bool,
}

impl FormatFlags {
    pub fn from_ancestors(ancestors: &AncestorSet) -> Self {
        Self {
            bold: ancestors.has_format(FormatKind::Bold),
            italic: ancestors.has_format(FormatKind::Italic),
            quote: ancestors.has_format(FormatKind::Quote),
            link: ancestors.has_format(FormatKind::Link),
        }
    }

    pub fn is_active(&self, kind: FormatKind) -> bool {
        match kind {
            FormatKind::Bold => self.bold,
            FormatKind::Italic => self.italic,
            FormatKind::Quote => self.quote,
            FormatKind::Link => self.link,
        }
    }
}

/// Everything needed to draw the toolbar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolbarState {
    pub visibility: BubbleVisibility,
    pub position: Point,
    pub flags: FormatFlags,
}

impl Default for ToolbarState {
    fn default() -> Self {
        Self {
            visibility: BubbleVisibility::Hidden,
            position: OFFSCREEN,
            flags: FormatFlags::default(),
        }
    }
}

/// Toolbar anchor for a selection rectangle.
///
/// Horizontally centred on the range, `offset` pixels above its top edge,
/// both in page coordinates.
pub fn bubble_position(rect: &Rect, viewport: &Viewport, offset: f64) -> Point {
    Point::new(
        rect.center_x() + viewport.scroll_x,
        rect.top - offset + viewport.scroll_y,
    )
}

/// Tracks the selection and decides what the toolbar shows.
#[derive(Debug, Clone)]
pub struct BubbleController {
    state: ToolbarState,
    ancestors: AncestorSet,
    /// Whether the previously observed selection was collapsed. None until
    /// the first observation.
    last_collapsed: Option<bool>,
    fade_timers: DeferredQueue,
    fade_delay: Millis,
    offset: f64,
    container_tag: SmolStr,
}

impl BubbleController {
    pub fn new(fade_delay: Millis, offset: f64, container_tag: impl Into<SmolStr>) -> Self {
        Self {
            state: ToolbarState::default(),
            ancestors: AncestorSet::default(),
            last_collapsed: None,
            fade_timers: DeferredQueue::default(),
            fade_delay,
            offset,
            container_tag: container_tag.into(),
        }
    }

    pub fn state(&self) -> &ToolbarState {
        &self.state
    }

    pub fn visibility(&self) -> BubbleVisibility {
        self.state.visibility
    }

    /// Ancestor set of the last scanned selection.
    pub fn ancestors(&self) -> &AncestorSet {
        &self.ancestors
    }

    /// Process a selection change.
    ///
    /// Starts the fade when a range just collapsed, and shows the toolbar
    /// over a valid selection.
    pub fn observe<T: NodeTree + ?Sized>(
        &mut self,
        tree: &T,
        selection: &SelectionSnapshot<T::Node>,
        viewport: &Viewport,
        composing: bool,
        now: Millis,
    ) {
        if selection.collapsed && self.last_collapsed == Some(false) {
            self.begin_fade(now);
        }

        if !selection.collapsed && !composing {
            if let Some(focus) = &selection.focus {
                self.ancestors = scan_ancestors(tree, focus);

                if self.ancestors.contains(&self.container_tag) {
                    self.state.flags = FormatFlags::from_ancestors(&self.ancestors);
                    if let Some(rect) = &selection.rect {
                        self.state.position = bubble_position(rect, viewport, self.offset);
                    }
                    if self.state.visibility != BubbleVisibility::Active {
                        tracing::trace!(target: "zenpen::bubble", "toolbar shown");
                    }
                    self.state.visibility = BubbleVisibility::Active;
                }
            }
        }

        self.last_collapsed = Some(selection.collapsed);
    }

    /// Recompute active-state flags without touching visibility.
    pub fn refresh_flags(&mut self, ancestors: AncestorSet) {
        self.state.flags = FormatFlags::from_ancestors(&ancestors);
        self.ancestors = ancestors;
    }

    /// Re-anchor a visible toolbar after a resize or scroll.
    pub fn reposition(&mut self, rect: Option<&Rect>, viewport: &Viewport) -> bool {
        if self.state.visibility == BubbleVisibility::Hidden {
            return false;
        }
        let Some(rect) = rect else {
            return false;
        };
        self.state.position = bubble_position(rect, viewport, self.offset);
        true
    }

    /// Treat the current selection as an open range, so the next collapse
    /// starts a fade.
    pub fn mark_selection_open(&mut self) {
        self.last_collapsed = Some(false);
    }

    fn begin_fade(&mut self, now: Millis) {
        tracing::trace!(target: "zenpen::bubble", now, "toolbar fading");
        self.state.visibility = BubbleVisibility::Fading;
        self.fade_timers.push(now, self.fade_delay);
    }

    /// Run due fade timers. Returns true if the toolbar was hidden.
    pub fn tick(&mut self, now: Millis) -> bool {
        let mut hidden = false;
        for deadline in self.fade_timers.take_due(now) {
            if self.state.visibility == BubbleVisibility::Fading {
                tracing::trace!(target: "zenpen::bubble", deadline, "toolbar hidden");
                self.state.visibility = BubbleVisibility::Hidden;
                self.state.position = OFFSCREEN;
                hidden = true;
            }
        }
        hidden
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        self.fade_timers.next_deadline()
    }
}
