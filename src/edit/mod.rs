//! Pointer-driven box editing.
//!
//! [`BoxEditor`] turns primary-pointer down/move/up events and secondary
//! clicks, all in pixel space, into changes to an [`AnnotationStore`]. It
//! owns the selection and the in-progress gesture; the store owns the
//! records.
//!
//! ```
//! use doclabel::edit::{BoxEditor, EditEvent, EditorConfig};
//! use doclabel::ir::{Coord, Zoom};
//! use doclabel::store::AnnotationStore;
//!
//! let mut store = AnnotationStore::new();
//! let mut editor = BoxEditor::new(EditorConfig::default());
//! editor.set_zoom(Zoom::new(2.0));
//!
//! editor.pointer_down(&mut store, Coord::new(20.0, 20.0));
//! editor.pointer_move(&mut store, Coord::new(120.0, 60.0));
//! let event = editor.pointer_up(&mut store, Coord::new(120.0, 60.0));
//!
//! assert!(matches!(event, EditEvent::Created(_)));
//! assert_eq!(store.iter().next().unwrap().bbox.to_array(), [10.0, 10.0, 60.0, 30.0]);
//! ```

mod handle;

pub use handle::{handle_rects, hit_handle, Edges, Handle};

use log::debug;

use crate::ir::{Annotation, AnnotationId, BBoxXYXY, Coord, Label, Pixel, Zoom};
use crate::store::AnnotationStore;

/// Pixel tolerance around a handle centre, per axis.
pub const HANDLE_SIZE: f64 = 8.0;

/// A drawn box must exceed this many pixels on both axes to be kept.
pub const MIN_BOX_SIZE: f64 = 10.0;

/// Editor tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorConfig {
    pub handle_size: f64,
    pub min_box_size: f64,
    /// Label given to newly drawn boxes.
    pub label: Label,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            handle_size: HANDLE_SIZE,
            min_box_size: MIN_BOX_SIZE,
            label: Label::Title,
        }
    }
}

/// The gesture in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum EditState {
    #[default]
    Idle,
    /// A new box anchored at `anchor`, currently reaching `current`.
    Drawing {
        anchor: Coord<Pixel>,
        current: Coord<Pixel>,
    },
    /// The selected box follows the pointer at a fixed offset from its
    /// top-left corner.
    Dragging { id: AnnotationId, offset: Coord<Pixel> },
    Resizing { id: AnnotationId, handle: Handle },
}

/// What an input event did, for the host to redraw or log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditEvent {
    Created(AnnotationId),
    /// A drawn box was too small and dropped.
    Discarded,
    Moved(AnnotationId),
    Resized(AnnotationId),
    /// Selection changed; `None` means cleared.
    Selected(Option<AnnotationId>),
    Deleted(AnnotationId),
    None,
}

/// Selection and gesture state for one page view.
#[derive(Clone, Debug)]
pub struct BoxEditor {
    config: EditorConfig,
    state: EditState,
    selected: Option<AnnotationId>,
    page: usize,
    zoom: Zoom,
}

impl BoxEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            state: EditState::Idle,
            selected: None,
            page: 0,
            zoom: Zoom::default(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn selected(&self) -> Option<AnnotationId> {
        self.selected
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    /// Switches page, dropping selection and any gesture.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.clear_selection();
    }

    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.zoom = zoom;
    }

    /// Sets the label used for the next drawn box.
    pub fn set_label(&mut self, label: Label) {
        self.config.label = label;
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.state = EditState::Idle;
    }

    /// Primary button pressed.
    ///
    /// Resize handles of the selected box win over its body; anywhere else
    /// starts a new box.
    pub fn pointer_down(&mut self, store: &mut AnnotationStore, point: Coord<Pixel>) -> EditEvent {
        let z = self.zoom.factor();

        if let Some((id, bbox_px)) = self.selected_bbox_px(store) {
            if let Some(handle) = hit_handle(&bbox_px, point, self.config.handle_size) {
                debug!("resize {} by handle {}", id, handle.index());
                self.state = EditState::Resizing { id, handle };
                return EditEvent::None;
            }
            if bbox_px.contains(&point) {
                let offset = point.relative_to(&bbox_px.min);
                debug!("drag {}", id);
                self.state = EditState::Dragging { id, offset };
                return EditEvent::None;
            }
        }

        debug!("draw from ({:.1}, {:.1}) at zoom {}", point.x, point.y, z);
        self.state = EditState::Drawing {
            anchor: point,
            current: point,
        };
        EditEvent::None
    }

    /// Pointer moved with the primary button held.
    pub fn pointer_move(&mut self, store: &mut AnnotationStore, point: Coord<Pixel>) -> EditEvent {
        let z = self.zoom.factor();
        match self.state {
            EditState::Idle => EditEvent::None,
            EditState::Drawing { anchor, .. } => {
                self.state = EditState::Drawing {
                    anchor,
                    current: point,
                };
                EditEvent::None
            }
            EditState::Dragging { id, offset } => match store.get_mut(id) {
                Some(ann) => {
                    let bbox_px = ann.bbox.to_pixel(z);
                    let w = bbox_px.max.x - bbox_px.min.x;
                    let h = bbox_px.max.y - bbox_px.min.y;
                    let x0 = point.x - offset.x;
                    let y0 = point.y - offset.y;
                    ann.bbox = BBoxXYXY::<Pixel>::from_xyxy(x0, y0, x0 + w, y0 + h).to_doc(z);
                    EditEvent::Moved(id)
                }
                None => self.abandon(),
            },
            EditState::Resizing { id, handle } => match store.get_mut(id) {
                Some(ann) => {
                    ann.bbox = handle.apply(&ann.bbox.to_pixel(z), point).to_doc(z);
                    EditEvent::Resized(id)
                }
                None => self.abandon(),
            },
        }
    }

    /// Primary button released. Commits or discards a drawn box.
    pub fn pointer_up(&mut self, store: &mut AnnotationStore, point: Coord<Pixel>) -> EditEvent {
        let state = std::mem::take(&mut self.state);
        match state {
            EditState::Idle => EditEvent::None,
            EditState::Drawing { anchor, current } => {
                // the last move decides the extent; a release without moves uses its own point
                let corner = if current == anchor { point } else { current };
                let draft = BBoxXYXY::<Pixel>::from_corners(anchor, corner);
                if draft.width().abs() > self.config.min_box_size
                    && draft.height().abs() > self.config.min_box_size
                {
                    let bbox = draft.to_doc(self.zoom.factor()).normalized();
                    let id = store.add(Annotation::new(self.page, bbox, self.config.label));
                    debug!("created {} ({}) on page {}", id, self.config.label, self.page);
                    EditEvent::Created(id)
                } else {
                    debug!(
                        "discarded {:.1}x{:.1} draft",
                        draft.width().abs(),
                        draft.height().abs()
                    );
                    EditEvent::Discarded
                }
            }
            EditState::Dragging { id, .. } => EditEvent::Moved(id),
            EditState::Resizing { id, .. } => match store.get_mut(id) {
                Some(ann) => {
                    ann.bbox = ann.bbox.normalized();
                    EditEvent::Resized(id)
                }
                None => EditEvent::None,
            },
        }
    }

    /// Secondary click: selects the first annotation under `point` on the
    /// current page, or clears the selection.
    pub fn select_at(&mut self, store: &AnnotationStore, point: Coord<Pixel>) -> EditEvent {
        let hit = store.hit_test(self.page, &point.to_doc(self.zoom.factor()));
        self.selected = hit;
        self.state = EditState::Idle;
        EditEvent::Selected(hit)
    }

    /// Removes the selected annotation, if any.
    pub fn delete_selected(&mut self, store: &mut AnnotationStore) -> EditEvent {
        let Some(id) = self.selected.take() else {
            return EditEvent::None;
        };
        self.state = EditState::Idle;
        match store.remove(id) {
            Some(_) => EditEvent::Deleted(id),
            None => EditEvent::Selected(None),
        }
    }

    /// Rectangle of the box being drawn, for overlay rendering.
    pub fn draft_rect(&self) -> Option<BBoxXYXY<Pixel>> {
        match self.state {
            EditState::Drawing { anchor, current } => Some(BBoxXYXY::from_corners(anchor, current)),
            _ => None,
        }
    }

    /// Handle markers of the selected box in pixel space.
    pub fn handle_rects(&self, store: &AnnotationStore) -> Option<[BBoxXYXY<Pixel>; 8]> {
        self.selected_bbox_px(store)
            .map(|(_, bbox)| handle_rects(&bbox, self.config.handle_size))
    }

    fn selected_bbox_px(&self, store: &AnnotationStore) -> Option<(AnnotationId, BBoxXYXY<Pixel>)> {
        let id = self.selected?;
        let ann = store.get(id).filter(|ann| ann.page == self.page)?;
        Some((id, ann.bbox.to_pixel(self.zoom.factor())))
    }

    // The selected record vanished from under the gesture.
    fn abandon(&mut self) -> EditEvent {
        self.state = EditState::Idle;
        self.selected = None;
        EditEvent::Selected(None)
    }
}

impl Default for BoxEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
