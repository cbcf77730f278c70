use crate::consts::{BUTTON_ZOOM_IN, BUTTON_ZOOM_OUT, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};
use crate::session::ResultId;

use super::transform::{fit, pan, zoom, Size, Transform, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

/// Full-screen viewer state for one open result.
///
/// Lives only while the viewer is open. The result is referenced by id, so an
/// in-place regeneration keeps the current pan/zoom while switching to a
/// different result refits.
#[derive(Clone, Debug)]
pub struct ViewerState {
    result_id: ResultId,
    container: Size,
    image_size: Size,
    transform: Transform,
    /// Last pointer position while the drag gesture is held.
    drag_anchor: Option<Vec2>,
}

impl ViewerState {
    pub fn open(result_id: ResultId, container: Size, image_size: Size) -> Self {
        Self {
            result_id,
            container,
            image_size,
            transform: fit(container, image_size),
            drag_anchor: None,
        }
    }

    pub fn result_id(&self) -> ResultId {
        self.result_id
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn image_size(&self) -> Size {
        self.image_size
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Point the viewer at a result. Refits only when the id changes.
    pub fn show(&mut self, result_id: ResultId, image_size: Size) {
        self.image_size = image_size;
        if result_id != self.result_id {
            self.result_id = result_id;
            self.drag_anchor = None;
            self.fit_to_screen();
        }
    }

    pub fn resize(&mut self, container: Size) {
        self.container = container;
        self.fit_to_screen();
    }

    pub fn fit_to_screen(&mut self) {
        self.transform = fit(self.container, self.image_size);
    }

    pub fn zoom_by(&mut self, factor: f32) {
        self.transform = zoom(self.transform, factor);
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(BUTTON_ZOOM_IN);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(BUTTON_ZOOM_OUT);
    }

    pub fn wheel(&mut self, direction: WheelDirection) {
        match direction {
            WheelDirection::Up => self.zoom_by(WHEEL_ZOOM_IN),
            WheelDirection::Down => self.zoom_by(WHEEL_ZOOM_OUT),
        }
    }

    pub fn press(&mut self, position: Vec2) {
        self.drag_anchor = Some(position);
    }

    /// Pan by the pointer movement since the last event, if dragging.
    pub fn pointer_moved(&mut self, position: Vec2) {
        if let Some(anchor) = self.drag_anchor {
            self.transform = pan(self.transform, position - anchor);
            self.drag_anchor = Some(position);
        }
    }

    pub fn release(&mut self) {
        self.drag_anchor = None;
    }

    /// Leaving the surface ends the drag exactly like a release.
    pub fn pointer_left(&mut self) {
        self.release();
    }
}
