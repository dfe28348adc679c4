//! Presentation and preference collaborators.
//!
//! Controllers never touch rendering internals. They address elements through
//! opaque [`Handle`]s and push every visual change through [`Presentation`].

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::card_engine::{geometry::Rect, models::Severity};

/// Opaque reference to a rendered element (card, drop zone, delete zone, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Handle(pub u32);

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle#{}", self.0)
    }
}

pub trait Presentation {
    /// Current on-screen rectangle of the element, including any applied transform.
    fn bounding_rect(&self, handle: Handle) -> Rect;

    /// Replace the element's transform with a translation and uniform scale.
    fn set_transform(&mut self, handle: Handle, dx: f32, dy: f32, scale: f32);

    fn set_z_index(&mut self, handle: Handle, z: i32);

    fn set_opacity(&mut self, handle: Handle, opacity: f32);

    fn set_visible(&mut self, handle: Handle, visible: bool);

    /// Show a transient message (toast) for `duration_ms`.
    fn notify(&mut self, message: &str, severity: Severity, duration_ms: u64);
}

/// Persisted user preference flags.
pub trait Preferences {
    fn flag(&self, key: &str) -> bool;
    fn set_flag(&mut self, key: &str, value: bool);
}

/// Preference key set once the intro banner has been dropped on the delete zone.
pub const HIDE_INTRO: &str = "hide_intro";

#[cfg(test)]
pub(crate) mod fake {
    //! Recording presentation used by the unit tests.

    use std::collections::HashMap;

    use super::*;

    #[derive(Debug, Default)]
    pub struct RecordingUi {
        pub base: HashMap<Handle, Rect>,
        pub transforms: HashMap<Handle, (f32, f32, f32)>,
        pub z_index: HashMap<Handle, i32>,
        pub opacity: HashMap<Handle, f32>,
        pub visible: HashMap<Handle, bool>,
        pub notifications: Vec<(String, Severity, u64)>,
    }

    impl RecordingUi {
        pub fn with(mut self, handle: Handle, rect: Rect) -> Self {
            self.base.insert(handle, rect);
            self
        }

        pub fn transform(&self, handle: Handle) -> (f32, f32, f32) {
            self.transforms.get(&handle).copied().unwrap_or((0.0, 0.0, 1.0))
        }
    }

    impl Presentation for RecordingUi {
        fn bounding_rect(&self, handle: Handle) -> Rect {
            let rect = self.base.get(&handle).copied().unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
            let (dx, dy, _) = self.transform(handle);
            rect.translated(dx, dy)
        }

        fn set_transform(&mut self, handle: Handle, dx: f32, dy: f32, scale: f32) {
            self.transforms.insert(handle, (dx, dy, scale));
        }

        fn set_z_index(&mut self, handle: Handle, z: i32) {
            self.z_index.insert(handle, z);
        }

        fn set_opacity(&mut self, handle: Handle, opacity: f32) {
            self.opacity.insert(handle, opacity);
        }

        fn set_visible(&mut self, handle: Handle, visible: bool) {
            self.visible.insert(handle, visible);
        }

        fn notify(&mut self, message: &str, severity: Severity, duration_ms: u64) {
            self.notifications.push((message.to_string(), severity, duration_ms));
        }
    }
}
