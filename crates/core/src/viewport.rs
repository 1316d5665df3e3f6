//! Screen-space to grid-space conversion.
//!
//! The viewport offset is presentation-owned state: the front-end scrolls
//! it, the engine only reads it when a pointer-directed input arrives.

use std::sync::{Arc, Mutex};

use crate::types::Pos;

pub const TILE_PIXELS: i32 = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub offset_x: i32,
    pub offset_y: i32,
}

/// Pure linear transform from a screen pixel to the grid cell under it.
pub fn screen_to_grid(viewport: &Viewport, screen: Pos) -> Pos {
    Pos {
        y: (screen.y - viewport.offset_y) / TILE_PIXELS,
        x: (screen.x - viewport.offset_x) / TILE_PIXELS,
    }
}

/// Shared handle to the viewport offset. The presentation side calls
/// `set`, the engine calls `get` at query time and never mutates.
#[derive(Clone, Debug, Default)]
pub struct SharedViewport {
    inner: Arc<Mutex<Viewport>>,
}

impl SharedViewport {
    pub fn new(viewport: Viewport) -> Self {
        Self { inner: Arc::new(Mutex::new(viewport)) }
    }

    pub fn get(&self) -> Viewport {
        // Viewport is plain copyable data, so a poisoned lock still holds
        // a usable value.
        *self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set(&self, viewport: Viewport) {
        *self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = viewport;
    }
}
