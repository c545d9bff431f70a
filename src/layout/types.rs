//! Layout Types
//!
//! Output types for the layout computation.

/// Computed layout result.
///
/// Contains parallel arrays indexed by component index.
/// Each index maps to the computed position and size of that component.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedLayout {
    /// X position (column) of each component.
    pub x: Vec<u16>,

    /// Y position (row) of each component.
    pub y: Vec<u16>,

    /// Width of each component.
    pub width: Vec<u16>,

    /// Height of each component.
    pub height: Vec<u16>,

    /// Width of the first root.
    pub content_width: u16,

    /// Height of the first root.
    pub content_height: u16,
}

impl ComputedLayout {
    /// Create a new empty computed layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the position and size of a component.
    ///
    /// Returns (x, y, width, height) or zeros if index is out of bounds.
    pub fn get(&self, index: usize) -> (u16, u16, u16, u16) {
        (
            self.x.get(index).copied().unwrap_or(0),
            self.y.get(index).copied().unwrap_or(0),
            self.width.get(index).copied().unwrap_or(0),
            self.height.get(index).copied().unwrap_or(0),
        )
    }

    /// Get the size of a component as (width, height).
    pub fn size(&self, index: usize) -> (u16, u16) {
        let (_, _, width, height) = self.get(index);
        (width, height)
    }
}
