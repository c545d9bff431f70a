//! FlexNode - Persistent flexbox layout object with reactive Slot properties.
//!
//! Each component gets one FlexNode that lives for the component's entire lifetime.
//! Properties are Slots that bind to user props (signals/getters/static values,
//! see [`bind_slot`](crate::engine::arrays::bind_slot)).
//! The layout bridge reads `.get()` on properties, creating reactive dependencies.

use spark_signals::{slot, Slot};

use crate::types::Dimension;

/// FlexNode - Persistent layout object with reactive Slot properties.
///
/// # Property Categories
///
/// - **Container (1)**: flexDirection
/// - **Item (1)**: flexGrow
/// - **Dimensions (4)**: width, height, minWidth, maxWidth
/// - **Spacing (4)**: padding
///
/// The balancer never writes `max_width`; its constraint lives in the
/// inline style column and overrides this property while set.
pub struct FlexNode {
    /// Component index in parallel arrays.
    pub index: usize,

    /// Flex direction: 0=column, 1=row
    pub flex_direction: Slot<u8>,

    /// Flex grow factor (default 0).
    pub flex_grow: Slot<f32>,

    /// Width: Auto, Cells(n), or Percent(n).
    pub width: Slot<Dimension>,

    /// Height: Auto, Cells(n), or Percent(n).
    pub height: Slot<Dimension>,

    /// Minimum width constraint.
    pub min_width: Slot<Dimension>,

    /// Maximum width constraint (Auto = no max).
    pub max_width: Slot<Dimension>,

    pub padding_top: Slot<u16>,
    pub padding_right: Slot<u16>,
    pub padding_bottom: Slot<u16>,
    pub padding_left: Slot<u16>,
}

impl FlexNode {
    /// Create a new FlexNode with default values.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            flex_direction: slot(Some(0)), // column
            flex_grow: slot(Some(0.0)),
            width: slot(Some(Dimension::Auto)),
            height: slot(Some(Dimension::Auto)),
            min_width: slot(Some(Dimension::Auto)),
            max_width: slot(Some(Dimension::Auto)),
            padding_top: slot(Some(0)),
            padding_right: slot(Some(0)),
            padding_bottom: slot(Some(0)),
            padding_left: slot(Some(0)),
        }
    }

    /// Reset every property to its default.
    ///
    /// Called when the component is destroyed via `release_index()`. Drops
    /// any signal or getter a property was pointing at.
    pub fn disconnect(&self) {
        self.flex_direction.set_value(0);
        self.flex_grow.set_value(0.0);
        self.width.set_value(Dimension::Auto);
        self.height.set_value(Dimension::Auto);
        self.min_width.set_value(Dimension::Auto);
        self.max_width.set_value(Dimension::Auto);
        self.padding_top.set_value(0);
        self.padding_right.set_value(0);
        self.padding_bottom.set_value(0);
        self.padding_left.set_value(0);
    }
}
