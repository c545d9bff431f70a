//! Layout - Taffy-backed flexbox layout with word-wrapping text.
//!
//! - [`taffy_bridge`] - FlexNode → Taffy conversion and the re-layoutable [`LayoutTree`]
//! - [`text_measure`] - Terminal cell widths and word-break wrapping
//! - [`types`] - [`ComputedLayout`] output arrays

pub mod taffy_bridge;
pub mod text_measure;
pub mod types;

pub use taffy_bridge::{compute_layout_taffy, LayoutTree, TextContext};
pub use text_measure::{measure_text_height, string_width, wrap_text};
pub use types::ComputedLayout;

/// Compute layout for all allocated components.
///
/// Reads every slot the layout depends on, so calling this from a derived
/// or effect tracks the whole tree.
pub fn compute_layout(viewport_width: u16, viewport_height: u16, constrain_height: bool) -> ComputedLayout {
    compute_layout_taffy(viewport_width, viewport_height, constrain_height)
}
