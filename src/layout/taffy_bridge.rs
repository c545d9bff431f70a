//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Converts FlexNode properties to Taffy styles, runs layout computation,
//! and extracts results back to ComputedLayout.
//!
//! [`LayoutTree`] keeps the Taffy tree alive after the first computation so
//! a single node's max width can be changed and the tree re-laid out without
//! reading any component state again. The balancer measures through it.

use std::collections::HashMap;

use taffy::{
    AvailableSpace, Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    LengthPercentage, NodeId, Rect, Size, Style, TaffyTree,
};
use tracing::warn;

use crate::engine::arrays::{balance, core, text};
use crate::engine::{get_allocated_indices, get_flex_node};
use crate::types::{ComponentType, Dimension, FlexDirection, TextWrap};

use super::text_measure::{max_content_width, min_content_width, string_width, wrap_text};
use super::types::ComputedLayout;

// =============================================================================
// CONVERSIONS
// =============================================================================

/// Convert our Dimension to Taffy's Dimension.
fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Cells(n) => TaffyDimension::Length(n as f32),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::Row => TaffyFlexDirection::Row,
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

/// Build a Taffy Style from a FlexNode.
fn build_style(idx: usize) -> Style {
    let Some(node) = get_flex_node(idx) else {
        return Style::default();
    };

    let mut style = Style {
        display: Display::Flex,
        flex_direction: to_taffy_flex_direction(FlexDirection::from(
            node.flex_direction.get().unwrap_or_default(),
        )),
        flex_grow: node.flex_grow.get().unwrap_or_default(),
        size: Size {
            width: to_taffy_dimension(node.width.get().unwrap_or_default()),
            height: to_taffy_dimension(node.height.get().unwrap_or_default()),
        },
        min_size: Size {
            width: to_taffy_dimension(node.min_width.get().unwrap_or_default()),
            height: TaffyDimension::Auto,
        },
        max_size: Size {
            width: to_taffy_dimension(node.max_width.get().unwrap_or_default()),
            height: TaffyDimension::Auto,
        },
        padding: Rect {
            top: LengthPercentage::Length(node.padding_top.get().unwrap_or_default() as f32),
            right: LengthPercentage::Length(node.padding_right.get().unwrap_or_default() as f32),
            bottom: LengthPercentage::Length(node.padding_bottom.get().unwrap_or_default() as f32),
            left: LengthPercentage::Length(node.padding_left.get().unwrap_or_default() as f32),
        },
        ..Default::default()
    };

    // Text uses the measure function, never an explicit size
    if core::get_component_type(idx) == ComponentType::Text {
        style.size = Size::auto();
    }

    style
}

/// A node is laid out only if it and all of its ancestors are visible.
fn is_displayed(idx: usize) -> bool {
    let mut current = Some(idx);
    while let Some(i) = current {
        if !core::get_visible(i) {
            return false;
        }
        current = core::get_parent_index(i);
    }
    true
}

// =============================================================================
// TEXT MEASUREMENT
// =============================================================================

/// Text snapshot attached to Taffy leaves.
#[derive(Debug, Clone)]
pub struct TextContext {
    pub content: String,
    pub wrap: TextWrap,
}

/// Measure function for text content.
fn measure_text(
    ctx: &TextContext,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) -> Size<f32> {
    if ctx.content.is_empty() {
        return Size {
            width: known_dimensions.width.unwrap_or(0.0),
            height: known_dimensions.height.unwrap_or(0.0),
        };
    }

    let wrap_width = match ctx.wrap {
        TextWrap::NoWrap => None,
        TextWrap::Wrap => match (known_dimensions.width, available_space.width) {
            (Some(w), _) | (None, AvailableSpace::Definite(w)) => Some((w.floor() as usize).max(1)),
            (None, AvailableSpace::MinContent) => Some(min_content_width(&ctx.content).max(1)),
            (None, AvailableSpace::MaxContent) => None,
        },
    };

    // Unwrapped: one line per explicit line
    let Some(wrap_width) = wrap_width else {
        return Size {
            width: known_dimensions.width.unwrap_or(max_content_width(&ctx.content) as f32),
            height: known_dimensions.height.unwrap_or(ctx.content.split('\n').count() as f32),
        };
    };

    let lines = wrap_text(&ctx.content, wrap_width);
    let widest = lines.iter().map(|line| string_width(line)).max().unwrap_or(0);

    Size {
        width: known_dimensions.width.unwrap_or(widest as f32),
        height: known_dimensions.height.unwrap_or(lines.len() as f32),
    }
}

// =============================================================================
// LAYOUT TREE
// =============================================================================

/// A built Taffy tree for every displayed component.
///
/// Component state is read once, in [`LayoutTree::build`]. After that the
/// tree only changes through [`LayoutTree::set_max_width`], and sizes are
/// recomputed lazily on the next read.
pub struct LayoutTree {
    tree: TaffyTree<TextContext>,
    nodes: HashMap<usize, NodeId>,
    /// max width from the FlexNode, restored when an inline width is cleared
    base_max_width: HashMap<usize, TaffyDimension>,
    roots: Vec<usize>,
    available: Size<AvailableSpace>,
    dirty: bool,
}

impl LayoutTree {
    /// Build the tree from the current component arrays.
    ///
    /// Inline max widths written by the balancer override FlexNode max widths.
    /// When called from a derived, this creates dependencies on every slot read.
    pub fn build(viewport_width: u16, viewport_height: u16, constrain_height: bool) -> Self {
        let displayed: Vec<usize> = get_allocated_indices()
            .into_iter()
            .filter(|&idx| is_displayed(idx))
            .collect();

        let mut tree: TaffyTree<TextContext> = TaffyTree::new();
        let mut nodes = HashMap::new();
        let mut base_max_width = HashMap::new();

        // First pass: Create all nodes (without children)
        for &idx in &displayed {
            let mut style = build_style(idx);
            base_max_width.insert(idx, style.max_size.width);
            if let Some(width) = balance::get_inline_max_width(idx) {
                style.max_size.width = TaffyDimension::Length(width);
            }

            let created = if core::get_component_type(idx) == ComponentType::Text {
                let ctx = TextContext {
                    content: text::get_text_content(idx),
                    wrap: text::get_text_wrap(idx),
                };
                tree.new_leaf_with_context(style, ctx)
            } else {
                tree.new_leaf(style)
            };

            match created {
                Ok(node) => {
                    nodes.insert(idx, node);
                }
                Err(err) => warn!(index = idx, %err, "failed to create layout node"),
            }
        }

        // Second pass: Build parent-child relationships
        let mut roots = Vec::new();
        for &idx in &displayed {
            let Some(&child) = nodes.get(&idx) else { continue };
            match core::get_parent_index(idx).and_then(|parent| nodes.get(&parent).copied()) {
                Some(parent) => {
                    if let Err(err) = tree.add_child(parent, child) {
                        warn!(index = idx, %err, "failed to attach layout node");
                    }
                }
                None => roots.push(idx),
            }
        }

        let available = Size {
            width: AvailableSpace::Definite(viewport_width as f32),
            height: if constrain_height {
                AvailableSpace::Definite(viewport_height as f32)
            } else {
                AvailableSpace::MaxContent
            },
        };

        Self {
            tree,
            nodes,
            base_max_width,
            roots,
            available,
            dirty: true,
        }
    }

    /// Is `index` part of this tree?
    pub fn contains(&self, index: usize) -> bool {
        self.nodes.contains_key(&index)
    }

    /// Apply (or clear) an inline max width on `index`.
    pub fn set_max_width(&mut self, index: usize, width: Option<f32>) {
        let Some(&node) = self.nodes.get(&index) else { return };
        let Ok(current) = self.tree.style(node) else { return };

        let mut style = current.clone();
        style.max_size.width = match width {
            Some(width) => TaffyDimension::Length(width),
            None => self
                .base_max_width
                .get(&index)
                .copied()
                .unwrap_or(TaffyDimension::Auto),
        };

        match self.tree.set_style(node, style) {
            Ok(()) => self.dirty = true,
            Err(err) => warn!(index, %err, "failed to update layout style"),
        }
    }

    /// Run layout for every root.
    pub fn compute(&mut self) {
        let available = self.available;
        let mut measure_fn = |known_dimensions: Size<Option<f32>>,
                              available_space: Size<AvailableSpace>,
                              _node_id: NodeId,
                              context: Option<&mut TextContext>,
                              _style: &Style| {
            match context {
                Some(ctx) => measure_text(ctx, known_dimensions, available_space),
                None => Size::ZERO,
            }
        };

        for root in &self.roots {
            if let Some(&node) = self.nodes.get(root) {
                if let Err(err) = self.tree.compute_layout_with_measure(node, available, &mut measure_fn) {
                    warn!(root = *root, %err, "layout computation failed");
                }
            }
        }
        self.dirty = false;
    }

    /// Current (width, height) of `index`, recomputing if the tree changed.
    pub fn size(&mut self, index: usize) -> Option<(f32, f32)> {
        if self.dirty {
            self.compute();
        }
        let node = *self.nodes.get(&index)?;
        let layout = self.tree.layout(node).ok()?;
        Some((layout.size.width, layout.size.height))
    }

    /// Extract the computed layout into parallel arrays.
    pub fn to_computed(&mut self) -> ComputedLayout {
        if self.dirty {
            self.compute();
        }

        let Some(max_index) = self.nodes.keys().max().copied() else {
            return ComputedLayout::new();
        };
        let array_size = max_index + 1;

        let mut result = ComputedLayout {
            x: vec![0; array_size],
            y: vec![0; array_size],
            width: vec![0; array_size],
            height: vec![0; array_size],
            content_width: 0,
            content_height: 0,
        };

        for (&idx, &node) in &self.nodes {
            if let Ok(layout) = self.tree.layout(node) {
                result.x[idx] = layout.location.x.round() as u16;
                result.y[idx] = layout.location.y.round() as u16;
                result.width[idx] = layout.size.width.round() as u16;
                result.height[idx] = layout.size.height.round() as u16;
            }
        }

        if let Some(&first_root) = self.roots.first() {
            result.content_width = result.width[first_root];
            result.content_height = result.height[first_root];
        }

        result
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute layout for all allocated components using Taffy.
///
/// # Arguments
///
/// * `viewport_width` - Available width in terminal columns
/// * `viewport_height` - Available height in terminal rows
/// * `constrain_height` - If true, constrain to the viewport height
pub fn compute_layout_taffy(
    viewport_width: u16,
    viewport_height: u16,
    constrain_height: bool,
) -> ComputedLayout {
    LayoutTree::build(viewport_width, viewport_height, constrain_height).to_computed()
}
