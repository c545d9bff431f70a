//! FlexNode Registry - Manages FlexNode lifecycle (creation/destruction).
//!
//! Each component gets one persistent FlexNode that lives for the component's
//! entire lifetime. This registry tracks the index → FlexNode mapping.
//!
//! FlexNodes are created by primitives (box, text, balancer) after `allocate_index()`,
//! and destroyed by `release_index()` cleanup.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::flex_node::FlexNode;

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Map component index → FlexNode
    static FLEX_NODES: RefCell<HashMap<usize, Rc<FlexNode>>> = RefCell::new(HashMap::new());
}

// =============================================================================
// FlexNode Lifecycle
// =============================================================================

/// Create a FlexNode for the given component index.
///
/// Returns the existing node if one was already created for `index`.
pub fn create_flex_node(index: usize) -> Rc<FlexNode> {
    FLEX_NODES.with(|nodes| {
        nodes
            .borrow_mut()
            .entry(index)
            .or_insert_with(|| Rc::new(FlexNode::new(index)))
            .clone()
    })
}

/// Destroy FlexNode and reset its properties.
///
/// The node is removed before it is disconnected so effects woken by the
/// reset never observe a half-removed registry.
pub fn destroy_flex_node(index: usize) {
    let removed = FLEX_NODES.with(|nodes| nodes.borrow_mut().remove(&index));
    if let Some(node) = removed {
        node.disconnect();
    }
}

/// Get FlexNode for a component index.
pub fn get_flex_node(index: usize) -> Option<Rc<FlexNode>> {
    FLEX_NODES.with(|nodes| nodes.borrow().get(&index).cloned())
}

/// Reset all FlexNodes (for testing).
pub fn reset_flex_nodes() {
    let drained: Vec<Rc<FlexNode>> =
        FLEX_NODES.with(|nodes| nodes.borrow_mut().drain().map(|(_, node)| node).collect());
    for node in drained {
        node.disconnect();
    }
}

/// Get the number of FlexNodes currently in the registry.
pub fn flex_node_count() -> usize {
    FLEX_NODES.with(|nodes| nodes.borrow().len())
}
