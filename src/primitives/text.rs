//! Text Primitive - Display wrapped text.
//!
//! A pure display component for text content. Cannot have children.
//! Text wraps at word boundaries to the width its parent gives it, which is
//! what a balancer narrows.
//!
//! # Example
//!
//! ```ignore
//! use spark_balancer::primitives::{text, PropValue, TextProps};
//! use spark_signals::signal;
//!
//! // Static text
//! text(TextProps {
//!     content: "Hello, World!".into(),
//!     ..Default::default()
//! });
//!
//! // Reactive text
//! let count = signal(0);
//! let count_clone = count.clone();
//! text(TextProps {
//!     content: PropValue::getter(move || format!("Count: {}", count_clone.get())),
//!     ..Default::default()
//! });
//!
//! count.set(42);
//! ```

use crate::engine::{
    allocate_index, release_index, create_flex_node,
    get_current_parent_index,
};
use crate::engine::arrays::{bind_slot, core, text as text_arrays};
use crate::types::ComponentType;
use super::types::{Cleanup, TextProps};

// =============================================================================
// Text Component
// =============================================================================

/// Create a text display component.
///
/// Returns a cleanup function that releases resources when called.
pub fn text(props: TextProps) -> Cleanup {
    // 1. ALLOCATE INDEX
    let index = allocate_index(props.id.as_deref());

    // 2. CREATE FLEXNODE - Even text needs layout properties
    let flex_node = create_flex_node(index);

    // 3. CORE SETUP - Type, parent
    core::set_component_type(index, ComponentType::Text);
    if let Some(parent) = get_current_parent_index() {
        core::set_parent_index(index, Some(parent));
    }

    // 4. BIND VISIBILITY
    if let Some(visible) = props.visible {
        bind_slot(&core::visible_slot(index), visible);
    }

    // 5. BIND TEXT CONTENT
    bind_slot(&text_arrays::text_content_slot(index), props.content);

    if let Some(wrap) = props.wrap {
        bind_slot(&text_arrays::text_wrap_slot(index), wrap);
    }

    // 6. BIND FLEXNODE - Item properties (text is never a container)
    if let Some(grow) = props.grow {
        bind_slot(&flex_node.flex_grow, grow);
    }
    if let Some(w) = props.width {
        bind_slot(&flex_node.width, w);
    }
    if let Some(max_w) = props.max_width {
        bind_slot(&flex_node.max_width, max_w);
    }

    // 7. RETURN CLEANUP
    Box::new(move || release_index(index))
}

// =============================================================================
// Tests
// =============================================================================
