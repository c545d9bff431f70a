//! Balancer Primitive - Wrapper that balances the text inside it.
//!
//! The wrapper sits inside a container (its parent) and holds wrapped text.
//! It is balanced:
//!
//! 1. Once on creation, by marker only ([`BootstrapScript`]).
//! 2. Whenever the ratio or anything its layout reads changes (an effect).
//! 3. Whenever the container is observed to resize ([`ResizeObserver`]).
//!
//! Every pass goes through the process-wide slot. Failures are logged and
//! leave the wrapper unbalanced; nothing here panics.

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::effect;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::balancer::{clamp_ratio, install, invoke, BootstrapScript, DEFAULT_RATIO};
use crate::engine::{
    allocate_index, create_flex_node, get_current_parent_index, on_destroy, release_index,
};
use crate::engine::arrays::{balance, bind_slot, core};
use crate::pipeline::ResizeObserver;
use crate::types::ComponentType;
use super::box_primitive::{bind_padding, build_children};
use super::types::{BalancerProps, Cleanup, PropValue};

// =============================================================================
// Marker Attributes
// =============================================================================

/// Marker of the wrapper at `index`.
pub fn balance_id(index: usize) -> Option<String> {
    balance::get_balance_id(index)
}

/// Ratio in effect for the wrapper at `index`.
pub fn balance_ratio(index: usize) -> f32 {
    balance::get_balance_ratio(index)
}

/// Find a wrapper by marker.
pub fn find_balancer(id: &str) -> Option<usize> {
    balance::find_balancer(id)
}

/// Bootstrap for the wrapper at `index`, from its marker attributes.
pub fn bootstrap_script(index: usize) -> Option<BootstrapScript> {
    balance_id(index).map(|id| BootstrapScript::new(id, balance_ratio(index)))
}

fn rebalance(index: usize, marker: &str, ratio: &PropValue<f32>) {
    let ratio = clamp_ratio(ratio.get());
    balance::set_balance_ratio(index, ratio);
    if let Err(err) = invoke(marker, ratio, Some(index)) {
        warn!(index, %err, "balancer relayout failed");
    }
}

// =============================================================================
// Balancer Component
// =============================================================================

/// Create a balancer wrapper.
///
/// Returns a cleanup function that stops balancing and releases the
/// wrapper and its children.
pub fn balancer(props: BalancerProps) -> Cleanup {
    let marker = props.id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let ratio = props.ratio.unwrap_or(PropValue::Static(DEFAULT_RATIO));

    // 1. ALLOCATE INDEX
    let index = allocate_index(None);

    // 2. CREATE FLEXNODE
    let flex_node = create_flex_node(index);

    // 3. CORE SETUP - Type, parent
    core::set_component_type(index, ComponentType::Balancer);
    let container = get_current_parent_index();
    core::set_parent_index(index, container);

    // 4. BIND VISIBILITY AND LAYOUT
    if let Some(visible) = props.visible {
        bind_slot(&core::visible_slot(index), visible);
    }
    if let Some(w) = props.width {
        bind_slot(&flex_node.width, w);
    }
    bind_padding(&flex_node, props.padding, [None, None, None, None]);

    // 5. MARKER ATTRIBUTES
    balance::set_balance_id(index, &marker);
    balance::set_balance_ratio(index, clamp_ratio(ratio.get()));

    // 6. RENDER CHILDREN
    build_children(index, props.children);

    // 7. BOOTSTRAP - first pass by marker, before effects attach
    let script = BootstrapScript::new(marker.clone(), balance::get_balance_ratio(index));
    debug!(index, source = %script.source(), "balancer bootstrap");
    if let Err(err) = script.run() {
        warn!(index, %err, "balancer bootstrap failed");
    }

    let alive = Rc::new(Cell::new(true));

    // 8. REBALANCE ON CHANGE - reinstall so dynamically created wrappers work
    let stop_update = {
        let alive = alive.clone();
        let marker = marker.clone();
        let ratio = ratio.clone();
        effect(move || {
            if !alive.get() {
                return;
            }
            install();
            rebalance(index, &marker, &ratio);
        })
    };

    // 9. REBALANCE ON RESIZE
    let observer = container.map(|container| {
        let alive = alive.clone();
        ResizeObserver::observe(container, move |_| {
            if alive.get() {
                rebalance(index, &marker, &ratio);
            }
        })
    });

    {
        let alive = alive.clone();
        on_destroy(index, move || {
            alive.set(false);
            stop_update();
            if let Some(mut observer) = observer {
                observer.disconnect();
            }
        });
    }

    // 10. RETURN CLEANUP
    Box::new(move || {
        alive.set(false);
        release_index(index);
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{get_allocated_count, reset_registry};
    use crate::engine::arrays::text as text_arrays;
    use crate::pipeline::{deliver_resize_observations, set_terminal_size};
    use crate::primitives::{box_primitive, text, BoxProps, TextProps};
    use crate::types::Dimension;
    use spark_signals::signal;

    const PARAGRAPH: &str = "aaaa bbbb cccc dddd ee";

    fn setup() {
        reset_registry();
        set_terminal_size(80, 24);
        deliver_resize_observations();
    }

    /// box(20) > balancer > text. Box at 0, wrapper at 1, text at 2.
    fn balanced(ratio: Option<PropValue<f32>>, content: PropValue<String>) -> Cleanup {
        box_primitive(BoxProps {
            width: Some(PropValue::Static(Dimension::Cells(20))),
            children: Some(Box::new(move || {
                balancer(BalancerProps {
                    ratio,
                    children: Some(Box::new(move || {
                        text(TextProps {
                            content,
                            ..Default::default()
                        });
                    })),
                    ..Default::default()
                });
            })),
            ..Default::default()
        })
    }

    #[test]
    fn test_wrapper_attributes() {
        setup();
        let _cleanup = balancer(BalancerProps {
            id: Some("headline".to_string()),
            ratio: Some(PropValue::Static(0.4)),
            ..Default::default()
        });

        assert_eq!(core::get_component_type(0), ComponentType::Balancer);
        assert_eq!(balance_id(0).as_deref(), Some("headline"));
        assert_eq!(balance_ratio(0), 0.4);
        assert_eq!(find_balancer("headline"), Some(0));
        assert_eq!(
            bootstrap_script(0).map(|script| script.source()),
            Some("self.__wrap_balancer(\"headline\",0.4)".to_string())
        );
    }

    #[test]
    fn test_generated_marker_is_uuid() {
        setup();
        let _cleanup = balancer(BalancerProps::default());

        let marker = balance_id(0).unwrap();
        assert!(Uuid::parse_str(&marker).is_ok());
        assert_eq!(balance_ratio(0), 1.0);
    }

    #[test]
    fn test_balanced_on_creation() {
        setup();
        let _cleanup = balanced(None, PARAGRAPH.into());

        assert_eq!(core::get_parent_index(1), Some(0));
        assert_eq!(balance::get_inline_max_width(1), Some(12.0));
    }

    #[test]
    fn test_reactive_ratio() {
        setup();
        let ratio = signal(1.0f32);
        let _cleanup = balanced(Some(ratio.clone().into()), PARAGRAPH.into());
        assert_eq!(balance::get_inline_max_width(1), Some(12.0));

        ratio.set(0.0);
        assert_eq!(balance::get_inline_max_width(1), Some(20.0));
        assert_eq!(balance_ratio(1), 0.0);

        ratio.set(0.5);
        assert_eq!(balance::get_inline_max_width(1), Some(16.0));
    }

    #[test]
    fn test_out_of_range_ratio_is_clamped() {
        setup();
        let _cleanup = balanced(Some(PropValue::Static(3.0)), PARAGRAPH.into());

        assert_eq!(balance_ratio(1), 1.0);
        assert_eq!(balance::get_inline_max_width(1), Some(12.0));
    }

    #[test]
    fn test_rebalances_on_content_change() {
        setup();
        let content = signal(PARAGRAPH.to_string());
        let _cleanup = balanced(None, content.clone().into());
        assert_eq!(balance::get_inline_max_width(1), Some(12.0));

        // One line at 20; nothing narrower keeps it on one line
        content.set("aaaa bbbb cccc dddd".to_string());
        assert_eq!(text_arrays::get_text_content(2), "aaaa bbbb cccc dddd");
        assert_eq!(balance::get_inline_max_width(1), Some(19.0));
    }

    #[test]
    fn test_rebalances_on_container_resize() {
        setup();
        let width = signal(Dimension::Cells(20));
        let _cleanup = box_primitive(BoxProps {
            width: Some(width.clone().into()),
            children: Some(Box::new(|| {
                balancer(BalancerProps {
                    children: Some(Box::new(|| {
                        text(TextProps { content: PARAGRAPH.into(), ..Default::default() });
                    })),
                    ..Default::default()
                });
            })),
            ..Default::default()
        });
        deliver_resize_observations();

        // Fits on one line at 30: nothing narrower than 22 keeps one line
        width.set(Dimension::Cells(30));
        deliver_resize_observations();
        assert_eq!(balance::get_inline_max_width(1), Some(22.0));
    }

    #[test]
    fn test_root_balancer_is_noop() {
        setup();
        let _cleanup = balancer(BalancerProps {
            children: Some(Box::new(|| {
                text(TextProps { content: PARAGRAPH.into(), ..Default::default() });
            })),
            ..Default::default()
        });

        assert_eq!(balance::get_inline_max_width(0), None);
    }

    #[test]
    fn test_cleanup_stops_balancing() {
        setup();
        let ratio = signal(1.0f32);
        let cleanup = balanced(Some(ratio.clone().into()), PARAGRAPH.into());

        cleanup();
        assert_eq!(get_allocated_count(), 0);

        ratio.set(0.0);
        assert_eq!(balance::get_inline_max_width(1), None);
        assert_eq!(deliver_resize_observations(), 0);
    }
}
