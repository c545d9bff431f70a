//! # spark-balancer
//!
//! Balanced text wrapping for reactive terminal layouts.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! fine-grained reactivity and [taffy](https://github.com/DioxusLabs/taffy)
//! for flexbox layout.
//!
//! A [`balancer`] wraps text inside a container and narrows itself, by
//! binary search over measured layouts, to the smallest width that does not
//! add a line. Headlines stop ending in a single orphaned word.
//!
//! ## Architecture
//!
//! Components are indices into parallel arrays rather than objects (ECS
//! style). Layout is purely derived:
//! ```text
//! Component Tree → FlexNode Signals → layoutDerived → layout effect
//!                        ↑                  ↓
//!                 balancer effect ← ResizeObserver
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Dimension, ComponentType, TextWrap)
//! - [`engine`] - Component registry, FlexNode, parallel arrays
//! - [`layout`] - Taffy bridge and word-wrapping text measurement
//! - [`balancer`] - The relayout search, its hosts and the global slot
//! - [`pipeline`] - Terminal signals, layout derived, resize observers, mount loop
//! - [`primitives`] - `box_primitive`, `text`, `balancer`
//!
//! ## Example
//!
//! ```ignore
//! use spark_balancer::*;
//!
//! let _app = box_primitive(BoxProps {
//!     width: Some(Dimension::Percent(60.0).into()),
//!     children: Some(Box::new(|| {
//!         balancer(BalancerProps {
//!             children: Some(Box::new(|| {
//!                 text(TextProps { content: "A headline that wraps onto two lines".into(), ..Default::default() });
//!             })),
//!             ..Default::default()
//!         });
//!     })),
//!     ..Default::default()
//! });
//!
//! let handle = mount()?;
//! run(&handle)?;
//! handle.unmount();
//! ```

pub mod balancer;
pub mod engine;
pub mod layout;
pub mod pipeline;
pub mod primitives;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use engine::{
    allocate_index, create_flex_node, destroy_flex_node, get_allocated_indices,
    get_current_parent_index, get_flex_node, get_id, get_index, is_allocated, on_destroy,
    pop_parent_context, push_parent_context, release_index, reset_registry, FlexNode,
};

pub use layout::{compute_layout, measure_text_height, string_width, wrap_text, ComputedLayout, LayoutTree};

pub use balancer::{
    relayout, relayout_tree, BalanceError, BalanceHost, BootstrapScript, TreeHost, SYMBOL_KEY,
};

pub use pipeline::{
    create_layout_derived, deliver_resize_observations, detect_terminal_size, get_layout, mount,
    run, set_terminal_size, terminal_height, terminal_width, tick, unmount, MountHandle,
    ResizeEntry, ResizeObserver,
};

pub use primitives::{
    balance_id, balance_ratio, balancer, bootstrap_script, box_primitive, find_balancer, text,
    BalancerProps, BoxProps, Cleanup, PropValue, TextProps,
};
