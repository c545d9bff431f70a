//! Primitives - Component building blocks.
//!
//! - [`box_primitive`] - Container with flexbox layout
//! - [`text`] - Word-wrapped text display
//! - [`balancer`] - Wrapper that balances the lines of the text inside it
//!
//! # Architecture
//!
//! Components are indices into parallel arrays (ECS pattern). Each component:
//! 1. Allocates an index from the registry
//! 2. Creates a FlexNode with reactive properties
//! 3. Binds props directly to FlexNode slots (preserving reactivity!)
//! 4. Returns a cleanup function
//!
//! # Reactivity
//!
//! Props can be:
//! - Static values: `width: 50`
//! - Signals: `width: my_signal` (stays connected!)
//! - Getters: `width: || compute_width()`
//!
//! The key is to pass props directly - don't extract values before binding!
//!
//! ```ignore
//! // CORRECT - signal stays connected
//! balancer(BalancerProps { ratio: Some(PropValue::Signal(ratio_signal)), ..default });
//!
//! // WRONG - extracts value, breaks reactivity
//! balancer(BalancerProps { ratio: Some(PropValue::Static(ratio_signal.get())), ..default });
//! ```

mod types;
mod box_primitive;
mod text;
mod balancer;

pub use types::*;
pub use box_primitive::box_primitive;
pub use text::text;
pub use balancer::{balance_id, balance_ratio, balancer, bootstrap_script, find_balancer};
