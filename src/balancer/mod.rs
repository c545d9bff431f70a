//! Balancer - even line lengths for wrapped text.
//!
//! - [`relayout`] - the binary search, generic over a [`BalanceHost`]
//! - [`host`] - [`TreeHost`], measuring against the live component tree
//! - [`global`] - the process-wide relayout slot and [`BootstrapScript`]
//!
//! The component that ties these to the tree is
//! [`crate::primitives::balancer`].

pub mod relayout;
pub mod host;
pub mod global;

pub use relayout::{clamp_ratio, relayout, BalanceError, BalanceHost, DEFAULT_RATIO};
pub use host::{relayout_tree, TreeHost};
pub use global::{install, install_with, installed, invoke, uninstall, BootstrapScript, RelayoutFn, SYMBOL_KEY};
