//! Reactive Pipeline
//!
//! Connects the component tree to the terminal.
//!
//! ```text
//! Component Tree → FlexNode Signals → layoutDerived → layout effect
//!                                 ↘ ResizeObserver effects → queue → tick → callbacks
//! ```
//!
//! - **layoutDerived** - Reads FlexNode signals, calls Taffy, returns ComputedLayout
//! - **layout effect** - Publishes the latest layout (see [`get_layout`])
//! - **resize observers** - Queue size changes of observed components;
//!   [`tick`] delivers them outside reactive tracking

pub mod terminal;
pub mod layout_derived;
pub mod resize_observer;
pub mod mount;

// Re-exports
pub use terminal::{detect_terminal_size, set_terminal_size, terminal_height, terminal_width};
pub use layout_derived::{clear_layout, create_layout_derived, get_layout, try_get_layout, LayoutDerived};
pub use resize_observer::{deliver_resize_observations, pending_resize_observations, ResizeEntry, ResizeObserver};
pub use mount::{mount, run, tick, unmount, MountHandle};
