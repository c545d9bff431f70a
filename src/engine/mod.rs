//! Engine - Component registry and parallel arrays.
//!
//! The engine manages the core data structures:
//! - Registry: Index allocation, ID mapping, parent context
//! - FlexNode: Persistent layout object with reactive properties
//! - FlexNodeRegistry: FlexNode lifecycle management
//! - Arrays: Parallel arrays for component state
//!
//! # Architecture
//!
//! Components are NOT objects. They are indices into parallel arrays:
//!
//! ```text
//! Index 0: Box      (parent=-1, width=60, visible=true)
//! Index 1: Balancer (parent=0,  balanceId="…", inlineMaxWidth=41.0)
//! Index 2: Text     (parent=1,  content="Lorem ipsum …")
//! ```

mod registry;
mod flex_node;
mod flex_node_registry;
pub mod arrays;

pub use registry::*;
pub use flex_node::*;
pub use flex_node_registry::*;
