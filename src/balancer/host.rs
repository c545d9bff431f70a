//! Tree Host - measures balancers against the live component tree.
//!
//! Builds one [`LayoutTree`] per pass. Width writes go both to the tree
//! (so the next height read reflects them) and to the inline max width
//! array (so later layouts keep them). The style epoch is bumped once, when
//! the host is finished, and only if a wrapper settled on a different width
//! than it had before the pass.

use crate::engine::arrays::{balance, core};
use crate::layout::LayoutTree;
use crate::pipeline::{terminal_height, terminal_width};
use super::relayout::{relayout, BalanceError, BalanceHost};

/// [`BalanceHost`] over a snapshot of the component tree.
pub struct TreeHost {
    tree: LayoutTree,
    /// Inline max width of each touched wrapper before this pass.
    previous: Vec<(usize, Option<f32>)>,
}

impl TreeHost {
    /// Snapshot the tree at the current terminal size.
    pub fn new() -> Self {
        Self {
            tree: LayoutTree::build(terminal_width(), terminal_height(), false),
            previous: Vec::new(),
        }
    }

    /// Publish the settled widths to layout consumers.
    ///
    /// Returns whether any wrapper ended the pass with a new width.
    pub fn finish(self) -> bool {
        let changed = self
            .previous
            .iter()
            .any(|&(wrapper, before)| balance::get_inline_max_width(wrapper) != before);
        if changed {
            balance::bump_style_epoch();
        }
        changed
    }
}

impl Default for TreeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl BalanceHost for TreeHost {
    type Element = usize;

    fn find_wrapper(&self, id: &str) -> Option<usize> {
        balance::find_balancer(id)
    }

    fn container(&self, wrapper: usize) -> Option<usize> {
        core::get_parent_index(wrapper).filter(|&parent| self.tree.contains(parent))
    }

    fn set_max_width(&mut self, wrapper: usize, width: Option<f32>) {
        if !self.previous.iter().any(|&(touched, _)| touched == wrapper) {
            self.previous.push((wrapper, balance::get_inline_max_width(wrapper)));
        }
        balance::set_inline_max_width(wrapper, width);
        self.tree.set_max_width(wrapper, width);
    }

    fn client_size(&mut self, element: usize) -> (f32, f32) {
        self.tree.size(element).unwrap_or((0.0, 0.0))
    }
}

/// Run one balancing pass against the live tree.
///
/// This is the function installed in the process-wide slot.
pub fn relayout_tree(id: &str, ratio: f32, wrapper: Option<usize>) -> Result<Option<f32>, BalanceError> {
    let mut host = TreeHost::new();
    let result = relayout(&mut host, id, ratio, wrapper);
    if !host.finish() {
        tracing::trace!(id, "balancer width unchanged");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{allocate_index, create_flex_node, reset_registry};
    use crate::engine::arrays::text;
    use crate::pipeline::set_terminal_size;
    use crate::types::{ComponentType, Dimension};

    fn setup() {
        reset_registry();
        set_terminal_size(80, 24);
    }

    /// container(width) > wrapper > text(content)
    fn paragraph(width: u16, content: &str) -> (usize, usize) {
        let container = allocate_index(None);
        core::set_component_type(container, ComponentType::Box);
        create_flex_node(container).width.set_value(Dimension::Cells(width));

        let wrapper = allocate_index(None);
        core::set_component_type(wrapper, ComponentType::Balancer);
        core::set_parent_index(wrapper, Some(container));
        create_flex_node(wrapper);
        balance::set_balance_id(wrapper, "p");

        let body = allocate_index(None);
        core::set_component_type(body, ComponentType::Text);
        core::set_parent_index(body, Some(wrapper));
        create_flex_node(body);
        text::set_text_content(body, content.to_string());

        (container, wrapper)
    }

    #[test]
    fn test_balances_last_line() {
        setup();
        // 20 cells: "aaaa bbbb cccc dddd" / "ee" → balanced to two lines of 10
        let (_, wrapper) = paragraph(20, "aaaa bbbb cccc dddd ee");

        let applied = relayout_tree("p", 1.0, None);

        assert_eq!(applied, Ok(Some(12.0)));
        assert_eq!(balance::get_inline_max_width(wrapper), Some(12.0));
    }

    #[test]
    fn test_container_height_is_preserved() {
        setup();
        let (container, wrapper) = paragraph(20, "aaaa bbbb cccc dddd ee");

        let before = LayoutTree::build(80, 24, false).size(container);
        relayout_tree("p", 1.0, Some(wrapper)).ok();
        let after = LayoutTree::build(80, 24, false).size(container);

        assert_eq!(before, after);
    }

    #[test]
    fn test_epoch_bumped_once_per_pass() {
        setup();
        paragraph(20, "aaaa bbbb cccc dddd ee");

        let before = balance::style_epoch();
        relayout_tree("p", 1.0, None).ok();
        assert_eq!(balance::style_epoch(), before + 1);
    }

    #[test]
    fn test_epoch_unchanged_when_width_settles_again() {
        setup();
        let (container, wrapper) = paragraph(20, "aaaa bbbb cccc dddd ee");
        relayout_tree("p", 1.0, None).ok();
        let settled = balance::style_epoch();

        // Clears and searches again, but lands on the same width
        relayout_tree("p", 1.0, None).ok();
        assert_eq!(balance::style_epoch(), settled);
        assert_eq!(balance::get_inline_max_width(wrapper), Some(12.0));

        create_flex_node(container).width.set_value(Dimension::Cells(30));
        relayout_tree("p", 1.0, None).ok();
        assert_eq!(balance::style_epoch(), settled + 1);
        assert_eq!(balance::get_inline_max_width(wrapper), Some(22.0));
    }

    #[test]
    fn test_orphan_wrapper_is_noop() {
        setup();
        let wrapper = allocate_index(None);
        core::set_component_type(wrapper, ComponentType::Balancer);
        create_flex_node(wrapper);

        assert_eq!(relayout_tree("", 1.0, Some(wrapper)), Ok(None));
        assert_eq!(balance::get_inline_max_width(wrapper), None);
    }

    #[test]
    fn test_unknown_id() {
        setup();
        assert_eq!(
            relayout_tree("missing", 1.0, None),
            Err(BalanceError::WrapperNotFound("missing".to_string()))
        );
    }
}
