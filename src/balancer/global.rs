//! Global Slot - the process-wide relayout function.
//!
//! Balancers never call the search directly. They (re)install the relayout
//! function under [`SYMBOL_KEY`] and call whatever is installed there, so
//! a freshly created balancer and one created earlier always share the
//! latest function. The slot is per thread, like every other registry.

use std::cell::RefCell;
use std::rc::Rc;

use super::host::relayout_tree;
use super::relayout::BalanceError;

/// Name of the slot, as it appears in bootstrap sources.
pub const SYMBOL_KEY: &str = "__wrap_balancer";

/// A relayout function: `(id, ratio, wrapper)`.
pub type RelayoutFn = Rc<dyn Fn(&str, f32, Option<usize>) -> Result<Option<f32>, BalanceError>>;

thread_local! {
    static SLOT: RefCell<Option<RelayoutFn>> = const { RefCell::new(None) };
}

// =============================================================================
// Slot
// =============================================================================

/// Install the tree relayout function, replacing whatever was installed.
pub fn install() -> RelayoutFn {
    let relayout: RelayoutFn = Rc::new(relayout_tree);
    install_with(relayout.clone());
    relayout
}

/// Install a custom relayout function. Last installed wins.
pub fn install_with(relayout: RelayoutFn) {
    SLOT.with(|slot| *slot.borrow_mut() = Some(relayout));
}

/// Currently installed function, if any.
pub fn installed() -> Option<RelayoutFn> {
    SLOT.with(|slot| slot.borrow().clone())
}

/// Empty the slot.
pub fn uninstall() {
    SLOT.with(|slot| *slot.borrow_mut() = None);
}

/// Call the installed function.
pub fn invoke(id: &str, ratio: f32, wrapper: Option<usize>) -> Result<Option<f32>, BalanceError> {
    // Clone out: the call may reinstall
    let relayout = installed().ok_or(BalanceError::NotInstalled(SYMBOL_KEY))?;
    relayout(id, ratio, wrapper)
}

// =============================================================================
// Bootstrap
// =============================================================================

/// First balancing pass of a wrapper, by marker only.
///
/// Runs before the wrapper's reactive effects attach, so the first layout
/// after mount is already balanced.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapScript {
    pub id: String,
    pub ratio: f32,
}

impl BootstrapScript {
    pub fn new(id: impl Into<String>, ratio: f32) -> Self {
        Self { id: id.into(), ratio }
    }

    /// Textual form, e.g. `self.__wrap_balancer("7f3c…",1)`.
    pub fn source(&self) -> String {
        format!("self.{SYMBOL_KEY}(\"{}\",{})", self.id, self.ratio)
    }

    /// Install the relayout function and balance the wrapper by id.
    pub fn run(&self) -> Result<Option<f32>, BalanceError> {
        install();
        invoke(&self.id, self.ratio, None)
    }
}
