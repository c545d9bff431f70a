//! Text Arrays
//!
//! Text-related properties:
//! - textContent: The text string to lay out
//! - textWrap: Wrap mode (wrap, nowrap)

use spark_signals::{slot_array, Slot, SlotArray};

use super::{clear_slot, reset_slots};
use crate::types::TextWrap;

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// Text content string.
    static TEXT_CONTENT: SlotArray<String> = slot_array(Some(String::new()));

    /// Text wrap mode.
    static TEXT_WRAP: SlotArray<TextWrap> = slot_array(Some(TextWrap::Wrap));
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    TEXT_CONTENT.with(|arr| arr.ensure_capacity(index + 1));
    TEXT_WRAP.with(|arr| arr.ensure_capacity(index + 1));
}

/// Clear values at index.
pub fn clear_at_index(index: usize) {
    TEXT_CONTENT.with(|arr| clear_slot(arr, index, String::new()));
    TEXT_WRAP.with(|arr| clear_slot(arr, index, TextWrap::Wrap));
}

/// Reset all arrays.
pub fn reset() {
    TEXT_CONTENT.with(|arr| reset_slots(arr, String::new()));
    TEXT_WRAP.with(|arr| reset_slots(arr, TextWrap::Wrap));
}

// =============================================================================
// Text Content
// =============================================================================

/// Get text content at index (reactive).
pub fn get_text_content(index: usize) -> String {
    let slot = TEXT_CONTENT.with(|arr| arr.slot(index));
    slot.get().unwrap_or_default()
}

/// Set text content at index.
pub fn set_text_content(index: usize, content: String) {
    let slot = TEXT_CONTENT.with(|arr| arr.slot(index));
    slot.set_value(content);
}

/// Slot holding the text content of `index` (for prop binding).
pub fn text_content_slot(index: usize) -> Slot<String> {
    TEXT_CONTENT.with(|arr| arr.slot(index))
}

// =============================================================================
// Text Wrap
// =============================================================================

/// Get text wrap mode at index (reactive).
pub fn get_text_wrap(index: usize) -> TextWrap {
    let slot = TEXT_WRAP.with(|arr| arr.slot(index));
    slot.get().unwrap_or(TextWrap::Wrap)
}

/// Set text wrap mode at index.
pub fn set_text_wrap(index: usize, wrap: TextWrap) {
    let slot = TEXT_WRAP.with(|arr| arr.slot(index));
    slot.set_value(wrap);
}

/// Slot holding the wrap mode of `index` (for prop binding).
pub fn text_wrap_slot(index: usize) -> Slot<TextWrap> {
    TEXT_WRAP.with(|arr| arr.slot(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        reset();
    }

    #[test]
    fn test_text_content() {
        setup();

        assert_eq!(get_text_content(0), "");

        set_text_content(0, "Hello, World!".to_string());
        assert_eq!(get_text_content(0), "Hello, World!");
    }

    #[test]
    fn test_text_wrap() {
        setup();

        assert_eq!(get_text_wrap(0), TextWrap::Wrap);

        set_text_wrap(0, TextWrap::NoWrap);
        assert_eq!(get_text_wrap(0), TextWrap::NoWrap);
    }

    #[test]
    fn test_bound_content_is_released_on_clear() {
        setup();

        let content = spark_signals::signal("first".to_string());
        text_content_slot(1).set_signal(&content);
        assert_eq!(get_text_content(1), "first");

        content.set("second".to_string());
        assert_eq!(get_text_content(1), "second");

        clear_at_index(1);
        content.set("third".to_string());
        assert_eq!(get_text_content(1), "");
    }
}
