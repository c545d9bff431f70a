//! Primitive types - Props and cleanup.
//!
//! These types define the interface for component props.
//! Props support static values, signals, and getters for reactivity.

use std::rc::Rc;

use spark_signals::Signal;

use crate::types::{Dimension, TextWrap};

// =============================================================================
// Cleanup Function
// =============================================================================

/// Cleanup function returned by components.
///
/// Call this to unmount the component and release resources.
pub type Cleanup = Box<dyn FnOnce()>;

/// Builds child components inside a parent context.
pub type Children = Box<dyn FnOnce()>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// This enables reactive props while maintaining type safety.
/// When binding to FlexNode slots or arrays, the reactive connection is preserved.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value (for immediate reads).
    ///
    /// Tracks signals and getters when called from an effect.
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }

    /// Wrap a closure as a getter.
    pub fn getter(f: impl Fn() -> T + 'static) -> Self {
        PropValue::Getter(Rc::new(f))
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

impl From<&str> for PropValue<String> {
    fn from(value: &str) -> Self {
        PropValue::Static(value.to_string())
    }
}

// Dimension is PartialEq so these work
impl From<u16> for PropValue<Dimension> {
    fn from(value: u16) -> Self {
        PropValue::Static(Dimension::from(value))
    }
}

impl From<i32> for PropValue<Dimension> {
    fn from(value: i32) -> Self {
        PropValue::Static(Dimension::from(value))
    }
}

// =============================================================================
// Box Props
// =============================================================================

/// Properties for the Box component.
///
/// # Example
///
/// ```ignore
/// use spark_balancer::primitives::{box_primitive, BoxProps};
/// use spark_signals::signal;
///
/// let width = signal(Dimension::Cells(50));
///
/// let cleanup = box_primitive(BoxProps {
///     width: Some(width.clone().into()),
///     children: Some(Box::new(|| {
///         // Child components here
///     })),
///     ..Default::default()
/// });
///
/// width.set(Dimension::Cells(80));
/// ```
#[derive(Default)]
pub struct BoxProps {
    /// Optional component ID for lookup.
    pub id: Option<String>,

    /// Whether the component is visible (default: true).
    pub visible: Option<PropValue<bool>>,

    /// Flex direction: column (0, default) or row (1).
    pub flex_direction: Option<PropValue<u8>>,

    /// Flex grow factor (default: 0).
    pub grow: Option<PropValue<f32>>,

    pub width: Option<PropValue<Dimension>>,
    pub height: Option<PropValue<Dimension>>,
    pub min_width: Option<PropValue<Dimension>>,
    pub max_width: Option<PropValue<Dimension>>,

    /// Padding on all sides (individual sides take precedence).
    pub padding: Option<PropValue<u16>>,
    pub padding_top: Option<PropValue<u16>>,
    pub padding_right: Option<PropValue<u16>>,
    pub padding_bottom: Option<PropValue<u16>>,
    pub padding_left: Option<PropValue<u16>>,

    /// Child components, built with this box as their parent.
    pub children: Option<Children>,
}

// =============================================================================
// Text Props
// =============================================================================

/// Properties for the Text component.
///
/// Text is a pure display component. Cannot have children.
pub struct TextProps {
    /// Optional component ID for lookup.
    pub id: Option<String>,

    /// Text content (required).
    pub content: PropValue<String>,

    /// Whether the component is visible (default: true).
    pub visible: Option<PropValue<bool>>,

    /// Wrap mode (default: wrap at word boundaries).
    pub wrap: Option<PropValue<TextWrap>>,

    /// Flex grow factor (default: 0).
    pub grow: Option<PropValue<f32>>,

    pub width: Option<PropValue<Dimension>>,
    pub max_width: Option<PropValue<Dimension>>,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            id: None,
            content: PropValue::Static(String::new()),
            visible: None,
            wrap: None,
            grow: None,
            width: None,
            max_width: None,
        }
    }
}

// =============================================================================
// Balancer Props
// =============================================================================

/// Properties for the Balancer component.
///
/// The balancer is a wrapper placed inside a container. Its children are
/// wrapped text; the wrapper is narrowed until the last line is as long as
/// the others allow without adding a line.
///
/// # Example
///
/// ```ignore
/// use spark_balancer::primitives::{balancer, text, BalancerProps, TextProps};
///
/// let cleanup = balancer(BalancerProps {
///     ratio: Some(0.65.into()),
///     children: Some(Box::new(|| {
///         text(TextProps { content: "A headline that wraps".into(), ..Default::default() });
///     })),
///     ..Default::default()
/// });
/// ```
#[derive(Default)]
pub struct BalancerProps {
    /// Wrapper marker. A UUID v4 is generated when absent.
    pub id: Option<String>,

    /// Balance ratio in `[0, 1]` (default: 1, fully balanced).
    ///
    /// 0 leaves the wrapper as wide as its container.
    pub ratio: Option<PropValue<f32>>,

    /// Whether the wrapper is visible (default: true).
    pub visible: Option<PropValue<bool>>,

    pub width: Option<PropValue<Dimension>>,

    /// Padding on all sides of the wrapper.
    pub padding: Option<PropValue<u16>>,

    /// Balanced content, built with the wrapper as parent.
    pub children: Option<Children>,
}
