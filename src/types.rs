//! Core types for spark-balancer.
//!
//! These types flow through the component arrays, the layout bridge and the
//! balancer. Everything is measured in terminal cells.

// =============================================================================
// Dimension
// =============================================================================

/// A layout dimension.
///
/// ```
/// use spark_balancer::types::Dimension;
///
/// let width = Dimension::Cells(50);       // 50 characters
/// let height = Dimension::Percent(100.0); // Full parent height
/// let auto = Dimension::Auto;             // Content-determined
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Auto-size based on content.
    #[default]
    Auto,
    /// Absolute size in terminal cells.
    Cells(u16),
    /// Percentage of parent size (0-100).
    Percent(f32),
}

impl From<u16> for Dimension {
    fn from(value: u16) -> Self {
        if value == 0 {
            Self::Auto
        } else {
            Self::Cells(value)
        }
    }
}

impl From<i32> for Dimension {
    fn from(value: i32) -> Self {
        if value <= 0 {
            Self::Auto
        } else {
            Self::Cells(value.min(u16::MAX as i32) as u16)
        }
    }
}

// =============================================================================
// Component Types - For parallel arrays
// =============================================================================

/// Component types for the parallel arrays pattern.
///
/// Each component at index i has componentType[i] set to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ComponentType {
    #[default]
    None = 0,
    Box = 1,
    Text = 2,
    /// Wrapper whose max width is driven by the balancer.
    Balancer = 3,
}

// =============================================================================
// Flex Direction
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum FlexDirection {
    #[default]
    Column = 0,
    Row = 1,
}

impl From<u8> for FlexDirection {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Row,
            _ => Self::Column,
        }
    }
}

// =============================================================================
// Text Wrap
// =============================================================================

/// How text behaves when it is wider than its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum TextWrap {
    /// Break at word boundaries (the default, like a browser paragraph).
    #[default]
    Wrap = 0,
    /// Keep the text on one line per explicit newline.
    NoWrap = 1,
}
