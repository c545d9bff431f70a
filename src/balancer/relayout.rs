//! Relayout - the balancing search.
//!
//! Given a wrapper and its container, find the narrowest wrapper max width
//! that keeps the container at its natural height (the same number of
//! lines), then blend it with the container width by `ratio`:
//!
//! ```text
//! applied = right * ratio + width * (1 - ratio)
//! ```
//!
//! `ratio = 1` is fully balanced, `ratio = 0` leaves the wrapper as wide as
//! the container.
//!
//! The search is generic over [`BalanceHost`], which supplies measurement.
//! Each step writes one width and reads one height; the host is responsible
//! for making that read reflect the write.

use thiserror::Error;
use tracing::{debug, trace};

// =============================================================================
// Errors
// =============================================================================

/// Errors surfaced by the balancer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// No wrapper carries the requested marker.
    #[error("no balancer wrapper with id {0:?}")]
    WrapperNotFound(String),

    /// The process-wide slot was invoked before anything was installed.
    #[error("no relayout function installed under `{0}`")]
    NotInstalled(&'static str),
}

// =============================================================================
// Host
// =============================================================================

/// Measurement oracle for [`relayout`].
pub trait BalanceHost {
    /// Handle to a wrapper or container.
    type Element: Copy + std::fmt::Debug;

    /// Find a wrapper by its marker.
    fn find_wrapper(&self, id: &str) -> Option<Self::Element>;

    /// The wrapper's parent container, if it has one.
    fn container(&self, wrapper: Self::Element) -> Option<Self::Element>;

    /// Write (or clear, with `None`) the wrapper's inline max width.
    fn set_max_width(&mut self, wrapper: Self::Element, width: Option<f32>);

    /// Current rendered (width, height) of an element.
    fn client_size(&mut self, element: Self::Element) -> (f32, f32);
}

// =============================================================================
// Ratio
// =============================================================================

/// Default ratio: fully balanced.
pub const DEFAULT_RATIO: f32 = 1.0;

/// Clamp a ratio into `[0, 1]`; NaN becomes [`DEFAULT_RATIO`].
pub fn clamp_ratio(ratio: f32) -> f32 {
    if ratio.is_nan() {
        DEFAULT_RATIO
    } else {
        ratio.clamp(0.0, 1.0)
    }
}

// =============================================================================
// Relayout
// =============================================================================

/// Balance the wrapper identified by `wrapper` or, when absent, by `id`.
///
/// Returns the applied max width, or `Ok(None)` when nothing was applied:
/// the wrapper has no container, or the container has zero width. In both
/// cases the wrapper's max width is left cleared.
pub fn relayout<H: BalanceHost>(
    host: &mut H,
    id: &str,
    ratio: f32,
    wrapper: Option<H::Element>,
) -> Result<Option<f32>, BalanceError> {
    let wrapper = match wrapper {
        Some(wrapper) => wrapper,
        None => host
            .find_wrapper(id)
            .ok_or_else(|| BalanceError::WrapperNotFound(id.to_string()))?,
    };
    let ratio = clamp_ratio(ratio);

    // Reset wrapper width
    host.set_max_width(wrapper, None);

    let Some(container) = host.container(wrapper) else {
        debug!(?wrapper, "balancer wrapper has no container");
        return Ok(None);
    };

    let (width, height) = host.client_size(container);
    if width <= 0.0 {
        debug!(?wrapper, "container has no width, skipping");
        return Ok(None);
    }

    let mut left = width / 2.0;
    let mut right = width;
    let mut steps = 0u32;

    while left + 1.0 < right {
        let middle = ((left + right) / 2.0).trunc();
        host.set_max_width(wrapper, Some(middle));
        let (_, measured) = host.client_size(container);
        if measured == height {
            right = middle;
        } else {
            left = middle;
        }
        steps += 1;
        trace!(middle, measured, left, right, "balance step");
    }

    let applied = right * ratio + width * (1.0 - ratio);
    host.set_max_width(wrapper, Some(applied));
    debug!(?wrapper, width, height, right, ratio, applied, steps, "balanced");

    Ok(Some(applied))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: usize = 0;
    const WRAPPER: usize = 1;

    /// A paragraph of fixed-width words wrapped greedily, one space between words.
    struct Paragraph {
        container_width: f32,
        words: Vec<u32>,
        has_container: bool,
        max_width: Option<f32>,
        writes: Vec<Option<f32>>,
    }

    impl Paragraph {
        fn new(container_width: f32, words: &[u32]) -> Self {
            Self {
                container_width,
                words: words.to_vec(),
                has_container: true,
                max_width: None,
                writes: Vec::new(),
            }
        }

        fn lines(&self) -> f32 {
            let limit = match self.max_width {
                Some(max) => max.min(self.container_width),
                None => self.container_width,
            };
            let limit = (limit.floor() as u32).max(1);

            let mut lines = 0;
            let mut current = 0;
            for &word in &self.words {
                if current > 0 && current + 1 + word <= limit {
                    current += 1 + word;
                    continue;
                }
                // Words wider than the line are broken across lines
                lines += word.div_ceil(limit);
                current = match word % limit {
                    0 => limit,
                    rest => rest,
                };
            }
            lines as f32
        }
    }

    impl BalanceHost for Paragraph {
        type Element = usize;

        fn find_wrapper(&self, id: &str) -> Option<usize> {
            (id == "w").then_some(WRAPPER)
        }

        fn container(&self, wrapper: usize) -> Option<usize> {
            (wrapper == WRAPPER && self.has_container).then_some(CONTAINER)
        }

        fn set_max_width(&mut self, _wrapper: usize, width: Option<f32>) {
            self.max_width = width;
            self.writes.push(width);
        }

        fn client_size(&mut self, _element: usize) -> (f32, f32) {
            (self.container_width, self.lines())
        }
    }

    #[test]
    fn test_narrowest_width_keeping_line_count() {
        // Two lines down to 200, four below
        let mut host = Paragraph::new(300.0, &[100, 99, 100, 99]);
        assert_eq!(relayout(&mut host, "w", 1.0, None), Ok(Some(200.0)));
        assert_eq!(host.max_width, Some(200.0));
    }

    #[test]
    fn test_ratio_blends_with_container_width() {
        let mut host = Paragraph::new(300.0, &[100, 99, 100, 99]);
        assert_eq!(relayout(&mut host, "w", 0.5, Some(WRAPPER)), Ok(Some(250.0)));
    }

    #[test]
    fn test_ratio_zero_is_container_width() {
        let mut host = Paragraph::new(300.0, &[40, 40, 40, 40, 40, 40, 40, 40]);
        assert_eq!(relayout(&mut host, "w", 0.0, None), Ok(Some(300.0)));
    }

    #[test]
    fn test_ratio_is_clamped() {
        let mut host = Paragraph::new(300.0, &[100, 99, 100, 99]);
        assert_eq!(relayout(&mut host, "w", 4.0, None), Ok(Some(200.0)));
        assert_eq!(relayout(&mut host, "w", -1.0, None), Ok(Some(300.0)));
        assert_eq!(relayout(&mut host, "w", f32::NAN, None), Ok(Some(200.0)));
    }

    #[test]
    fn test_zero_width_clears_and_skips() {
        let mut host = Paragraph::new(0.0, &[10]);
        host.max_width = Some(42.0);

        assert_eq!(relayout(&mut host, "w", 1.0, None), Ok(None));
        assert_eq!(host.max_width, None);
        assert_eq!(host.writes, vec![None]);
    }

    #[test]
    fn test_missing_container_is_noop() {
        let mut host = Paragraph::new(300.0, &[10]);
        host.has_container = false;

        assert_eq!(relayout(&mut host, "w", 1.0, None), Ok(None));
        assert_eq!(host.max_width, None);
    }

    #[test]
    fn test_unknown_id() {
        let mut host = Paragraph::new(300.0, &[10]);
        assert_eq!(
            relayout(&mut host, "nope", 1.0, None),
            Err(BalanceError::WrapperNotFound("nope".to_string()))
        );
        assert!(host.writes.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let mut host = Paragraph::new(80.0, &[5, 3, 7, 2, 9, 4, 6, 5, 3, 8, 2, 6]);
        let first = relayout(&mut host, "w", 1.0, None);
        let second = relayout(&mut host, "w", 1.0, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_search_is_logarithmic() {
        let mut host = Paragraph::new(1024.0, &[300, 300, 300, 300]);
        relayout(&mut host, "w", 1.0, None).ok();

        // clear + search steps + final write
        assert!(host.writes.len() <= 2 + 10);
    }

    #[test]
    fn test_single_line_paragraph_stays_in_range() {
        let mut host = Paragraph::new(60.0, &[3, 4]);
        let applied = relayout(&mut host, "w", 1.0, None).ok().flatten();

        // Never narrower than half the container
        assert_eq!(applied, Some(31.0));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            BalanceError::WrapperNotFound("abc".into()).to_string(),
            "no balancer wrapper with id \"abc\""
        );
        assert_eq!(
            BalanceError::NotInstalled("__wrap_balancer").to_string(),
            "no relayout function installed under `__wrap_balancer`"
        );
    }
}
