//! Viewport breakpoints and the resolver that picks the active one.

use serde::Serialize;

/// A viewport-width threshold paired with the animation source shown
/// above it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    /// Attachment id of the animation file in the host library.
    pub file: Option<u64>,
    /// URL of the animation source (`.json` or `.lottie`).
    pub src: String,
    /// Viewport width (CSS px) this breakpoint applies above.
    pub min_width: u32,
    /// Intrinsic animation width from attachment metadata.
    pub width: Option<u32>,
    /// Intrinsic animation height from attachment metadata.
    pub height: Option<u32>,
}

impl Breakpoint {
    /// Breakpoint for `src` shown above `min_width`, without metadata.
    #[must_use]
    pub fn new(src: impl Into<String>, min_width: u32) -> Self {
        Self {
            file: None,
            src: src.into(),
            min_width,
            width: None,
            height: None,
        }
    }

    /// `(width, height)` when both dimensions are known.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }
}

/// Resolve the active breakpoint for `viewport_width`.
///
/// Among all entries with `min_width < viewport_width` the one with the
/// greatest `min_width` wins. Breakpoints are sorted ascending, so this is
/// the last qualifying entry; on equal `min_width` the later entry wins.
#[must_use]
pub fn resolve(
    breakpoints: &[Breakpoint],
    viewport_width: u32,
) -> Option<&Breakpoint> {
    breakpoints
        .iter()
        .rev()
        .find(|bp| bp.min_width < viewport_width)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn ladder() -> Vec<Breakpoint> {
        vec![Breakpoint::new("a", 0), Breakpoint::new("b", 768)]
    }

    #[test]
    fn picks_greatest_qualifying_min_width() {
        let bps = ladder();
        assert_eq!(resolve(&bps, 1024).map(|bp| bp.src.as_str()), Some("b"));
        assert_eq!(resolve(&bps, 500).map(|bp| bp.src.as_str()), Some("a"));
    }

    #[test]
    fn threshold_is_strict() {
        let bps = ladder();
        assert_eq!(resolve(&bps, 768).map(|bp| bp.src.as_str()), Some("a"));
        assert_eq!(resolve(&bps, 769).map(|bp| bp.src.as_str()), Some("b"));
    }

    #[test]
    fn nothing_qualifies() {
        let bps = vec![Breakpoint::new("wide", 1200)];
        assert!(resolve(&bps, 800).is_none());
        assert!(resolve(&[], 800).is_none());
        // 0 is never strictly below a zero-width viewport
        assert!(resolve(&ladder(), 0).is_none());
    }

    #[test]
    fn equal_min_width_last_wins() {
        let bps = vec![
            Breakpoint::new("first", 600),
            Breakpoint::new("second", 600),
        ];
        assert_eq!(
            resolve(&bps, 900).map(|bp| bp.src.as_str()),
            Some("second")
        );
    }

    fn sorted_breakpoints() -> impl Strategy<Value = Vec<Breakpoint>> {
        proptest::collection::vec(0u32..3000, 0..8).prop_map(|mut widths| {
            widths.sort_unstable();
            widths
                .into_iter()
                .enumerate()
                .map(|(i, w)| Breakpoint::new(format!("src-{i}"), w))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn resolves_greatest_min_width_below_viewport(
            bps in sorted_breakpoints(),
            width in 0u32..4000,
        ) {
            let expected = bps
                .iter()
                .filter(|bp| bp.min_width < width)
                .map(|bp| bp.min_width)
                .max();
            let got = resolve(&bps, width);
            prop_assert_eq!(got.map(|bp| bp.min_width), expected);
            if let Some(bp) = got {
                // No later entry also qualifies.
                let idx = bps.iter().position(|b| b == bp).unwrap_or(0);
                prop_assert!(bps[idx + 1..]
                    .iter()
                    .all(|b| b.min_width >= width));
            }
        }
    }
}
