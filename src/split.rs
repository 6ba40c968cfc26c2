//! Geometry of the before/after comparison view.

/// Share of the container, in percent, showing the "before" image.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SplitPosition(f64);

impl SplitPosition {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;
    pub const INITIAL: SplitPosition = SplitPosition(50.0);

    /// Clamp into [0, 100]. NaN becomes 0.
    pub fn new(percent: f64) -> Self {
        if percent.is_nan() {
            return SplitPosition(Self::MIN);
        }
        SplitPosition(percent.clamp(Self::MIN, Self::MAX))
    }

    /// Position of a pointer at `client_x` inside a container starting at
    /// `rect_left` and `rect_width` pixels wide.
    pub fn from_pointer(client_x: f64, rect_left: f64, rect_width: f64) -> Self {
        if !(rect_width > 0.0) {
            return Self::INITIAL;
        }
        Self::new((client_x - rect_left) / rect_width * 100.0)
    }

    pub fn percent(self) -> f64 {
        self.0
    }

    /// Width of the "before" layer as a share of the container.
    pub fn before_width_percent(self) -> f64 {
        self.0
    }

    /// Width of the image inside the "before" layer, relative to the layer,
    /// so the image stays the container's size while the layer shrinks.
    ///
    /// At 0 the layer is hidden and the image is left at 100%.
    pub fn magnification_percent(self) -> f64 {
        if self.0 <= 0.0 {
            return 100.0;
        }
        10_000.0 / self.0
    }

    pub fn is_hidden(self) -> bool {
        self.0 <= 0.0
    }
}

impl Default for SplitPosition {
    fn default() -> Self {
        Self::INITIAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_and_rejects_nan() {
        assert_eq!(SplitPosition::new(-5.0).percent(), 0.0);
        assert_eq!(SplitPosition::new(140.0).percent(), 100.0);
        assert_eq!(SplitPosition::new(f64::NAN).percent(), 0.0);
        assert_eq!(SplitPosition::new(f64::INFINITY).percent(), 100.0);
        assert_eq!(SplitPosition::default().percent(), 50.0);
    }

    #[test]
    fn test_from_pointer_inside_and_outside_container() {
        assert_eq!(SplitPosition::from_pointer(150.0, 100.0, 200.0).percent(), 25.0);
        assert_eq!(SplitPosition::from_pointer(50.0, 100.0, 200.0).percent(), 0.0);
        assert_eq!(SplitPosition::from_pointer(900.0, 100.0, 200.0).percent(), 100.0);
    }

    #[test]
    fn test_degenerate_container_keeps_initial_split() {
        assert_eq!(SplitPosition::from_pointer(10.0, 0.0, 0.0), SplitPosition::INITIAL);
        assert_eq!(SplitPosition::from_pointer(10.0, 0.0, -3.0), SplitPosition::INITIAL);
        assert_eq!(SplitPosition::from_pointer(10.0, 0.0, f64::NAN), SplitPosition::INITIAL);
    }

    #[test]
    fn test_before_layer_matches_position() {
        for p in [0.0, 0.5, 12.5, 50.0, 99.0, 100.0] {
            assert_eq!(SplitPosition::new(p).before_width_percent(), p);
        }
    }

    #[test]
    fn test_magnification_is_inverse_of_position() {
        assert_eq!(SplitPosition::new(50.0).magnification_percent(), 200.0);
        assert_eq!(SplitPosition::new(100.0).magnification_percent(), 100.0);
        assert_eq!(SplitPosition::new(25.0).magnification_percent(), 400.0);

        let p = SplitPosition::new(12.5);
        assert!((p.before_width_percent() * p.magnification_percent() - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_position_is_finite_and_hidden() {
        let p = SplitPosition::new(0.0);
        assert!(p.is_hidden());
        assert!(p.magnification_percent().is_finite());
        assert_eq!(p.magnification_percent(), 100.0);

        let tiny = SplitPosition::new(1e-9);
        assert!(tiny.magnification_percent().is_finite());
    }
}
