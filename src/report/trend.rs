use serde::Serialize;

/// Productivity trend signal comparing a current-period completion
/// rate against a prior-period baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "Improving",
            Trend::Stable => "Stable",
            Trend::Declining => "Declining",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hysteresis band in percentage points. Movements inside the band read
/// as `Stable` so that low completion volume cannot flap the signal.
const BAND: f64 = 5.0;

/// Classify the trend from two rates in `[0, 100]`.
pub fn classify(current_rate: f64, baseline_rate: f64) -> Trend {
    if current_rate > baseline_rate + BAND {
        Trend::Improving
    } else if current_rate < baseline_rate - BAND {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improving_needs_more_than_five_points() {
        assert_eq!(classify(60.0, 50.0), Trend::Improving);
        assert_eq!(classify(55.1, 50.0), Trend::Improving);
        // Exactly on the band edge is still stable
        assert_eq!(classify(55.0, 50.0), Trend::Stable);
    }

    #[test]
    fn test_declining_needs_more_than_five_points() {
        assert_eq!(classify(40.0, 50.0), Trend::Declining);
        assert_eq!(classify(44.9, 50.0), Trend::Declining);
        assert_eq!(classify(45.0, 50.0), Trend::Stable);
    }

    #[test]
    fn test_stable_inside_band() {
        assert_eq!(classify(50.0, 50.0), Trend::Stable);
        assert_eq!(classify(52.0, 50.0), Trend::Stable);
        assert_eq!(classify(48.0, 50.0), Trend::Stable);
    }

    #[test]
    fn test_zero_data_floor_is_stable() {
        assert_eq!(classify(0.0, 0.0), Trend::Stable);
    }
}
