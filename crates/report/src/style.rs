//! Row highlight rule for the styled report.

/// Rows at or below this many impressions are never highlighted.
pub const HIGHLIGHT_MIN_IMPRESSIONS: u64 = 100;

/// Share of the benchmark a CTR must reach to count as "caution" rather than "negative".
pub const CAUTION_RATIO: f64 = 0.9;

/// How a row's CTR compares to its device benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// CTR at or above benchmark
    Positive,
    /// CTR within 10% below benchmark
    Caution,
    /// CTR more than 10% below benchmark
    Negative,
    /// Too few impressions to judge
    None,
}

impl Highlight {
    pub fn classify(impressions: u64, ctr: f64, benchmark: f64) -> Self {
        if impressions <= HIGHLIGHT_MIN_IMPRESSIONS {
            Self::None
        } else if ctr >= benchmark {
            Self::Positive
        } else if ctr >= benchmark * CAUTION_RATIO {
            Self::Caution
        } else {
            Self::Negative
        }
    }

    /// Background color, if any.
    pub fn color(&self) -> Option<&'static str> {
        match self {
            Self::Positive => Some("#7dcea0"),
            Self::Caution => Some("#f4d03f"),
            Self::Negative => Some("#e74c3c"),
            Self::None => None,
        }
    }
}
