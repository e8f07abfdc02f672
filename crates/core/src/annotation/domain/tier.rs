use super::interval_tier::IntervalTier;
use super::point_tier::PointTier;
use crate::shared::constants::{INTERVAL_TIER_CLASS, POINT_TIER_CLASS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TierKind {
    Point,
    Interval,
}

impl TierKind {
    /// The Praat class name written in the `class = "..."` field.
    pub fn tag(self) -> &'static str {
        match self {
            TierKind::Point => POINT_TIER_CLASS,
            TierKind::Interval => INTERVAL_TIER_CLASS,
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            POINT_TIER_CLASS => Some(TierKind::Point),
            INTERVAL_TIER_CLASS => Some(TierKind::Interval),
            _ => None,
        }
    }
}

/// One track of a [`Grid`](super::grid::Grid): either marks or intervals.
#[derive(Clone, Debug, PartialEq)]
pub enum Tier {
    Point(PointTier),
    Interval(IntervalTier),
}

impl Tier {
    pub fn kind(&self) -> TierKind {
        match self {
            Tier::Point(_) => TierKind::Point,
            Tier::Interval(_) => TierKind::Interval,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Tier::Point(t) => t.name(),
            Tier::Interval(t) => t.name(),
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Tier::Point(t) => t.bounds(),
            Tier::Interval(t) => t.bounds(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Tier::Point(t) => t.len(),
            Tier::Interval(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_interval_tier(&self) -> Option<&IntervalTier> {
        match self {
            Tier::Interval(t) => Some(t),
            Tier::Point(_) => None,
        }
    }

    pub fn as_point_tier(&self) -> Option<&PointTier> {
        match self {
            Tier::Point(t) => Some(t),
            Tier::Interval(_) => None,
        }
    }
}

impl From<PointTier> for Tier {
    fn from(tier: PointTier) -> Self {
        Tier::Point(tier)
    }
}

impl From<IntervalTier> for Tier {
    fn from(tier: IntervalTier) -> Self {
        Tier::Interval(tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_round_trip() {
        for kind in [TierKind::Point, TierKind::Interval] {
            assert_eq!(TierKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(TierKind::Point.tag(), "TextTier");
        assert_eq!(TierKind::from_tag("PitchTier"), None);
    }

    #[test]
    fn test_dispatch_over_variants() {
        let mut intervals = IntervalTier::new("words");
        intervals.add(0.0, 1.0, "hi").unwrap();
        let mut points = PointTier::new("tones");
        points.add(0.5, "H*").unwrap();

        let a = Tier::from(intervals);
        let b = Tier::from(points);

        assert_eq!(a.kind(), TierKind::Interval);
        assert_eq!(a.name(), Some("words"));
        assert_eq!(a.bounds(), (0.0, 1.0));
        assert!(a.as_interval_tier().is_some());
        assert!(a.as_point_tier().is_none());

        assert_eq!(b.kind(), TierKind::Point);
        assert_eq!(b.len(), 1);
        assert_eq!(b.bounds(), (0.5, 0.5));
    }
}
