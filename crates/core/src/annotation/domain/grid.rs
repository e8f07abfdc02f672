use super::annotation_error::AnnotationError;
use super::tier::Tier;
use super::time_item::check_span;

/// An ordered collection of tiers sharing one timeline, i.e. one annotated
/// utterance or file.
///
/// Tier order is the caller's; several tiers may share a name. When the
/// grid's bounds are declared, every appended tier must fit inside them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    name: Option<String>,
    min_time: Option<f64>,
    max_time: Option<f64>,
    tiers: Vec<Tier>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn bounded(min_time: f64, max_time: f64) -> Result<Self, AnnotationError> {
        check_span(min_time, max_time)?;
        Ok(Self {
            min_time: Some(min_time),
            max_time: Some(max_time),
            ..Self::default()
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn append(&mut self, tier: impl Into<Tier>) -> Result<(), AnnotationError> {
        let tier = tier.into();
        self.check_tier(&tier)?;
        self.tiers.push(tier);
        Ok(())
    }

    /// Appends all tiers, or none if any of them falls outside the bounds.
    pub fn extend<I>(&mut self, tiers: I) -> Result<(), AnnotationError>
    where
        I: IntoIterator,
        I::Item: Into<Tier>,
    {
        let tiers: Vec<Tier> = tiers.into_iter().map(Into::into).collect();
        for tier in &tiers {
            self.check_tier(tier)?;
        }
        self.tiers.extend(tiers);
        Ok(())
    }

    /// Removes and returns the tier at `index`.
    pub fn pop(&mut self, index: usize) -> Option<Tier> {
        (index < self.tiers.len()).then(|| self.tiers.remove(index))
    }

    pub fn first(&self, name: &str) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.name() == Some(name))
    }

    pub fn all(&self, name: &str) -> Vec<&Tier> {
        self.tiers.iter().filter(|t| t.name() == Some(name)).collect()
    }

    pub fn names(&self) -> Vec<Option<&str>> {
        self.tiers.iter().map(Tier::name).collect()
    }

    pub fn get(&self, index: usize) -> Option<&Tier> {
        self.tiers.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tier> {
        self.tiers.iter()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Declared bounds, otherwise the union of the tiers' bounds.
    pub fn bounds(&self) -> (f64, f64) {
        let derived = self
            .tiers
            .iter()
            .map(Tier::bounds)
            .reduce(|(lo, hi), (min, max)| (lo.min(min), hi.max(max)));
        let (derived_min, derived_max) = derived.unwrap_or((0.0, 0.0));
        (
            self.min_time.unwrap_or(derived_min),
            self.max_time.unwrap_or(derived_max),
        )
    }

    fn check_tier(&self, tier: &Tier) -> Result<(), AnnotationError> {
        let (min, max) = tier.bounds();
        let below = self.min_time.is_some_and(|lower| min < lower);
        let above = self.max_time.is_some_and(|upper| max > upper);
        if below || above {
            return Err(AnnotationError::Bounds {
                item: format!("tier {:?} [{min}, {max}]", tier.name().unwrap_or_default()),
                min_time: self.min_time.unwrap_or(f64::NEG_INFINITY),
                max_time: self.max_time.unwrap_or(f64::INFINITY),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Tier;
    type IntoIter = std::slice::Iter<'a, Tier>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiers.iter()
    }
}
