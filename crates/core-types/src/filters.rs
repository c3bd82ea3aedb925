/// An inclusive restriction on the `year` of a country's series.
///
/// Bounds are not checked against each other: an inverted range is valid and
/// simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearRange {
    #[default]
    Unbounded,
    From(i32),
    To(i32),
    Between { from: i32, to: i32 },
}

impl YearRange {
    pub fn new(from: Option<i32>, to: Option<i32>) -> Self {
        match (from, to) {
            (Some(from), Some(to)) => YearRange::Between { from, to },
            (Some(from), None) => YearRange::From(from),
            (None, Some(to)) => YearRange::To(to),
            (None, None) => YearRange::Unbounded,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        match *self {
            YearRange::Unbounded => true,
            YearRange::From(from) => year >= from,
            YearRange::To(to) => year <= to,
            YearRange::Between { from, to } => from <= year && year <= to,
        }
    }

    /// `(lower, upper)` bounds, either of which may be open.
    pub fn bounds(&self) -> (Option<i32>, Option<i32>) {
        match *self {
            YearRange::Unbounded => (None, None),
            YearRange::From(from) => (Some(from), None),
            YearRange::To(to) => (None, Some(to)),
            YearRange::Between { from, to } => (Some(from), Some(to)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_each_combination() {
        assert_eq!(YearRange::new(None, None), YearRange::Unbounded);
        assert_eq!(YearRange::new(Some(2020), None), YearRange::From(2020));
        assert_eq!(YearRange::new(None, Some(2022)), YearRange::To(2022));
        assert_eq!(
            YearRange::new(Some(2020), Some(2022)),
            YearRange::Between { from: 2020, to: 2022 }
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = YearRange::new(Some(2021), Some(2022));
        assert!(!range.contains(2020));
        assert!(range.contains(2021));
        assert!(range.contains(2022));
        assert!(!range.contains(2023));

        assert!(YearRange::From(2021).contains(2021));
        assert!(!YearRange::From(2021).contains(2020));
        assert!(YearRange::To(2021).contains(2021));
        assert!(!YearRange::To(2021).contains(2022));
        assert!(YearRange::Unbounded.contains(1900));
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let range = YearRange::new(Some(2021), Some(2020));
        assert!((2000..2030).all(|year| !range.contains(year)));
    }
}
