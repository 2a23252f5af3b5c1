// libs/appointment-cell/src/services/overlap.rs
use crate::models::TimeInterval;

/// Closed-interval overlap: two intervals conflict when they share at least
/// one instant, so an appointment ending at 11:00 overlaps one starting at
/// 11:00. Symmetric in its arguments.
pub fn overlaps(a: &TimeInterval, b: &TimeInterval) -> bool {
    a.start() <= b.end() && b.start() <= a.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, Utc};

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2022, 1, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
            .and_utc()
    }

    fn interval(from: (u32, u32), to: (u32, u32)) -> TimeInterval {
        TimeInterval::new(at(from.0, from.1), at(to.0, to.1)).unwrap()
    }

    #[test]
    fn test_identical_intervals_overlap() {
        let x = interval((10, 0), (11, 0));
        assert!(overlaps(&x, &x));
    }

    #[test]
    fn test_touching_boundaries_overlap() {
        let morning = interval((10, 0), (11, 0));
        let late_morning = interval((11, 0), (12, 0));

        assert!(overlaps(&morning, &late_morning));
        assert!(overlaps(&late_morning, &morning));
    }

    #[test]
    fn test_same_finish_overlaps() {
        assert!(overlaps(&interval((10, 0), (11, 0)), &interval((11, 0), (11, 0))));
    }

    #[test]
    fn test_same_start_overlaps() {
        assert!(overlaps(&interval((10, 0), (11, 0)), &interval((10, 0), (10, 30))));
    }

    #[test]
    fn test_disjoint_intervals_do_not_overlap() {
        let a = interval((10, 0), (11, 0));
        let b = interval((12, 0), (13, 0));

        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn test_one_minute_gap_does_not_overlap() {
        assert!(!overlaps(&interval((10, 0), (10, 59)), &interval((11, 0), (12, 0))));
    }

    #[test]
    fn test_containment_overlaps() {
        assert!(overlaps(&interval((10, 0), (11, 0)), &interval((10, 30), (10, 45))));
        assert!(overlaps(&interval((10, 30), (10, 45)), &interval((10, 0), (11, 0))));
    }

    #[test]
    fn test_partial_overlap() {
        assert!(overlaps(&interval((10, 0), (11, 0)), &interval((10, 30), (11, 30))));
    }

    #[test]
    fn test_zero_length_interval_inside_another() {
        let instant = interval((10, 15), (10, 15));
        assert!(overlaps(&instant, &interval((10, 0), (11, 0))));
        assert!(!overlaps(&instant, &interval((10, 16), (11, 0))));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let bounds = [(9, 0), (10, 0), (10, 30), (11, 0), (12, 0)];
        let mut intervals = Vec::new();
        for (i, from) in bounds.iter().enumerate() {
            for to in &bounds[i..] {
                intervals.push(interval(*from, *to));
            }
        }

        for a in &intervals {
            for b in &intervals {
                assert_eq!(overlaps(a, b), overlaps(b, a), "asymmetric for {} and {}", a, b);
            }
        }
    }

    #[test]
    fn test_constructor_rejects_reversed_bounds() {
        assert!(TimeInterval::new(at(11, 0), at(10, 0)).is_err());
        assert!(TimeInterval::new(at(10, 0), at(10, 0)).unwrap().is_zero_length());
    }
}
