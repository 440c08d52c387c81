//! Last-played derivation for the track usage report.

use chrono::NaiveDate;

/// Reduce the gig dates of a track's usage records to a single "last played"
/// date: the maximum calendar date among linked gigs that have one.
///
/// Records with no linked gig, or a gig without a date, contribute nothing.
/// The result is independent of input order.
pub fn last_played<I>(gig_dates: I) -> Option<NaiveDate>
where
    I: IntoIterator<Item = Option<NaiveDate>>,
{
    gig_dates.into_iter().flatten().max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().expect("valid test date")
    }

    #[test]
    fn test_no_usages() {
        assert_eq!(last_played(Vec::new()), None);
    }

    #[test]
    fn test_no_dated_gigs() {
        assert_eq!(last_played(vec![None, None]), None);
    }

    #[test]
    fn test_max_date_wins_regardless_of_order() {
        let dates = vec![Some(d("2024-03-05")), None, Some(d("2024-01-10"))];
        assert_eq!(last_played(dates.clone()), Some(d("2024-03-05")));

        let reversed: Vec<_> = dates.into_iter().rev().collect();
        assert_eq!(last_played(reversed), Some(d("2024-03-05")));
    }

    #[test]
    fn test_single_dated_gig() {
        assert_eq!(
            last_played(vec![None, Some(d("2026-02-20"))]),
            Some(d("2026-02-20"))
        );
    }
}
