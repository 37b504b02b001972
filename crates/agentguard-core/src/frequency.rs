//! Rolling-window transaction counting.
//!
//! For each timestamp, count the transactions in `(t - window, t]`. Rows
//! sharing a timestamp are counted in input order, so the second of two
//! simultaneous transactions sees a count of 2. When `t - window` falls
//! before the earliest representable time, every earlier row is counted.

use chrono::{Duration, NaiveDateTime};

/// Window counts for `times`, returned in the same order as the input.
///
/// `times` need not be sorted.
pub fn count_in_window(times: &[NaiveDateTime], window: Duration) -> Vec<u32> {
    let mut order: Vec<usize> = (0..times.len()).collect();
    // Stable, so equal timestamps keep their input order.
    order.sort_by_key(|&i| times[i]);

    let mut counts = vec![0u32; times.len()];
    let mut start = 0;
    for (pos, &idx) in order.iter().enumerate() {
        if let Some(cutoff) = times[idx].checked_sub_signed(window) {
            while start < pos && times[order[start]] <= cutoff {
                start += 1;
            }
        }
        counts[idx] = (pos - start + 1) as u32;
    }
    counts
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    use super::count_in_window;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_counts_basic_hour_window() {
        let times = [at(10, 0), at(10, 30), at(11, 30)];
        assert_eq!(count_in_window(&times, Duration::hours(1)), vec![1, 2, 1]);
    }

    #[test]
    fn test_window_is_open_on_the_left() {
        // Exactly one window apart: the earlier one falls out.
        let times = [at(10, 0), at(11, 0)];
        assert_eq!(count_in_window(&times, Duration::hours(1)), vec![1, 1]);
    }

    #[test]
    fn test_unsorted_input_keeps_input_order() {
        let times = [at(11, 30), at(10, 0), at(10, 30), at(10, 45)];
        assert_eq!(count_in_window(&times, Duration::hours(1)), vec![2, 1, 2, 3]);
    }

    #[test]
    fn test_identical_timestamps_accumulate() {
        let times = [at(9, 0), at(9, 0), at(9, 0)];
        assert_eq!(count_in_window(&times, Duration::hours(1)), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_input() {
        assert!(count_in_window(&[], Duration::hours(1)).is_empty());
    }

    #[test]
    fn test_earliest_representable_time_does_not_overflow() {
        let times = [NaiveDateTime::MIN, NaiveDateTime::MIN + Duration::minutes(30)];
        assert_eq!(count_in_window(&times, Duration::hours(1)), vec![1, 2]);
    }

    #[test]
    fn test_window_reaching_past_min_counts_every_earlier_row() {
        let times = [NaiveDateTime::MIN, at(10, 0), at(11, 0)];
        assert_eq!(count_in_window(&times, Duration::MAX), vec![1, 2, 3]);
    }
}
