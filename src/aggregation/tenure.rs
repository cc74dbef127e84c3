//! Continuous-employment start date reconstruction.

use chrono::NaiveDate;

/// The reconstructed start date and how many tenure gaps reset it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenureStart {
    /// Start of the current continuous tenure.
    pub start_date: NaiveDate,
    /// Number of gaps longer than the threshold found in the history.
    pub resets: usize,
}

/// Reconstructs the start of an employee's current tenure.
///
/// Dates are sorted ascending and scanned once: the start begins at the
/// earliest date and moves to the later date of any consecutive pair more
/// than `gap_days` apart. A gap of exactly `gap_days` does not reset.
/// Returns `None` for an empty history.
///
/// # Examples
///
/// ```
/// use payroll_summary::aggregation::reconstruct_start_date;
/// use chrono::NaiveDate;
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let tenure = reconstruct_start_date(
///     [d(2021, 3, 5), d(2021, 3, 19), d(2024, 1, 12), d(2024, 1, 26)],
///     365,
/// )
/// .unwrap();
/// assert_eq!(tenure.start_date, d(2024, 1, 12));
/// assert_eq!(tenure.resets, 1);
/// ```
pub fn reconstruct_start_date<I>(dates: I, gap_days: u32) -> Option<TenureStart>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
    dates.sort_unstable();

    let first = *dates.first()?;
    let gap_days = i64::from(gap_days);

    let tenure = dates.windows(2).fold(
        TenureStart {
            start_date: first,
            resets: 0,
        },
        |tenure, pair| {
            if (pair[1] - pair[0]).num_days() > gap_days {
                TenureStart {
                    start_date: pair[1],
                    resets: tenure.resets + 1,
                }
            } else {
                tenure
            }
        },
    );

    Some(tenure)
}
