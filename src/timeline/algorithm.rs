//! Timeline normalization: turns the backend's sparse, overlapping status
//! intervals into one contiguous, gap-free segment sequence per machine.
//!
//! Every view that renders a machine day (step chart, workshop timeline,
//! report) consumes this one function instead of carrying its own sweep.

use anyhow::{ensure, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::timeline::status::MachineStatus;
use crate::timeline::window::ReportWindow;

/// One raw observed span of a single status, as reported by the backend.
/// Intervals may overlap, arrive unsorted, or fall outside the target window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusInterval {
    pub status: MachineStatus,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A maximal contiguous span with one effective status. Consecutive segments
/// from [`normalize`] tile the window exactly: `segments[i].end ==
/// segments[i + 1].start`, the first starts at `window.start` and the last
/// ends at `window.end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSegment {
    pub status: MachineStatus,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl StatusSegment {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Change-point event kinds. Deactivations sort before activations at the
/// same timestamp so a status ending exactly when another begins never
/// double-counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum EventKind {
    Deactivate = 0,
    Activate = 1,
}

/// Normalize raw status intervals into a gap-free timeline over `window`.
///
/// Invalid intervals (`end <= start`) and intervals entirely outside the
/// window are discarded; partial overlaps are clipped to the window. Where
/// several statuses are active at once the highest-priority one wins
/// (PRODUCTION > ON > OFF); where none is active the machine counts as OFF.
/// The result always covers the whole window, so an empty input yields a
/// single full-window OFF segment.
///
/// Fails only when the window itself is inverted or empty; noisy telemetry
/// never produces an error.
pub fn normalize(intervals: &[StatusInterval], window: ReportWindow) -> Result<Vec<StatusSegment>> {
    ensure!(
        window.start < window.end,
        "invalid window: start {} >= end {}",
        window.start,
        window.end
    );

    let mut events: Vec<(DateTime<Utc>, EventKind, MachineStatus)> = Vec::new();
    for interval in intervals {
        if interval.end <= interval.start {
            continue;
        }
        let start = interval.start.max(window.start);
        let end = interval.end.min(window.end);
        if end <= start {
            continue;
        }
        events.push((start, EventKind::Activate, interval.status));
        events.push((end, EventKind::Deactivate, interval.status));
    }
    events.sort_by_key(|&(time, kind, status)| (time, kind, status));

    // One counter per status; the effective status is the highest active one.
    let mut active = [0usize; 3];
    let mut current = MachineStatus::Off;
    let mut run_start = window.start;
    let mut segments: Vec<StatusSegment> = Vec::new();

    for (time, kind, status) in events {
        match kind {
            EventKind::Activate => active[status as usize] += 1,
            EventKind::Deactivate => active[status as usize] -= 1,
        }
        let effective = effective_status(&active);
        if effective != current {
            if time > run_start {
                push_run(&mut segments, current, run_start, time);
                run_start = time;
            }
            // At time == run_start the previous run is empty; just switch.
            current = effective;
        }
    }

    if run_start < window.end {
        push_run(&mut segments, current, run_start, window.end);
    }

    Ok(segments)
}

fn effective_status(active: &[usize; 3]) -> MachineStatus {
    if active[MachineStatus::Production as usize] > 0 {
        MachineStatus::Production
    } else if active[MachineStatus::On as usize] > 0 {
        MachineStatus::On
    } else {
        MachineStatus::Off
    }
}

/// Append a run, extending the previous segment instead when the status is
/// unchanged, so the output keeps maximal runs.
fn push_run(
    segments: &mut Vec<StatusSegment>,
    status: MachineStatus,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) {
    if let Some(last) = segments.last_mut() {
        if last.status == status && last.end == start {
            last.end = end;
            return;
        }
    }
    segments.push(StatusSegment { status, start, end });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::seq::SliceRandom;
    use rand::{rngs::StdRng, SeedableRng};

    use MachineStatus::{Off, On, Production};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
            .and_utc()
    }

    fn iv(status: MachineStatus, start: DateTime<Utc>, end: DateTime<Utc>) -> StatusInterval {
        StatusInterval { status, start, end }
    }

    fn window() -> ReportWindow {
        ReportWindow::working_hours(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap())
    }

    fn assert_tiles_window(segments: &[StatusSegment], window: ReportWindow) {
        assert!(!segments.is_empty());
        assert_eq!(segments.first().unwrap().start, window.start);
        assert_eq!(segments.last().unwrap().end, window.end);
        for seg in segments {
            assert!(seg.start < seg.end, "zero-length segment: {seg:?}");
        }
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "gap or overlap: {pair:?}");
            assert_ne!(pair[0].status, pair[1].status, "non-maximal run: {pair:?}");
        }
    }

    #[test]
    fn empty_input_is_off_for_the_whole_window() {
        let segments = normalize(&[], window()).unwrap();
        assert_eq!(
            segments,
            vec![StatusSegment { status: Off, start: at(8, 0), end: at(18, 0) }]
        );
    }

    #[test]
    fn inverted_window_is_rejected() {
        let bad = ReportWindow { start: at(18, 0), end: at(8, 0) };
        assert!(normalize(&[], bad).is_err());
        let empty = ReportWindow { start: at(8, 0), end: at(8, 0) };
        assert!(normalize(&[], empty).is_err());
    }

    #[test]
    fn working_day_scenario() {
        // ON 09:00-10:00 with a PRODUCTION burst 09:30-09:45 inside it.
        let input = [
            iv(On, at(9, 0), at(10, 0)),
            iv(Production, at(9, 30), at(9, 45)),
        ];
        let segments = normalize(&input, window()).unwrap();
        assert_eq!(
            segments,
            vec![
                StatusSegment { status: Off, start: at(8, 0), end: at(9, 0) },
                StatusSegment { status: On, start: at(9, 0), end: at(9, 30) },
                StatusSegment { status: Production, start: at(9, 30), end: at(9, 45) },
                StatusSegment { status: On, start: at(9, 45), end: at(10, 0) },
                StatusSegment { status: Off, start: at(10, 0), end: at(18, 0) },
            ]
        );
    }

    #[test]
    fn production_wins_over_partial_on_overlap() {
        // ON t0-t2 overlapped by PRODUCTION t1-t3, t0 < t1 < t2 < t3.
        let input = [
            iv(On, at(9, 0), at(11, 0)),
            iv(Production, at(10, 0), at(12, 0)),
        ];
        let segments = normalize(&input, window()).unwrap();
        assert_eq!(
            segments,
            vec![
                StatusSegment { status: Off, start: at(8, 0), end: at(9, 0) },
                StatusSegment { status: On, start: at(9, 0), end: at(10, 0) },
                StatusSegment { status: Production, start: at(10, 0), end: at(12, 0) },
                StatusSegment { status: Off, start: at(12, 0), end: at(18, 0) },
            ]
        );
    }

    #[test]
    fn interval_straddling_window_start_is_clipped() {
        let input = [iv(On, at(6, 0), at(9, 0))];
        let segments = normalize(&input, window()).unwrap();
        assert_eq!(segments[0], StatusSegment { status: On, start: at(8, 0), end: at(9, 0) });
        assert_eq!(segments[1], StatusSegment { status: Off, start: at(9, 0), end: at(18, 0) });
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn interval_straddling_window_end_is_clamped() {
        let input = [iv(Production, at(17, 0), at(19, 0))];
        let segments = normalize(&input, window()).unwrap();
        assert_eq!(segments.last().unwrap().end, at(18, 0));
        assert_eq!(segments.last().unwrap().status, Production);
    }

    #[test]
    fn invalid_and_out_of_window_intervals_are_discarded() {
        let input = [
            iv(Production, at(10, 0), at(10, 0)), // zero length
            iv(Production, at(11, 0), at(10, 0)), // inverted
            iv(Production, at(4, 0), at(5, 0)),   // before the window
            iv(Production, at(19, 0), at(20, 0)), // after the window
        ];
        let segments = normalize(&input, window()).unwrap();
        assert_eq!(
            segments,
            vec![StatusSegment { status: Off, start: at(8, 0), end: at(18, 0) }]
        );
    }

    #[test]
    fn end_meeting_start_produces_no_transient_segment() {
        // ON ends exactly where PRODUCTION begins; the deactivate-first tie
        // break must not emit a zero-length OFF run in between.
        let input = [
            iv(On, at(9, 0), at(10, 0)),
            iv(Production, at(10, 0), at(11, 0)),
        ];
        let segments = normalize(&input, window()).unwrap();
        assert_eq!(
            segments,
            vec![
                StatusSegment { status: Off, start: at(8, 0), end: at(9, 0) },
                StatusSegment { status: On, start: at(9, 0), end: at(10, 0) },
                StatusSegment { status: Production, start: at(10, 0), end: at(11, 0) },
                StatusSegment { status: Off, start: at(11, 0), end: at(18, 0) },
            ]
        );
    }

    #[test]
    fn adjacent_and_overlapping_equal_statuses_merge() {
        let input = [
            iv(On, at(9, 0), at(10, 0)),
            iv(On, at(10, 0), at(10, 30)),
            iv(On, at(10, 15), at(11, 0)),
        ];
        let segments = normalize(&input, window()).unwrap();
        assert_eq!(
            segments,
            vec![
                StatusSegment { status: Off, start: at(8, 0), end: at(9, 0) },
                StatusSegment { status: On, start: at(9, 0), end: at(11, 0) },
                StatusSegment { status: Off, start: at(11, 0), end: at(18, 0) },
            ]
        );
    }

    #[test]
    fn explicit_off_merges_with_implicit_off() {
        // A reported OFF span is indistinguishable from no data at all.
        let input = [iv(Off, at(9, 0), at(10, 0))];
        let segments = normalize(&input, window()).unwrap();
        assert_eq!(
            segments,
            vec![StatusSegment { status: Off, start: at(8, 0), end: at(18, 0) }]
        );
    }

    #[test]
    fn production_outliving_its_on_carrier_falls_back_to_off() {
        // A PRODUCTION burst that outlives its ON carrier falls back to OFF
        // when both end, not to ON.
        let input = [
            iv(On, at(9, 0), at(9, 30)),
            iv(Production, at(9, 15), at(10, 0)),
        ];
        let segments = normalize(&input, window()).unwrap();
        assert_eq!(
            segments,
            vec![
                StatusSegment { status: Off, start: at(8, 0), end: at(9, 0) },
                StatusSegment { status: On, start: at(9, 0), end: at(9, 15) },
                StatusSegment { status: Production, start: at(9, 15), end: at(10, 0) },
                StatusSegment { status: Off, start: at(10, 0), end: at(18, 0) },
            ]
        );
    }

    #[test]
    fn output_is_invariant_under_input_permutation() {
        let input = vec![
            iv(On, at(9, 0), at(12, 0)),
            iv(Production, at(9, 30), at(10, 0)),
            iv(Production, at(11, 0), at(11, 45)),
            iv(Off, at(12, 0), at(13, 0)),
            iv(On, at(6, 0), at(8, 30)),
            iv(Production, at(17, 30), at(19, 0)),
        ];
        let expected = normalize(&input, window()).unwrap();
        assert_tiles_window(&expected, window());

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..16 {
            let mut shuffled = input.clone();
            shuffled.shuffle(&mut rng);
            assert_eq!(normalize(&shuffled, window()).unwrap(), expected);
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        let input = [
            iv(On, at(9, 0), at(10, 0)),
            iv(Production, at(9, 30), at(9, 45)),
        ];
        let first = normalize(&input, window()).unwrap();
        let second = normalize(&input, window()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn messy_input_still_tiles_the_window() {
        let input = [
            iv(Production, at(7, 0), at(9, 0)),
            iv(On, at(8, 45), at(13, 0)),
            iv(Production, at(12, 59), at(13, 1)),
            iv(Off, at(13, 0), at(14, 0)),
            iv(On, at(16, 0), at(16, 0)),
            iv(Production, at(17, 55), at(23, 0)),
        ];
        let segments = normalize(&input, window()).unwrap();
        assert_tiles_window(&segments, window());
    }
}
