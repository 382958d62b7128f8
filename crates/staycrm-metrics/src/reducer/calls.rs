//! Call log metrics

use super::{mean, ratio_percent};
use serde::Serialize;
use staycrm_core::{CallRecord, CallStatus, CallType};

/// Mean talk time in seconds over connected calls; `0` when none connected
#[must_use]
pub fn average_call_duration(calls: &[CallRecord]) -> f64 {
    let (sum, count) = connected_totals(calls.iter());
    mean(sum, count)
}

/// Counts per status and direction for a call log
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallOutcomes {
    /// Every call in the log
    pub total: usize,
    /// Reached the other party
    pub connected: usize,
    /// Not answered
    pub missed: usize,
    /// Declined
    pub rejected: usize,
    /// Line engaged
    pub busy: usize,
    /// Guest called in
    pub incoming: usize,
    /// Agent called out
    pub outgoing: usize,
    /// `connected / total * 100`
    pub connect_rate: f64,
}

/// Tally outcomes for a call log
#[must_use]
pub fn call_outcomes(calls: &[CallRecord]) -> CallOutcomes {
    let mut outcomes = calls.iter().fold(CallOutcomes::default(), |mut acc, call| {
        acc.total += 1;
        match call.status {
            CallStatus::Connected => acc.connected += 1,
            CallStatus::Missed => acc.missed += 1,
            CallStatus::Rejected => acc.rejected += 1,
            CallStatus::Busy => acc.busy += 1,
        }
        match call.call_type {
            CallType::Incoming => acc.incoming += 1,
            CallType::Outgoing => acc.outgoing += 1,
        }
        acc
    });
    outcomes.connect_rate = ratio_percent(outcomes.connected, outcomes.total);
    outcomes
}

/// Sum of durations and count over the connected calls of `calls`
pub(crate) fn connected_totals<'a>(calls: impl Iterator<Item = &'a CallRecord>) -> (f64, usize) {
    calls
        .filter(|call| call.is_connected())
        .fold((0.0, 0), |(sum, count), call| {
            (sum + f64::from(call.duration), count + 1)
        })
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::fixtures::{at, call};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_no_connected_calls_is_zero() {
        let calls = vec![
            call("a", CallStatus::Missed, 0, at(2026, 9, 1, 9)),
            call("b", CallStatus::Busy, 40, at(2026, 9, 1, 10)),
        ];
        assert_eq!(average_call_duration(&calls), 0.0);
        assert_eq!(average_call_duration(&[]), 0.0);
    }

    #[test]
    fn test_average_ignores_unconnected_durations() {
        let calls = vec![
            call("a", CallStatus::Connected, 120, at(2026, 9, 1, 9)),
            call("b", CallStatus::Connected, 60, at(2026, 9, 1, 10)),
            call("c", CallStatus::Rejected, 999, at(2026, 9, 1, 11)),
        ];
        assert_eq!(average_call_duration(&calls), 90.0);
    }

    #[test]
    fn test_outcomes_tally() {
        let mut outgoing = call("c", CallStatus::Missed, 0, at(2026, 9, 1, 11));
        outgoing.call_type = CallType::Outgoing;
        let calls = vec![
            call("a", CallStatus::Connected, 120, at(2026, 9, 1, 9)),
            call("b", CallStatus::Connected, 60, at(2026, 9, 1, 10)),
            outgoing,
            call("d", CallStatus::Busy, 0, at(2026, 9, 1, 12)),
        ];

        let outcomes = call_outcomes(&calls);

        assert_eq!(outcomes.total, 4);
        assert_eq!(outcomes.connected, 2);
        assert_eq!(outcomes.missed, 1);
        assert_eq!(outcomes.busy, 1);
        assert_eq!(outcomes.rejected, 0);
        assert_eq!(outcomes.incoming, 3);
        assert_eq!(outcomes.outgoing, 1);
        assert_eq!(outcomes.connect_rate, 50.0);
    }

    #[test]
    fn test_empty_outcomes() {
        assert_eq!(call_outcomes(&[]), CallOutcomes::default());
    }

    proptest! {
        #[test]
        fn prop_average_matches_connected_mean(
            entries in prop::collection::vec((any::<bool>(), 0u32..7200), 0..100)
        ) {
            let calls: Vec<CallRecord> = entries
                .iter()
                .enumerate()
                .map(|(i, (connected, duration))| {
                    let status = if *connected { CallStatus::Connected } else { CallStatus::Missed };
                    call(&i.to_string(), status, *duration, at(2026, 9, 1, 9))
                })
                .collect();

            let connected: Vec<f64> = entries
                .iter()
                .filter(|(connected, _)| *connected)
                .map(|(_, duration)| f64::from(*duration))
                .collect();
            let expected = if connected.is_empty() {
                0.0
            } else {
                connected.iter().sum::<f64>() / connected.len() as f64
            };

            prop_assert!((average_call_duration(&calls) - expected).abs() < 1e-9);
        }
    }
}
