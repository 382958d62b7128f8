//! Lead pipeline metrics

use super::{mean, ratio_percent};
use staycrm_core::{Lead, LeadStatus};

/// Number of leads with `status == Converted`
#[must_use]
pub fn converted_leads(leads: &[Lead]) -> usize {
    count_status(leads, LeadStatus::Converted)
}

/// Number of leads with `status == Hot`
#[must_use]
pub fn hot_leads(leads: &[Lead]) -> usize {
    count_status(leads, LeadStatus::Hot)
}

/// Converted leads as a percentage of all leads; `0` for no leads
#[must_use]
pub fn conversion_rate(leads: &[Lead]) -> f64 {
    ratio_percent(converted_leads(leads), leads.len())
}

/// Count per status, in pipeline order, including zero counts
#[must_use]
pub fn lead_status_counts(leads: &[Lead]) -> Vec<(LeadStatus, usize)> {
    LeadStatus::ALL
        .iter()
        .map(|status| (*status, count_status(leads, *status)))
        .collect()
}

/// Mean hours from creation to last contact, over contacted leads only
///
/// `0` when no lead has been contacted.
#[must_use]
pub fn average_response_time_hours(leads: &[Lead]) -> f64 {
    let (sum, count) = leads
        .iter()
        .filter_map(|lead| {
            lead.last_contact_date
                .map(|contact| (contact - lead.created_date).num_seconds() as f64 / 3600.0)
        })
        .fold((0.0, 0), |(sum, count), hours| (sum + hours, count + 1));

    mean(sum, count)
}

fn count_status(leads: &[Lead], status: LeadStatus) -> usize {
    leads.iter().filter(|lead| lead.status == status).count()
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures::{at, lead};
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use staycrm_core::LeadSource;

    fn status_strategy() -> impl Strategy<Value = LeadStatus> {
        prop::sample::select(LeadStatus::ALL.to_vec())
    }

    #[test]
    fn test_empty_leads() {
        assert_eq!(conversion_rate(&[]), 0.0);
        assert_eq!(hot_leads(&[]), 0);
        assert_eq!(average_response_time_hours(&[]), 0.0);
    }

    #[test]
    fn test_conversion_rate_mixture() {
        let leads = vec![
            lead("a", LeadSource::Web, LeadStatus::Converted),
            lead("b", LeadSource::Web, LeadStatus::Lost),
            lead("c", LeadSource::Call, LeadStatus::Converted),
            lead("d", LeadSource::Call, LeadStatus::Hot),
        ];

        assert_eq!(conversion_rate(&leads), 50.0);
        assert_eq!(hot_leads(&leads), 1);
    }

    #[test]
    fn test_status_counts_include_zeros() {
        let leads = vec![lead("a", LeadSource::Web, LeadStatus::Hot)];
        let counts = lead_status_counts(&leads);

        assert_eq!(counts.len(), 5);
        assert_eq!(counts[1], (LeadStatus::Hot, 1));
        assert_eq!(counts[3], (LeadStatus::Converted, 0));
    }

    #[test]
    fn test_response_time_ignores_uncontacted() {
        let mut quick = lead("a", LeadSource::Web, LeadStatus::Hot);
        quick.last_contact_date = Some(quick.created_date + Duration::hours(2));
        let mut slow = lead("b", LeadSource::Web, LeadStatus::Hot);
        slow.created_date = at(2026, 9, 1, 0);
        slow.last_contact_date = Some(at(2026, 9, 1, 6));
        let untouched = lead("c", LeadSource::Web, LeadStatus::New);

        assert_eq!(average_response_time_hours(&[quick, slow, untouched]), 4.0);
    }

    proptest! {
        #[test]
        fn prop_conversion_rate_matches_definition(statuses in prop::collection::vec(status_strategy(), 0..200)) {
            let leads: Vec<Lead> = statuses
                .iter()
                .enumerate()
                .map(|(i, status)| lead(&i.to_string(), LeadSource::Web, *status))
                .collect();

            let converted = statuses.iter().filter(|s| **s == LeadStatus::Converted).count();
            let expected = if leads.is_empty() {
                0.0
            } else {
                100.0 * converted as f64 / leads.len() as f64
            };

            prop_assert!((conversion_rate(&leads) - expected).abs() < 1e-9);
        }
    }
}
