//! Entity builders shared by unit tests

use chrono::{DateTime, TimeZone, Utc};
use staycrm_core::{
    Booking, BookingStatus, CallRecord, CallStatus, CallType, Lead, LeadSource, LeadStatus,
};

pub(crate) fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

pub(crate) fn lead(id: &str, source: LeadSource, status: LeadStatus) -> Lead {
    Lead {
        id: id.to_string(),
        name: format!("Guest {id}"),
        email: format!("{id}@example.com"),
        phone: String::new(),
        source,
        status,
        created_date: at(2026, 9, 1, 9),
        last_contact_date: None,
        expected_revenue: 0.0,
        property_interest: None,
        assigned_to: None,
    }
}

pub(crate) fn call(id: &str, status: CallStatus, duration: u32, date: DateTime<Utc>) -> CallRecord {
    CallRecord {
        id: id.to_string(),
        call_type: CallType::Incoming,
        status,
        duration,
        date,
        result: String::new(),
        user: "Agent".to_string(),
        phone: String::new(),
        notes: None,
        lead_id: None,
    }
}

pub(crate) fn booking(id: &str, amount: f64, nights: u32, created: DateTime<Utc>) -> Booking {
    Booking {
        id: id.to_string(),
        guest_name: String::new(),
        guest_email: format!("{id}@example.com"),
        property_name: String::new(),
        total_amount: amount,
        nights,
        status: BookingStatus::Confirmed,
        created_date: created,
        check_in: None,
        check_out: None,
    }
}
