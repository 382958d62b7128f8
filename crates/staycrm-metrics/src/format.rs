//! Display formatting for rupee amounts, rates and durations

const LAKH: f64 = 100_000.0;
const CRORE: f64 = 10_000_000.0;

/// Amount in lakhs with one decimal, e.g. `₹3.4L`
#[must_use]
pub fn format_lakhs(amount: f64) -> String {
    format!("₹{:.1}L", amount / LAKH)
}

/// Amount in crores with one decimal, e.g. `₹1.2Cr`
#[must_use]
pub fn format_crores(amount: f64) -> String {
    format!("₹{:.1}Cr", amount / CRORE)
}

/// Whole rupees with Indian digit grouping, e.g. `₹1,50,000`
#[must_use]
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}₹{}", group_indian(&format!("{:.0}", rounded.abs())))
}

/// Crores from one crore, lakhs below that
#[must_use]
pub fn format_currency_compact(amount: f64) -> String {
    if amount.abs() >= CRORE {
        format_crores(amount)
    } else {
        format_lakhs(amount)
    }
}

/// One decimal and a percent sign
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Signed percentage, e.g. `+12.5%` or `-3.0%`
#[must_use]
pub fn format_growth(value: f64) -> String {
    let sign = if value < 0.0 { '-' } else { '+' };
    format!("{sign}{:.1}%", value.abs())
}

/// `m:ss`
#[must_use]
pub fn format_call_duration(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// `Xmin` from a minute up (rounded), `Xsec` below
#[must_use]
pub fn format_duration_short(secs: f64) -> String {
    let secs = secs.round();
    if secs >= 60.0 {
        format!("{:.0}min", (secs / 60.0).round())
    } else {
        format!("{secs:.0}sec")
    }
}

/// Hours with one decimal, e.g. `4.5h`
#[must_use]
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.1}h")
}

/// Group a plain digit string as `xx,xx,xxx`
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}
