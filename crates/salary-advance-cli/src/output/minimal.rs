use serde_json::Value;

use super::{format_scalar, payload};

/// Headline fields, most specific first.
const PRIORITY_KEYS: [&str; 5] = [
    "period_payment",
    "net_payout",
    "monthly_gross",
    "net_salary",
    "eligible",
];

/// Print just the headline figure of the output.
///
/// An ineligible advance reports its (zero) payout; an assessed loan reports
/// the payment of the nested schedule when one was produced.
pub fn print_minimal(value: &Value) {
    println!("{}", headline(payload(value)));
}

fn headline(result: &Value) -> String {
    let Value::Object(map) = result else {
        return format_scalar(result);
    };

    if let Some(loan) = map.get("loan").filter(|l| l.is_object()) {
        return headline(loan);
    }

    for key in PRIORITY_KEYS {
        if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
            return format_scalar(val);
        }
    }

    match map.iter().next() {
        Some((key, val)) => format!("{}: {}", key, format_scalar(val)),
        None => String::new(),
    }
}
