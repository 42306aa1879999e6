use serde_json::Value;

use super::format_cell;

/// Headline figure of each command, in priority order.
const PRIORITY_KEYS: [&str; 8] = [
    "total_monthly_cost",
    "monthly_rent_equivalent",
    "total_first_year",
    "surplus_or_shortfall",
    "rate_plus_one_point",
    "total",
    "deleted",
    "cleared",
];

/// Print just the key answer value from the output.
///
/// Looks for the headline field of the result; the full analysis nests its
/// cost breakdown under `cost`. Falls back to the first field.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let target = result
        .as_object()
        .and_then(|m| m.get("cost"))
        .filter(|c| c.is_object())
        .unwrap_or(result);

    if let Value::Object(map) = target {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                println!("{}", format_cell(val));
                return;
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{key}: {}", format_cell(val));
            return;
        }
    }

    println!("{}", format_cell(target));
}
