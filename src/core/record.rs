use serde::Deserialize;
use serde_json::Value;

use super::types::InputRecord;

/// Savings assumed for the golden-years projection when none is given.
pub const DEFAULT_TOTAL_SAVINGS: f64 = 300_000.0;

const CHILDREN_MARKER: &str = "yes";

/// Flat field mapping as submitted by a form or API client. Values may be
/// numbers, numeric-looking text, or anything else; coercion never fails.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecordFields {
    pub monthly_income: Option<Value>,
    pub monthly_expenses: Option<Value>,
    pub monthly_premium: Option<Value>,
    pub death_coverage: Option<Value>,
    pub ci_coverage: Option<Value>,
    pub emergency_fund: Option<Value>,
    pub retirement_savings: Option<Value>,
    pub total_savings: Option<Value>,
    pub age: Option<Value>,
    pub has_children: Option<Value>,
    pub num_children: Option<Value>,
    pub product_type: Option<Value>,
    pub policy_term: Option<Value>,
}

impl From<&RecordFields> for InputRecord {
    fn from(fields: &RecordFields) -> Self {
        let total_savings = float_field(&fields.total_savings);
        InputRecord {
            monthly_income: float_field(&fields.monthly_income),
            monthly_expenses: float_field(&fields.monthly_expenses),
            monthly_premium: float_field(&fields.monthly_premium),
            death_coverage: float_field(&fields.death_coverage),
            ci_coverage: float_field(&fields.ci_coverage),
            emergency_fund: float_field(&fields.emergency_fund),
            retirement_savings: float_field(&fields.retirement_savings),
            // Zero counts as unset here.
            total_savings: if total_savings == 0.0 {
                DEFAULT_TOTAL_SAVINGS
            } else {
                total_savings
            },
            age: int_field(&fields.age),
            has_children: text_field(&fields.has_children).as_deref() == Some(CHILDREN_MARKER),
            num_children: int_field(&fields.num_children),
            product_type: text_field(&fields.product_type).unwrap_or_default(),
            policy_term: int_field(&fields.policy_term),
        }
    }
}

impl From<RecordFields> for InputRecord {
    fn from(fields: RecordFields) -> Self {
        InputRecord::from(&fields)
    }
}

fn text_field(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    }
}

fn float_field(value: &Option<Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_float_prefix(s),
        _ => None,
    };
    match parsed {
        Some(v) if !v.is_nan() && v != 0.0 => v,
        _ => 0.0,
    }
}

fn int_field(value: &Option<Value>) -> i64 {
    let parsed = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64)),
        Some(Value::String(s)) => parse_int_prefix(s),
        _ => None,
    };
    parsed.unwrap_or(0)
}

/// Parses the longest leading decimal number in `raw`, ignoring leading
/// whitespace and any trailing garbage ("12.5kg" -> 12.5).
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let sign = if s.starts_with('-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Parses the leading integer in `raw` ("27.9" -> 27, "10 years" -> 10).
/// A "0x" prefix switches to hexadecimal ("0x10" -> 16).
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, body) = match unsigned.get(..2) {
        Some("0x") | Some("0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };
    let end = body
        .bytes()
        .position(|b| !(b as char).is_digit(radix))
        .unwrap_or(body.len());
    if end == 0 {
        return None;
    }
    match i64::from_str_radix(&body[..end], radix) {
        Ok(v) if negative => Some(-v),
        Ok(v) => Some(v),
        // Out of range for i64; saturate rather than drop the value.
        Err(_) if negative => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> RecordFields {
        serde_json::from_value(value).expect("fields should decode")
    }

    #[test]
    fn parse_float_prefix_takes_leading_number() {
        assert_eq!(parse_float_prefix("5000"), Some(5000.0));
        assert_eq!(parse_float_prefix("  12.5kg"), Some(12.5));
        assert_eq!(parse_float_prefix("-3e2x"), Some(-300.0));
        assert_eq!(parse_float_prefix("7e"), Some(7.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("$100"), None);
    }

    #[test]
    fn parse_int_prefix_truncates() {
        assert_eq!(parse_int_prefix("27.9"), Some(27));
        assert_eq!(parse_int_prefix(" 10 years"), Some(10));
        assert_eq!(parse_int_prefix("-4"), Some(-4));
        assert_eq!(parse_int_prefix("x1"), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn parse_int_prefix_reads_hex_prefix() {
        assert_eq!(parse_int_prefix("0x10"), Some(16));
        assert_eq!(parse_int_prefix("-0XfF years"), Some(-255));
        assert_eq!(parse_int_prefix("0x"), None);
        assert_eq!(parse_int_prefix("0xg"), None);
        assert_eq!(parse_int_prefix("010"), Some(10));
    }

    #[test]
    fn hex_policy_term_reaches_the_record() {
        let record = InputRecord::from(fields(json!({ "age": 62, "policyTerm": "0x10" })));
        assert_eq!(record.policy_term, 16);
    }

    #[test]
    fn missing_fields_use_documented_defaults() {
        let record = InputRecord::from(RecordFields::default());
        assert_eq!(record, InputRecord::default());
        assert_eq!(record.total_savings, DEFAULT_TOTAL_SAVINGS);
        assert!(!record.has_children);
        assert_eq!(record.product_type, "");
    }

    #[test]
    fn numeric_text_and_numbers_coerce_alike() {
        let record = InputRecord::from(fields(json!({
            "monthlyIncome": "5,000",
            "monthlyExpenses": 3200.5,
            "monthlyPremium": "800",
            "age": "27.9",
            "numChildren": 2.7,
            "policyTerm": "15",
            "totalSavings": "0",
            "deathCoverage": "lots",
            "ciCoverage": true,
            "emergencyFund": null
        })));

        assert_eq!(record.monthly_income, 5.0);
        assert_eq!(record.monthly_expenses, 3200.5);
        assert_eq!(record.monthly_premium, 800.0);
        assert_eq!(record.age, 27);
        assert_eq!(record.num_children, 2);
        assert_eq!(record.policy_term, 15);
        assert_eq!(record.total_savings, DEFAULT_TOTAL_SAVINGS);
        assert_eq!(record.death_coverage, 0.0);
        assert_eq!(record.ci_coverage, 0.0);
        assert_eq!(record.emergency_fund, 0.0);
    }

    #[test]
    fn negative_values_are_kept() {
        let record = InputRecord::from(fields(json!({
            "monthlyIncome": -100,
            "totalSavings": "-5"
        })));
        assert_eq!(record.monthly_income, -100.0);
        assert_eq!(record.total_savings, -5.0);
    }

    #[test]
    fn has_children_requires_exact_marker() {
        let yes = InputRecord::from(fields(json!({ "hasChildren": "yes" })));
        let upper = InputRecord::from(fields(json!({ "hasChildren": "Yes" })));
        let boolean = InputRecord::from(fields(json!({ "hasChildren": true })));
        assert!(yes.has_children);
        assert!(!upper.has_children);
        assert!(!boolean.has_children);
    }

    #[test]
    fn product_type_passes_through_as_text() {
        let record = InputRecord::from(fields(json!({ "productType": "investment-linked" })));
        assert_eq!(record.product_type, "investment-linked");
    }
}
