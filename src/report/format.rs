//! 화면/파일 출력용 숫자 서식. 모든 출력은 같은 반올림 규칙(0.5는 0에서 멀어지는 방향)을 쓴다.

use chrono::NaiveDate;

pub const CURRENCY_SYMBOL: &str = "₹";

/// 소수 `decimals` 자리에서 반올림한다.
pub fn round_half_up(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `₹1,23,456` 대신 `₹123,456` 형태(3자리 구분)로 소수점 없이 표시한다.
pub fn format_inr(value: f64) -> String {
    let rounded = round_half_up(value, 0);
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{CURRENCY_SYMBOL}{}", group_thousands(&digits))
}

/// `format_inr` 출력 문자열을 다시 숫자로 읽는다.
pub fn parse_inr(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let digits: String = rest
        .trim_start_matches(CURRENCY_SYMBOL)
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let value: f64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// 시간 [h], 소수 1자리
pub fn format_hours(value: f64) -> String {
    format!("{:.1}", round_half_up(value, 1))
}

/// 시간 [h], 정수
pub fn format_whole_hours(value: f64) -> String {
    format!("{:.0}", round_half_up(value, 0))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_percent(value: f64) -> String {
    format!("{value}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(999.4), "₹999");
        assert_eq!(format_inr(1000.0), "₹1,000");
        assert_eq!(format_inr(123_456_789.5), "₹123,456,790");
        assert_eq!(format_inr(-16_000.0), "-₹16,000");
    }

    #[test]
    fn currency_parses_back() {
        assert_eq!(parse_inr("₹1,234,567"), Some(1_234_567.0));
        assert_eq!(parse_inr("-₹16,000"), Some(-16_000.0));
        assert_eq!(parse_inr("n/a"), None);
    }

    #[test]
    fn hours_round_half_up() {
        assert_eq!(format_hours(33.75), "33.8");
        assert_eq!(format_hours(22.5), "22.5");
        assert_eq!(format_whole_hours(101.25), "101");
        assert_eq!(format_whole_hours(2.5), "3");
    }
}
