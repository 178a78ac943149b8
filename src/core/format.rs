pub fn format_cents(cents: i64) -> String {
    let dollars = (cents as f64 / 100.0).round() as i64;
    let digits = dollars.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if dollars < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

pub fn format_age(age: Option<u32>) -> String {
    match age {
        Some(age) => format!("age {age}"),
        None => "not reachable on the current trajectory".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_cents(0), "$0");
        assert_eq!(format_cents(99_900), "$999");
        assert_eq!(format_cents(100_000), "$1,000");
        assert_eq!(format_cents(150_000_000), "$1,500,000");
    }

    #[test]
    fn rounds_to_whole_dollars() {
        assert_eq!(format_cents(12_345), "$123");
        assert_eq!(format_cents(12_350), "$124");
        assert_eq!(format_cents(-123_456_789), "-$1,234,568");
    }

    #[test]
    fn unreachable_age_reads_as_trajectory() {
        assert_eq!(format_age(Some(52)), "age 52");
        assert!(format_age(None).contains("not reachable"));
    }
}
