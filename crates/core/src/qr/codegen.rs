use chrono::Utc;
use rand::Rng;

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        let digit = (n % 36) as u32;
        digits.push(std::char::from_digit(digit, 36).unwrap_or('0'));
        n /= 36;
    }
    digits.iter().rev().collect()
}

/// Generates a new QR code string: the current timestamp in base 36
/// followed by six random base-36 characters, uppercased.
///
/// The timestamp prefix keeps codes roughly sortable by creation time;
/// the random suffix makes collisions within the same millisecond
/// practically impossible.
pub fn generate_unique_code() -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let mut rng = rand::rng();
    let suffix: String = (0..6)
        .map(|_| {
            let digit = rng.random_range(0..36u32);
            std::char::from_digit(digit, 36).unwrap_or('0')
        })
        .collect();
    format!("{}{}", to_base36(millis), suffix).to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_are_uppercase_base36() {
        let code = generate_unique_code();
        assert!(code
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn generated_codes_are_unique() {
        let mut codes: Vec<String> = (0..100).map(|_| generate_unique_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 100);
    }

    #[test]
    fn generated_codes_have_timestamp_prefix_plus_suffix() {
        // A millisecond timestamp in 2024+ is 8-9 base-36 digits.
        let code = generate_unique_code();
        assert!(code.len() >= 14, "unexpectedly short code: {code}");
        assert!(code.len() <= 16, "unexpectedly long code: {code}");
    }

    #[test]
    fn to_base36_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(36 * 36), "100");
    }
}
