//! Name-keyed pseudo-random ordering used for seeding and tie-break draws.

/// Folds UTF-16 code units with `h = h * 31 + c`, wrapping at 32 bits.
pub fn name_hash(name: &str) -> i32 {
    name.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Sorts names ascending by [`name_hash`]. The result depends only on the
/// set of names, never on the order they were passed in.
pub fn order_deterministically<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut ordered: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
    ordered.sort_by(|a, b| name_hash(a).cmp(&name_hash(b)).then_with(|| a.cmp(b)));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_examples() {
        assert_eq!(name_hash(""), 0);
        assert_eq!(name_hash("Al"), 2123);
        assert_eq!(name_hash("Bo"), 2157);
    }

    #[test]
    fn test_hash_wraps() {
        // Long names overflow 32 bits and must wrap instead of panicking.
        let long = "Maximilian Alexander Montgomery-Smythe";
        let expected = long
            .encode_utf16()
            .fold(0i64, |h, c| ((h * 31 + c as i64) as i32) as i64) as i32;
        assert_eq!(name_hash(long), expected);
    }

    #[test]
    fn test_order_is_input_independent() {
        assert_eq!(order_deterministically(&["Bo", "Al"]), vec!["Al", "Bo"]);
        assert_eq!(order_deterministically(&["Al", "Bo"]), vec!["Al", "Bo"]);

        let forward = order_deterministically(&["Zoe", "Abe", "Mia", "Lu"]);
        let backward = order_deterministically(&["Lu", "Mia", "Abe", "Zoe"]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_non_ascii_names() {
        // 'ł' is a single UTF-16 unit (0x142).
        assert_eq!(name_hash("ł"), 0x142);
    }
}
