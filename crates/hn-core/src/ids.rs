/// Allocate the next id for a prefix-counter scheme ("n1", "n2", "c7", ...).
///
/// Scans existing ids so allocation stays correct after a wholesale load,
/// where counters are not persisted.
pub fn next_prefixed_id<'a, I>(prefix: &str, ids: I) -> String
where
    I: Iterator<Item = &'a str>,
{
    let mut max = 0u32;
    for id in ids {
        if let Some(num) = id.strip_prefix(prefix) {
            if let Ok(value) = num.parse::<u32>() {
                if value > max {
                    max = value;
                }
            }
        }
    }
    format!("{}{}", prefix, max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_id_starts_at_one() {
        assert_eq!(next_prefixed_id("n", std::iter::empty()), "n1");
    }

    #[test]
    fn skips_foreign_prefixes_and_gaps() {
        let ids = ["n1", "n5", "c3", "n2x"];
        assert_eq!(next_prefixed_id("n", ids.iter().copied()), "n6");
        assert_eq!(next_prefixed_id("c", ids.iter().copied()), "c4");
    }
}
