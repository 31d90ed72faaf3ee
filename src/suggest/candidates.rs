use std::ops::RangeInclusive;

const ALPHABET: RangeInclusive<u8> = b'a'..=b'z';

/// Every lowercase-alphabetic string of length 1..=depth, shortest group
/// first, lexicographic within a group.
pub(crate) fn suffixes(depth: u8) -> Vec<String> {
    let mut all = Vec::with_capacity(space_size(depth));

    // strings of length L are the length L-1 strings with one more letter
    let mut stems = vec![String::new()];
    for _ in 0..depth {
        let mut next = Vec::with_capacity(stems.len() * ALPHABET.count());
        for stem in &stems {
            for letter in ALPHABET {
                let mut candidate = String::with_capacity(stem.len() + 1);
                candidate.push_str(stem);
                candidate.push(char::from(letter));
                next.push(candidate);
            }
        }
        all.extend_from_slice(&next);
        stems = next;
    }

    all
}

/// Size of the search space for a given depth: 26 + 26^2 + ... + 26^depth.
pub(crate) fn space_size(depth: u8) -> usize {
    (1..=u32::from(depth)).map(|n| 26usize.pow(n)).sum()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::one(1, 26)]
    #[case::two(2, 702)]
    #[case::three(3, 18_278)]
    #[case::four(4, 475_254)]
    fn test_space_size(#[case] depth: u8, #[case] expected: usize) {
        assert_eq!(space_size(depth), expected);
    }

    #[rstest]
    #[case::one(1)]
    #[case::two(2)]
    #[case::three(3)]
    fn test_suffixes_fill_the_space(#[case] depth: u8) {
        let suffixes = suffixes(depth);
        assert_eq!(suffixes.len(), space_size(depth));

        let unique: HashSet<&String> = suffixes.iter().collect();
        assert_eq!(unique.len(), suffixes.len());
    }

    #[test]
    fn test_suffixes_ordered_shortest_first() {
        let suffixes = suffixes(2);

        assert_eq!(suffixes[0], "a");
        assert_eq!(suffixes[25], "z");
        assert_eq!(suffixes[26], "aa");
        assert_eq!(suffixes[27], "ab");
        assert_eq!(suffixes.last().map(String::as_str), Some("zz"));
    }

    #[test]
    fn test_suffixes_lowercase_alphabetic_only() {
        let suffixes = suffixes(3);

        assert!(
            suffixes
                .iter()
                .all(|s| s.bytes().all(|b| b.is_ascii_lowercase()))
        );
        assert!(suffixes.iter().all(|s| (1..=3).contains(&s.len())));
    }
}
