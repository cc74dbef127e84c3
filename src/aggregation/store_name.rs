//! Store name normalization for presentation.

/// Title-cases a free-text store name.
///
/// Each whitespace-delimited word gets an upper-case first character and a
/// lower-case remainder; words are re-joined with a single space, so runs of
/// whitespace and leading/trailing whitespace disappear.
///
/// # Examples
///
/// ```
/// use payroll_summary::aggregation::title_case_store;
///
/// assert_eq!(title_case_store("  main   ST "), "Main St");
/// assert_eq!(title_case_store("MCDONALD'S #12"), "Mcdonald's #12");
/// ```
pub fn title_case_store(name: &str) -> String {
    name.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_words_are_capitalized() {
        assert_eq!(title_case_store("main st"), "Main St");
    }

    #[test]
    fn test_uppercase_words_are_lowered_after_first_char() {
        assert_eq!(title_case_store("DOWNTOWN PLAZA"), "Downtown Plaza");
    }

    #[test]
    fn test_irregular_spacing_collapses() {
        assert_eq!(title_case_store("\tnorth  \n side "), "North Side");
    }

    #[test]
    fn test_digits_and_punctuation_pass_through() {
        assert_eq!(title_case_store("store #7-b"), "Store #7-b");
    }

    #[test]
    fn test_empty_name_stays_empty() {
        assert_eq!(title_case_store("   "), "");
    }

    #[test]
    fn test_non_ascii_letters() {
        assert_eq!(title_case_store("état ÉLYSÉE"), "État Élysée");
    }
}
