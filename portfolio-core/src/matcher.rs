//! Loose tag matching.
//!
//! Stack and skill labels are natural-language strings ("React Native",
//! "Tailwind CSS"), so two labels count as the same tag when one contains the
//! other after case and whitespace are folded away.

/// Lower-case `label` and drop every whitespace character.
pub fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// True if either normalized label is a non-empty substring of the other.
///
/// `"Next"` matches `"Next.js"` in both argument orders; `"Next.js"` and
/// `"Nest.js"` do not match.
pub fn labels_match(a: &str, b: &str) -> bool {
    normalized_contains(&normalize(a), &normalize(b))
}

/// Like [`labels_match`], but an empty selection never matches anything.
pub fn selection_matches(selected: Option<&str>, candidate: &str) -> bool {
    match selected {
        Some(sel) => labels_match(sel, candidate),
        None => false,
    }
}

/// True if any tag in `stack` matches `selected`. Stops at the first hit.
pub fn stack_matches<S: AsRef<str>>(selected: &str, stack: &[S]) -> bool {
    let target = normalize(selected);
    if target.is_empty() {
        return false;
    }
    stack
        .iter()
        .any(|tag| normalized_contains(&target, &normalize(tag.as_ref())))
}

/// Exact equality of the normalized forms. Used for toggle detection, where
/// "React" and "React Native" must stay distinct.
pub fn normalized_eq(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

fn normalized_contains(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalize_folds_case_and_whitespace() {
        assert_eq!(normalize("  React\tNative \n"), "reactnative");
        assert_eq!(normalize("Tailwind CSS"), "tailwindcss");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn prefix_matches_in_both_directions() {
        assert!(labels_match("Next", "Next.js"));
        assert!(labels_match("Next.js", "Next"));
    }

    #[test]
    fn near_miss_does_not_match() {
        assert!(!labels_match("Next.js", "Nest.js"));
        assert!(!labels_match("PostgreSQL", "Tailwind"));
    }

    #[test]
    fn whitespace_is_ignored_when_matching() {
        assert!(labels_match("reactnative", "React Native"));
        assert!(labels_match("Django  REST", "django rest"));
    }

    #[test]
    fn empty_labels_never_match() {
        assert!(!labels_match("", "React"));
        assert!(!labels_match("   ", "React"));
        assert!(!labels_match("", ""));
        assert!(!stack_matches("", &["React"]));
    }

    #[test]
    fn no_selection_matches_nothing() {
        assert!(!selection_matches(None, "React"));
        assert!(!selection_matches(None, ""));
        assert!(selection_matches(Some("react"), "React Native"));
    }

    #[test]
    fn stack_match_needs_one_hit() {
        assert!(stack_matches("React", &["React Native", "TypeScript"]));
        assert!(!stack_matches("PostgreSQL", &["Next.js", "Tailwind"]));
        assert!(!stack_matches::<&str>("React", &[]));
    }

    #[test]
    fn normalized_eq_is_exact() {
        assert!(normalized_eq("React Native", "react native"));
        assert!(!normalized_eq("React", "React Native"));
    }

    proptest! {
        #[test]
        fn match_is_symmetric(a in "[a-zA-Z .]{0,12}", b in "[a-zA-Z .]{0,12}") {
            prop_assert_eq!(labels_match(&a, &b), labels_match(&b, &a));
        }

        #[test]
        fn non_empty_label_matches_itself(a in "[a-zA-Z]{1,12}") {
            prop_assert!(labels_match(&a, &a.to_uppercase()));
        }
    }
}
