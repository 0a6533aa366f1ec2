//! Accent- and case-insensitive text matching.

use atlas_corpus::Work;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold text for comparison: canonical decomposition, combining marks
/// removed, lowercased. `"Éphémère"` becomes `"ephemere"`.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Normalized search haystack of a work: title, creator, comment,
/// keywords and categories, space separated.
pub fn haystack(work: &Work) -> String {
    let parts = work
        .title
        .iter()
        .chain(work.creator.iter())
        .chain(work.comment.iter())
        .chain(work.keywords.iter())
        .chain(work.categories().iter())
        .map(String::as_str)
        .collect::<Vec<_>>();

    normalize(&parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_diacritics() {
        assert_eq!(normalize("Éphémère"), "ephemere");
        assert_eq!(normalize("Jeux VIDÉO"), "jeux video");
        assert_eq!(normalize("Ça"), "ca");
    }

    #[test]
    fn test_haystack_covers_fields() {
        let work = Work::new("1")
            .with_title("La Jetée")
            .with_creator("Chris Marker")
            .with_comment("Un photo-roman")
            .with_keywords(["mémoire"])
            .with_categories(["temps vécu"]);

        let text = haystack(&work);
        assert!(text.contains("la jetee"));
        assert!(text.contains("chris marker"));
        assert!(text.contains("photo-roman"));
        assert!(text.contains("memoire"));
        assert!(text.contains("temps vecu"));
    }

    #[test]
    fn test_haystack_of_bare_work_is_empty() {
        assert_eq!(haystack(&Work::new("x")), "");
    }
}
