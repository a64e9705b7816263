use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Escape a project display name into a module key fragment.
///
/// The name is decomposed (NFD), combining marks are dropped and spaces
/// become underscores, so `"héhé"` becomes `"hehe"` and `"foo bar"`
/// becomes `"foo_bar"`.
pub fn escape_project_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}
