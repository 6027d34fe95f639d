use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone)]
pub struct RecipientName(String);

impl RecipientName {
    /// Returns an instance of `RecipientName` if the input satisfies all our validation constraints
    /// on recipient names, an error message otherwise.
    ///
    /// The on-demand endpoint requires a usable name for every entry; the scheduled path never
    /// goes through here because stored records may legitimately have no name at all (the
    /// composer substitutes a placeholder for those).
    pub fn parse(s: String) -> Result<RecipientName, String> {
        // `.trim()` returns a view over the input `s` without trailing whitespace-like characters.
        // `.is_empty` checks if the view contains any character.
        let is_empty_or_whitespace = s.trim().is_empty();

        // A grapheme is defined by the Unicode standard as a "user-perceived" character: `a̐` is a
        // single grapheme, but it is composed of two characters. `graphemes` returns an iterator
        // over the graphemes in the input `s`. `true` specifies that we want to use the extended
        // grapheme definition set, the recommended one.
        let is_too_long = s.graphemes(true).count() > 256;

        let forbidden_characters = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];
        let contains_forbidden_characters = s.chars().any(|g| forbidden_characters.contains(&g));

        if is_empty_or_whitespace || is_too_long || contains_forbidden_characters {
            Err(format!("{s} is not a valid recipient name."))
        } else {
            Ok(Self(s))
        }
    }
}

/// The caller gets a shared reference to the inner string. This gives the caller **read-only**
/// access, they have no way to compromise our invariants!
impl AsRef<str> for RecipientName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
