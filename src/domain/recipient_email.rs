use validator::validate_email;

/// # Type Driven Development
/// Making an incorrect usage pattern unrepresentable, by construction, is known as *type driven
/// development*. It is a powerful approach to encode the constraints of a domain we are trying to
/// model inside the type system, leaning on the compiler to make sure they are enforced.
///
/// Everything downstream of the on-demand boundary and the dispatch-time filter works with
/// `RecipientEmail`, never with a raw string: if you are holding one, it parsed.
#[derive(Debug, Clone)]
pub struct RecipientEmail(String);

impl RecipientEmail {
    /// Returns an instance of `RecipientEmail` if the input is a syntactically valid email
    /// address, an error message otherwise.
    pub fn parse(s: String) -> Result<RecipientEmail, String> {
        if validate_email(&s) {
            Ok(Self(s))
        } else {
            Err(format!("{s} is not a valid email address."))
        }
    }
}

/// The caller gets a shared reference to the inner string. This gives the caller **read-only**
/// access, they have no way to compromise our invariants!
impl AsRef<str> for RecipientEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecipientEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
