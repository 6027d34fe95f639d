/// A user record as the upstream backend stores it. Owned by the recipient
/// source - the dispatcher reads these, it never mutates them.
///
/// `email` is deliberately a plain `String` here: the upstream store makes no
/// promise that it holds a well-formed address (or any address at all), so
/// parsing into [`crate::domain::RecipientEmail`] happens at dispatch time and
/// records that fail it are skipped rather than rejected.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Recipient {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    // The listing endpoint pre-filters on the active flag and omits it from
    // its payload; records it returns are eligible unless stated otherwise.
    true
}
