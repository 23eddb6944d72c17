use std::borrow::Cow;

/// How property names, constructor parameter names and requested edit names
/// are normalized before they are matched against one another.
///
/// The default, [`NameCase::LowerFirst`], lower-cases the first character only,
/// so that a `Name` property and a `name` constructor parameter line up while
/// `firstName` and `firstname` stay distinct.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[non_exhaustive]
pub enum NameCase {
    /// Lower-case the first character, keep the rest verbatim
    #[default]
    LowerFirst,

    /// Names must match exactly
    Exact,

    /// Lower-case every character
    IgnoreCase,
}

impl NameCase {
    /// Normalizes `name` according to this rule. Borrows when nothing changes.
    pub fn normalize<'a>(self, name: &'a str) -> Cow<'a, str> {
        match self {
            NameCase::Exact => Cow::Borrowed(name),
            NameCase::IgnoreCase => {
                if name.chars().any(char::is_uppercase) {
                    Cow::Owned(name.to_lowercase())
                } else {
                    Cow::Borrowed(name)
                }
            }
            NameCase::LowerFirst => {
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) if first.is_uppercase() => {
                        let mut normalized = String::with_capacity(name.len());
                        normalized.extend(first.to_lowercase());
                        normalized.push_str(chars.as_str());
                        Cow::Owned(normalized)
                    }
                    _ => Cow::Borrowed(name),
                }
            }
        }
    }

    /// Returns true if both names normalize to the same key
    pub fn matches(self, left: &str, right: &str) -> bool {
        self.normalize(left) == self.normalize(right)
    }
}

impl core::fmt::Display for NameCase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NameCase::LowerFirst => write!(f, "lowerFirst"),
            NameCase::Exact => write!(f, "exact"),
            NameCase::IgnoreCase => write!(f, "ignore-case"),
        }
    }
}
