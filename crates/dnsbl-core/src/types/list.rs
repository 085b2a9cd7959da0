use serde::{Deserialize, Deserializer, Serialize};

/// A list of strings that may be given as a single value.
///
/// Used for nameservers, addresses and blacklists so that callers can pass
/// either `"1.2.3.4"` or `["1.2.3.4", "5.6.7.8"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Repr", into = "Vec<String>")]
pub struct OneOrMany(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    One(String),
    Many(Vec<String>),
}

impl From<Repr> for OneOrMany {
    fn from(repr: Repr) -> Self {
        match repr {
            Repr::One(value) => Self(vec![value]),
            Repr::Many(values) => Self(values),
        }
    }
}

impl From<OneOrMany> for Vec<String> {
    fn from(list: OneOrMany) -> Self {
        list.0
    }
}

impl OneOrMany {
    /// Number of values
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no values were given
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the values
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Values as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Consume into the underlying vector
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Serde helper for `Vec<String>` fields that accept a single string.
    pub(crate) fn deserialize_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Self::deserialize(deserializer).map(Self::into_vec)
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for OneOrMany {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<&String> for OneOrMany {
    fn from(value: &String) -> Self {
        Self(vec![value.clone()])
    }
}

impl<S: Into<String>> From<Vec<S>> for OneOrMany {
    fn from(values: Vec<S>) -> Self {
        values.into_iter().collect()
    }
}

impl<S: Into<String> + Clone> From<&[S]> for OneOrMany {
    fn from(values: &[S]) -> Self {
        values.iter().cloned().collect()
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for OneOrMany {
    fn from(values: [S; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for OneOrMany {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for OneOrMany {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a OneOrMany {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
