use std::fmt;
use std::iter::FromIterator;
use std::ops::Deref;
use std::str::FromStr;

use smallvec::SmallVec;

/// Named values extracted from a request, kept in insertion order.
///
/// Inserting an existing name replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    buf: SmallVec<[(String, String); 8]>,
}

impl Params {
    pub fn new() -> Self {
        Self {
            buf: SmallVec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.buf
            .iter()
            .find_map(|(k, v)| if name == k { Some(v.as_str()) } else { None })
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Option<Result<T, T::Err>> {
        self.get(name).map(T::from_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.buf.iter().any(|(k, _)| k == name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.buf.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.buf.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.buf.iter().position(|(k, _)| k == name)?;
        Some(self.buf.remove(pos).1)
    }

    /// Merges `other` into `self`; values from `other` win.
    pub fn merge(&mut self, other: Params) {
        for (k, v) in other.buf {
            self.insert(k, v);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.buf.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Deref for Params {
    type Target = [(String, String)];
    fn deref(&self) -> &Self::Target {
        &*self.buf
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = smallvec::IntoIter<[(String, String); 8]>;
    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

impl fmt::Display for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.buf.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={:?}", k, v)?;
        }
        Ok(())
    }
}
