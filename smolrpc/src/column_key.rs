use serde::{Deserialize, Deserializer, Serialize, Serializer};

const ALLOWED_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_.#$";

pub fn is_valid_identifier(s: &str) -> bool {
    let all_allowed = s.chars().all(|c| ALLOWED_CHARS.contains(c));

    !s.is_empty() && s.len() < 512 && all_allowed
}

/// The column key addresses a single column of a row
///
/// It is defined as "family:qualifier", where qualifier may be empty
/// (the colon may omitted in that case).
///
/// On the wire, a missing qualifier is sent as an empty byte string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnKey {
    pub family: String,
    pub qualifier: Option<String>,
}

impl ColumnKey {
    /// Builds a column key from its parts, validating the family name
    pub fn new(family: &str, qualifier: &str) -> crate::Result<Self> {
        if !is_valid_identifier(family) {
            return Err(crate::Error::InvalidColumnKey(format!("{family}:{qualifier}")));
        }

        Ok(Self {
            family: family.into(),
            qualifier: (!qualifier.is_empty()).then(|| qualifier.to_owned()),
        })
    }

    pub fn family_bytes(&self) -> Vec<u8> {
        self.family.as_bytes().to_vec()
    }

    pub fn qualifier_bytes(&self) -> Vec<u8> {
        self.qualifier
            .as_deref()
            .map(|cq| cq.as_bytes().to_vec())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}",
            self.family,
            self.qualifier.as_deref().unwrap_or("")
        )
    }
}

impl TryFrom<&str> for ColumnKey {
    type Error = crate::Error;

    fn try_from(value: &str) -> crate::Result<Self> {
        match value.split_once(':') {
            Some((family, qualifier)) => Self::new(family, qualifier),
            None => Self::new(value, ""),
        }
    }
}

impl Serialize for ColumnKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ColumnKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ColumnKeyVisitor;

        impl<'de> serde::de::Visitor<'de> for ColumnKeyVisitor {
            type Value = ColumnKey;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a string representing ColumnKey")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                ColumnKey::try_from(value).map_err(|_| {
                    serde::de::Error::invalid_value(serde::de::Unexpected::Str(value), &self)
                })
            }
        }

        deserializer.deserialize_str(ColumnKeyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn column_key_parse() {
        let key = ColumnKey::try_from("cf:q1").unwrap();
        assert_eq!(key.family, "cf");
        assert_eq!(key.qualifier.as_deref(), Some("q1"));
        assert_eq!(key.qualifier_bytes(), b"q1");

        let key = ColumnKey::try_from("cf:").unwrap();
        assert_eq!(key.qualifier, None);
        assert!(key.qualifier_bytes().is_empty());

        let key = ColumnKey::try_from("cf").unwrap();
        assert_eq!(key.to_string(), "cf:");
    }

    #[test]
    fn column_key_qualifier_keeps_colons() {
        let key = ColumnKey::try_from("cf:a:b").unwrap();
        assert_eq!(key.qualifier.as_deref(), Some("a:b"));
    }

    #[test]
    fn column_key_invalid_family() {
        assert_eq!(
            ColumnKey::try_from(":q"),
            Err(crate::Error::InvalidColumnKey(":q".into()))
        );
        assert!(ColumnKey::try_from("c f:q").is_err());
    }

    #[test]
    fn column_key_serde() {
        let key = ColumnKey::try_from("cf:q1").unwrap();

        let s = serde_json::to_string(&key).unwrap();
        assert_eq!(s, r#""cf:q1""#);

        let p: ColumnKey = serde_json::from_str(&s).unwrap();
        assert_eq!(p, key);

        assert!(serde_json::from_str::<ColumnKey>(r#""bad family:x""#).is_err());
    }
}
