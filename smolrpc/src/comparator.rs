use crate::{pb, Error};
use prost::Message;
use serde::{Deserialize, Serialize};

/// Package of the server-side comparator classes
const COMPARATOR_PACKAGE: &str = "org.apache.hadoop.hbase.filter.";

/// Relational operator applied to a cell value
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum CompareOp {
    #[serde(rename = "less")]
    Less,

    #[serde(rename = "less_or_equal")]
    LessOrEqual,

    #[serde(rename = "equal")]
    Equal,

    #[serde(rename = "not_equal")]
    NotEqual,

    #[serde(rename = "greater_or_equal")]
    GreaterOrEqual,

    #[serde(rename = "greater")]
    Greater,

    #[serde(rename = "no_op")]
    NoOp,
}

impl From<CompareOp> for pb::CompareType {
    fn from(value: CompareOp) -> Self {
        match value {
            CompareOp::Less => Self::Less,
            CompareOp::LessOrEqual => Self::LessOrEqual,
            CompareOp::Equal => Self::Equal,
            CompareOp::NotEqual => Self::NotEqual,
            CompareOp::GreaterOrEqual => Self::GreaterOrEqual,
            CompareOp::Greater => Self::Greater,
            CompareOp::NoOp => Self::NoOp,
        }
    }
}

impl From<pb::CompareType> for CompareOp {
    fn from(value: pb::CompareType) -> Self {
        match value {
            pb::CompareType::Less => Self::Less,
            pb::CompareType::LessOrEqual => Self::LessOrEqual,
            pb::CompareType::Equal => Self::Equal,
            pb::CompareType::NotEqual => Self::NotEqual,
            pb::CompareType::GreaterOrEqual => Self::GreaterOrEqual,
            pb::CompareType::Greater => Self::Greater,
            pb::CompareType::NoOp => Self::NoOp,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum BitwiseOp {
    #[serde(rename = "and")]
    And,

    #[serde(rename = "or")]
    Or,

    #[serde(rename = "xor")]
    Xor,
}

impl From<BitwiseOp> for pb::BitwiseOp {
    fn from(value: BitwiseOp) -> Self {
        match value {
            BitwiseOp::And => Self::And,
            BitwiseOp::Or => Self::Or,
            BitwiseOp::Xor => Self::Xor,
        }
    }
}

impl From<pb::BitwiseOp> for BitwiseOp {
    fn from(value: pb::BitwiseOp) -> Self {
        match value {
            pb::BitwiseOp::And => Self::And,
            pb::BitwiseOp::Or => Self::Or,
            pb::BitwiseOp::Xor => Self::Xor,
        }
    }
}

/// A rule comparing a stored cell value against an operand
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value")]
pub enum Comparator {
    /// Lexicographic comparison against raw bytes
    ///
    /// `None` is the "no value" sentinel used to check that a column
    /// does not exist; `Some(vec![])` compares against an empty value.
    #[serde(rename = "binary")]
    Binary(Option<Vec<u8>>),

    /// Compares only the first `prefix.len()` bytes
    #[serde(rename = "binary_prefix")]
    BinaryPrefix(Vec<u8>),

    #[serde(rename = "bit")]
    Bit { value: Vec<u8>, op: BitwiseOp },

    /// Big-endian 8 byte integer
    #[serde(rename = "long")]
    Long(i64),

    #[serde(rename = "null")]
    Null,

    /// Case-insensitive substring match
    #[serde(rename = "substring")]
    Substring(String),

    #[serde(rename = "regex")]
    Regex {
        pattern: String,
        flags: i32,
        charset: String,
    },
}

/// Anything that can be turned into an encoded comparator
pub trait ComparatorSpec {
    fn construct(&self) -> crate::Result<pb::Comparator>;
}

fn malformed(reason: impl Into<String>) -> Error {
    Error::MalformedComparator(reason.into())
}

fn comparable(value: Option<Vec<u8>>) -> Option<pb::ByteArrayComparable> {
    Some(pb::ByteArrayComparable { value })
}

fn operand(comparable: Option<pb::ByteArrayComparable>) -> Option<Vec<u8>> {
    comparable.and_then(|c| c.value)
}

fn decode<M: Message + Default>(bytes: &[u8]) -> crate::Result<M> {
    M::decode(bytes).map_err(|e| malformed(e.to_string()))
}

impl Comparator {
    /// Equality operand for [`crate::CheckAndMutate::if_equals`]
    pub fn equals(value: impl Into<Vec<u8>>) -> Self {
        Self::Binary(Some(value.into()))
    }

    /// Sentinel matching a column that has no value
    pub fn absent() -> Self {
        Self::Binary(None)
    }

    /// Short class name of the server-side comparator
    pub fn class(&self) -> &'static str {
        match self {
            Self::Binary(_) => "BinaryComparator",
            Self::BinaryPrefix(_) => "BinaryPrefixComparator",
            Self::Bit { .. } => "BitComparator",
            Self::Long(_) => "LongComparator",
            Self::Null => "NullComparator",
            Self::Substring(_) => "SubstringComparator",
            Self::Regex { .. } => "RegexStringComparator",
        }
    }

    /// Decodes an encoded comparator back into its logical comparison
    pub fn from_proto(proto: &pb::Comparator) -> crate::Result<Self> {
        let class = proto
            .name
            .strip_prefix(COMPARATOR_PACKAGE)
            .ok_or_else(|| malformed(format!("unknown comparator class {:?}", proto.name)))?;

        let bytes = proto.serialized_comparator.as_deref().unwrap_or_default();

        let comparator = match class {
            "BinaryComparator" => {
                Self::Binary(operand(decode::<pb::BinaryComparator>(bytes)?.comparable))
            }
            "BinaryPrefixComparator" => Self::BinaryPrefix(
                operand(decode::<pb::BinaryPrefixComparator>(bytes)?.comparable)
                    .unwrap_or_default(),
            ),
            "BitComparator" => {
                let bit = decode::<pb::BitComparator>(bytes)?;
                let op = pb::BitwiseOp::try_from(bit.bitwise_op)
                    .map_err(|_| malformed(format!("unknown bitwise op {}", bit.bitwise_op)))?;

                Self::Bit {
                    value: operand(bit.comparable).unwrap_or_default(),
                    op: op.into(),
                }
            }
            "LongComparator" => {
                let value =
                    operand(decode::<pb::LongComparator>(bytes)?.comparable).unwrap_or_default();

                let buf: [u8; 8] = value
                    .as_slice()
                    .try_into()
                    .map_err(|_| malformed(format!("long operand has {} bytes", value.len())))?;

                Self::Long(i64::from_be_bytes(buf))
            }
            "NullComparator" => {
                decode::<pb::NullComparator>(bytes)?;
                Self::Null
            }
            "SubstringComparator" => Self::Substring(decode::<pb::SubstringComparator>(bytes)?.substr),
            "RegexStringComparator" => {
                let regex = decode::<pb::RegexStringComparator>(bytes)?;

                Self::Regex {
                    pattern: regex.pattern,
                    flags: regex.pattern_flags,
                    charset: regex.charset,
                }
            }
            other => return Err(malformed(format!("unsupported comparator class {other:?}"))),
        };

        Ok(comparator)
    }
}

impl ComparatorSpec for Comparator {
    fn construct(&self) -> crate::Result<pb::Comparator> {
        let serialized = match self {
            Self::Binary(value) => pb::BinaryComparator {
                comparable: comparable(value.clone()),
            }
            .encode_to_vec(),
            Self::BinaryPrefix(prefix) => {
                if prefix.is_empty() {
                    return Err(malformed("binary prefix must not be empty"));
                }

                pb::BinaryPrefixComparator {
                    comparable: comparable(Some(prefix.clone())),
                }
                .encode_to_vec()
            }
            Self::Bit { value, op } => {
                if value.is_empty() {
                    return Err(malformed("bit mask must not be empty"));
                }

                pb::BitComparator {
                    comparable: comparable(Some(value.clone())),
                    bitwise_op: pb::BitwiseOp::from(*op) as i32,
                }
                .encode_to_vec()
            }
            Self::Long(n) => pb::LongComparator {
                comparable: comparable(Some(n.to_be_bytes().to_vec())),
            }
            .encode_to_vec(),
            Self::Null => pb::NullComparator {}.encode_to_vec(),
            Self::Substring(substr) => {
                if substr.is_empty() {
                    return Err(malformed("substring must not be empty"));
                }

                // NOTE: The server compares lower-cased values
                pb::SubstringComparator {
                    substr: substr.to_lowercase(),
                }
                .encode_to_vec()
            }
            Self::Regex {
                pattern,
                flags,
                charset,
            } => {
                if pattern.is_empty() {
                    return Err(malformed("regex pattern must not be empty"));
                }
                if charset.is_empty() {
                    return Err(malformed("regex charset must not be empty"));
                }

                pb::RegexStringComparator {
                    pattern: pattern.clone(),
                    pattern_flags: *flags,
                    charset: charset.clone(),
                    engine: Some("JAVA".into()),
                }
                .encode_to_vec()
            }
        };

        Ok(pb::Comparator {
            name: format!("{COMPARATOR_PACKAGE}{}", self.class()),
            serialized_comparator: Some(serialized),
        })
    }
}

/// Already encoded comparators are passed through as-is
impl ComparatorSpec for pb::Comparator {
    fn construct(&self) -> crate::Result<pb::Comparator> {
        if self.name.is_empty() {
            return Err(malformed("comparator has no class name"));
        }

        Ok(self.clone())
    }
}
