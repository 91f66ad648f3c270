use crate::{
    column_key::is_valid_identifier, pb, ColumnKey, CompareOp, Comparator, ComparatorSpec, Error,
    Timestamp,
};
use prost::Message;
use serde::{Deserialize, Serialize};

/// Package of the server-side filter classes
const FILTER_PACKAGE: &str = "org.apache.hadoop.hbase.filter.";

/// Filter lists nested deeper than this are rejected
pub const MAX_FILTER_DEPTH: usize = 32;

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum FilterListOperator {
    /// Logical AND
    #[serde(rename = "must_pass_all")]
    MustPassAll,

    /// Logical OR
    #[serde(rename = "must_pass_one")]
    MustPassOne,
}

impl From<FilterListOperator> for pb::FilterListOperator {
    fn from(value: FilterListOperator) -> Self {
        match value {
            FilterListOperator::MustPassAll => Self::MustPassAll,
            FilterListOperator::MustPassOne => Self::MustPassOne,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Predicate filter, evaluated by the server against a single row
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type", content = "value")]
pub enum Filter {
    /// Passes the row if the latest version of a column satisfies the comparison
    #[serde(rename = "single_column_value")]
    SingleColumnValue {
        column: ColumnKey,
        op: CompareOp,
        comparator: Comparator,

        /// Skip the row if the column does not exist at all
        #[serde(default)]
        filter_if_missing: bool,

        #[serde(default = "default_true")]
        latest_version_only: bool,
    },

    #[serde(rename = "family")]
    Family { op: CompareOp, comparator: Comparator },

    #[serde(rename = "qualifier")]
    Qualifier { op: CompareOp, comparator: Comparator },

    #[serde(rename = "value")]
    Value { op: CompareOp, comparator: Comparator },

    #[serde(rename = "column_prefix")]
    ColumnPrefix(Vec<u8>),

    /// Strips values, only keys are returned
    #[serde(rename = "key_only")]
    KeyOnly {
        #[serde(default)]
        len_as_val: bool,
    },

    #[serde(rename = "first_key_only")]
    FirstKeyOnly,

    /// Only cell versions with one of the given timestamps
    #[serde(rename = "timestamps")]
    Timestamps(Vec<Timestamp>),

    #[serde(rename = "list")]
    List {
        operator: FilterListOperator,
        filters: Vec<Filter>,
    },
}

/// Anything that can be turned into an encoded filter
pub trait FilterSpec {
    fn construct(&self) -> crate::Result<pb::Filter>;
}

fn malformed(reason: impl Into<String>) -> Error {
    Error::MalformedFilter(reason.into())
}

impl Filter {
    /// Parses a filter expression from its JSON form
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| malformed(e.to_string()))
    }

    /// Shorthand for a filter list that must pass all filters
    pub fn all(filters: Vec<Filter>) -> Self {
        Self::List {
            operator: FilterListOperator::MustPassAll,
            filters,
        }
    }

    /// Shorthand for a filter list that must pass at least one filter
    pub fn any(filters: Vec<Filter>) -> Self {
        Self::List {
            operator: FilterListOperator::MustPassOne,
            filters,
        }
    }

    /// Short class name of the server-side filter
    pub fn class(&self) -> &'static str {
        match self {
            Self::SingleColumnValue { .. } => "SingleColumnValueFilter",
            Self::Family { .. } => "FamilyFilter",
            Self::Qualifier { .. } => "QualifierFilter",
            Self::Value { .. } => "ValueFilter",
            Self::ColumnPrefix(_) => "ColumnPrefixFilter",
            Self::KeyOnly { .. } => "KeyOnlyFilter",
            Self::FirstKeyOnly => "FirstKeyOnlyFilter",
            Self::Timestamps(_) => "TimestampsFilter",
            Self::List { .. } => "FilterList",
        }
    }

    fn comparator(&self, comparator: &Comparator) -> crate::Result<pb::Comparator> {
        comparator.construct().map_err(|e| match e {
            Error::MalformedComparator(reason) => malformed(format!("{}: {reason}", self.class())),
            e => e,
        })
    }

    fn compare_filter(
        &self,
        op: CompareOp,
        comparator: &Comparator,
    ) -> crate::Result<pb::CompareFilter> {
        Ok(pb::CompareFilter {
            compare_op: pb::CompareType::from(op) as i32,
            comparator: Some(self.comparator(comparator)?),
        })
    }

    fn construct_at(&self, depth: usize) -> crate::Result<pb::Filter> {
        if depth > MAX_FILTER_DEPTH {
            return Err(malformed(format!(
                "filter nesting exceeds {MAX_FILTER_DEPTH} levels"
            )));
        }

        let serialized = match self {
            Self::SingleColumnValue {
                column,
                op,
                comparator,
                filter_if_missing,
                latest_version_only,
            } => {
                if !is_valid_identifier(&column.family) {
                    return Err(malformed(format!("invalid column family {:?}", column.family)));
                }

                pb::SingleColumnValueFilter {
                    column_family: Some(column.family_bytes()),
                    column_qualifier: Some(column.qualifier_bytes()),
                    compare_op: pb::CompareType::from(*op) as i32,
                    comparator: Some(self.comparator(comparator)?),
                    filter_if_missing: Some(*filter_if_missing),
                    latest_version_only: Some(*latest_version_only),
                }
                .encode_to_vec()
            }
            Self::Family { op, comparator } => pb::FamilyFilter {
                compare_filter: Some(self.compare_filter(*op, comparator)?),
            }
            .encode_to_vec(),
            Self::Qualifier { op, comparator } => pb::QualifierFilter {
                compare_filter: Some(self.compare_filter(*op, comparator)?),
            }
            .encode_to_vec(),
            Self::Value { op, comparator } => pb::ValueFilter {
                compare_filter: Some(self.compare_filter(*op, comparator)?),
            }
            .encode_to_vec(),
            Self::ColumnPrefix(prefix) => {
                if prefix.is_empty() {
                    return Err(malformed("column prefix must not be empty"));
                }

                pb::ColumnPrefixFilter {
                    prefix: prefix.clone(),
                }
                .encode_to_vec()
            }
            Self::KeyOnly { len_as_val } => pb::KeyOnlyFilter {
                len_as_val: *len_as_val,
            }
            .encode_to_vec(),
            Self::FirstKeyOnly => pb::FirstKeyOnlyFilter {}.encode_to_vec(),
            Self::Timestamps(timestamps) => {
                if timestamps.is_empty() {
                    return Err(malformed("timestamp set must not be empty"));
                }

                let timestamps = timestamps
                    .iter()
                    .map(|&ts| {
                        i64::try_from(ts).map_err(|_| malformed(format!("timestamp {ts} out of range")))
                    })
                    .collect::<crate::Result<Vec<_>>>()?;

                pb::TimestampsFilter {
                    timestamps,
                    can_hint: None,
                }
                .encode_to_vec()
            }
            Self::List { operator, filters } => {
                if filters.is_empty() {
                    return Err(malformed("filter list must not be empty"));
                }

                let filters = filters
                    .iter()
                    .map(|f| f.construct_at(depth + 1))
                    .collect::<crate::Result<Vec<_>>>()?;

                pb::FilterList {
                    operator: pb::FilterListOperator::from(*operator) as i32,
                    filters,
                }
                .encode_to_vec()
            }
        };

        Ok(pb::Filter {
            name: format!("{FILTER_PACKAGE}{}", self.class()),
            serialized_filter: Some(serialized),
        })
    }
}

impl FilterSpec for Filter {
    fn construct(&self) -> crate::Result<pb::Filter> {
        self.construct_at(0)
    }
}

/// Already encoded filters are passed through as-is
impl FilterSpec for pb::Filter {
    fn construct(&self) -> crate::Result<pb::Filter> {
        if self.name.is_empty() {
            return Err(malformed("filter has no class name"));
        }

        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn value_equals(value: &str) -> Filter {
        Filter::Value {
            op: CompareOp::Equal,
            comparator: Comparator::equals(value),
        }
    }

    #[test]
    fn filter_single_column_value() -> crate::Result<()> {
        let filter = Filter::SingleColumnValue {
            column: ColumnKey::try_from("cf:q1")?,
            op: CompareOp::Greater,
            comparator: Comparator::Long(10),
            filter_if_missing: true,
            latest_version_only: true,
        };

        let proto = filter.construct()?;
        assert_eq!(
            proto.name,
            "org.apache.hadoop.hbase.filter.SingleColumnValueFilter"
        );

        let bytes = proto.serialized_filter.unwrap_or_default();
        let decoded = pb::SingleColumnValueFilter::decode(bytes.as_slice()).unwrap();

        assert_eq!(decoded.column_family.as_deref(), Some(&b"cf"[..]));
        assert_eq!(decoded.column_qualifier.as_deref(), Some(&b"q1"[..]));
        assert_eq!(decoded.compare_op(), pb::CompareType::Greater);
        assert_eq!(
            Comparator::from_proto(decoded.comparator.as_ref().unwrap())?,
            Comparator::Long(10)
        );
        assert_eq!(decoded.filter_if_missing, Some(true));

        Ok(())
    }

    #[test]
    fn filter_list_nested() -> crate::Result<()> {
        let filter = Filter::all(vec![
            value_equals("v1"),
            Filter::any(vec![Filter::FirstKeyOnly, Filter::ColumnPrefix(b"q".to_vec())]),
        ]);

        let proto = filter.construct()?;
        let bytes = proto.serialized_filter.unwrap_or_default();
        let list = pb::FilterList::decode(bytes.as_slice()).unwrap();

        assert_eq!(list.operator(), pb::FilterListOperator::MustPassAll);
        assert_eq!(list.filters.len(), 2);
        assert_eq!(list.filters[0], value_equals("v1").construct()?);
        assert_eq!(
            list.filters[1].name,
            "org.apache.hadoop.hbase.filter.FilterList"
        );

        Ok(())
    }

    #[test]
    fn filter_construct_is_deterministic() -> crate::Result<()> {
        let filter = Filter::all(vec![value_equals("a"), Filter::Timestamps(vec![1, 2, 3])]);
        assert_eq!(filter.construct()?, filter.construct()?);
        Ok(())
    }

    #[test]
    fn filter_malformed() {
        let too_deep = (0..=MAX_FILTER_DEPTH).fold(Filter::FirstKeyOnly, |inner, _| {
            Filter::all(vec![inner])
        });

        for filter in [
            Filter::all(vec![]),
            Filter::ColumnPrefix(vec![]),
            Filter::Timestamps(vec![]),
            Filter::Timestamps(vec![u64::MAX]),
            Filter::SingleColumnValue {
                column: ColumnKey {
                    family: String::new(),
                    qualifier: None,
                },
                op: CompareOp::Equal,
                comparator: Comparator::equals("v"),
                filter_if_missing: false,
                latest_version_only: true,
            },
            too_deep,
        ] {
            assert!(
                matches!(filter.construct(), Err(Error::MalformedFilter(_))),
                "{filter:?} should be rejected"
            );
        }
    }

    #[test]
    fn filter_malformed_nested_comparator() {
        let filter = Filter::any(vec![Filter::Qualifier {
            op: CompareOp::Equal,
            comparator: Comparator::Substring(String::new()),
        }]);

        assert_eq!(
            filter.construct(),
            Err(Error::MalformedFilter(
                "QualifierFilter: substring must not be empty".into()
            ))
        );
    }

    #[test]
    fn filter_from_json() -> crate::Result<()> {
        let filter = Filter::from_json(
            r#"
        {
            "type": "single_column_value",
            "value": {
                "column": "cf:q1",
                "op": "equal",
                "comparator": { "type": "binary", "value": [118, 49] }
            }
        }
        "#,
        )?;

        assert_eq!(
            filter,
            Filter::SingleColumnValue {
                column: ColumnKey::try_from("cf:q1")?,
                op: CompareOp::Equal,
                comparator: Comparator::equals("v1"),
                filter_if_missing: false,
                latest_version_only: true,
            }
        );

        assert!(matches!(
            Filter::from_json(r#"{"type":"bogus"}"#),
            Err(Error::MalformedFilter(_))
        ));

        Ok(())
    }
}
