use smolrpc::{
    pb, Call, CheckAndMutate, ColumnKey, CompareOp, Comparator, Filter, FilterSpec, Mutation,
};
use test_log::test;

#[test]
pub fn check_and_mutate_filter_time_range() -> smolrpc::Result<()> {
    let predicate = Filter::all(vec![
        Filter::SingleColumnValue {
            column: ColumnKey::try_from("cf:state")?,
            op: CompareOp::Equal,
            comparator: Comparator::equals("pending"),
            filter_if_missing: true,
            latest_version_only: true,
        },
        Filter::Qualifier {
            op: CompareOp::NotEqual,
            comparator: Comparator::equals("locked"),
        },
    ]);

    let delete = Mutation::delete("test", "r1", vec![]);

    let mut cm = CheckAndMutate::if_match(delete, &predicate)?;
    assert!(cm.mutation().skip_batch());

    cm.set_time_range(100, 200)?;
    assert_eq!(cm.time_range(), (100, 200));

    let condition = cm.to_proto().condition.expect("should have condition");

    assert_eq!(condition.row, b"r1");
    assert_eq!(condition.family, None);
    assert_eq!(condition.qualifier, None);
    assert_eq!(condition.compare_type, None);
    assert_eq!(condition.comparator, None);
    assert_eq!(condition.filter, Some(predicate.construct()?));
    assert_eq!(
        condition.time_range,
        Some(pb::TimeRange {
            from: Some(100),
            to: Some(200),
        })
    );

    Ok(())
}

#[test]
pub fn check_and_mutate_malformed_filter() {
    let delete = Mutation::delete("test", "r1", vec![]);

    assert!(matches!(
        CheckAndMutate::if_match(delete, &Filter::ColumnPrefix(vec![])),
        Err(smolrpc::Error::MalformedFilter(_))
    ));
}
