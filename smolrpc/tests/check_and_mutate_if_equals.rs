use smolrpc::{pb, Call, CheckAndMutate, Comparator, Mutation, RowMutation, MAX_TIMESTAMP};
use test_log::test;

#[test]
pub fn check_and_mutate_if_equals() -> smolrpc::Result<()> {
    let put = Mutation::put(
        "test",
        "r1",
        vec![smolrpc::cell!("cf:q1", None, b"v2".to_vec())],
    );
    assert!(!put.skip_batch());

    let mut cm = CheckAndMutate::if_equals(put, "cf", "q1", "v1")?;
    assert!(cm.mutation().skip_batch());

    let request = cm.to_proto();
    let condition = request.condition.expect("should have condition");

    assert_eq!(condition.row, b"r1");
    assert_eq!(condition.family.as_deref(), Some(&b"cf"[..]));
    assert_eq!(condition.qualifier.as_deref(), Some(&b"q1"[..]));
    assert_eq!(condition.compare_type(), pb::CompareType::Equal);
    assert_eq!(
        Comparator::from_proto(condition.comparator.as_ref().expect("should have comparator"))?,
        Comparator::equals("v1")
    );
    assert_eq!(condition.filter, None);
    assert_eq!(
        condition.time_range,
        Some(pb::TimeRange {
            from: Some(0),
            to: Some(MAX_TIMESTAMP),
        })
    );
    assert_eq!(MAX_TIMESTAMP, u64::MAX);

    // NOTE: The base mutation is rendered unchanged
    let mutation = request.mutation.expect("should have mutation");
    assert_eq!(mutation, cm.mutation().to_proto());
    assert_eq!(mutation.row.as_deref(), Some(&b"r1"[..]));

    Ok(())
}
