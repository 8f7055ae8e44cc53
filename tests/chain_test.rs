use lastgrid::management::{MonthChain, next_month, should_continue};
use lastgrid::types::Month;

fn months(count: usize) -> Vec<Month> {
    (0..count)
        .map(|i| Month {
            label: format!("m{i}"),
            start: i as i64 * 100,
            end: (i as i64 + 1) * 100,
        })
        .collect()
}

#[test]
fn test_next_month_follows_sequence() {
    let seq = months(3);
    assert_eq!(next_month(&seq, 0).map(|m| m.label.as_str()), Some("m0"));
    assert_eq!(next_month(&seq, 2).map(|m| m.label.as_str()), Some("m2"));
    assert!(next_month(&seq, 3).is_none());
    assert!(next_month(&[], 0).is_none());
}

#[test]
fn test_should_continue() {
    assert!(should_continue(0, 12));
    assert!(should_continue(11, 12));
    assert!(!should_continue(12, 12));
    assert!(!should_continue(0, 0));
}

#[test]
fn test_chain_stops_at_cap() {
    let chain = MonthChain::new(months(20), 12);
    assert_eq!(chain.first().map(|m| m.label), Some("m0".to_string()));
    assert_eq!(chain.advance(11).map(|m| m.label), Some("m11".to_string()));
    assert!(chain.advance(12).is_none());
}

#[test]
fn test_chain_stops_when_sequence_exhausted() {
    let chain = MonthChain::new(months(4), 12);
    assert_eq!(chain.advance(3).map(|m| m.label), Some("m3".to_string()));
    assert!(chain.advance(4).is_none());
}

#[test]
fn test_empty_chain_has_no_first_month() {
    assert!(MonthChain::new(Vec::new(), 12).first().is_none());
    assert!(MonthChain::new(months(3), 0).first().is_none());
}
