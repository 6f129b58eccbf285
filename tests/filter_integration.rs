//! Integration tests for AND-chaining derived filters.

use pretty_assertions::assert_eq;
use quill::prelude::*;
use quill::combine_cloned;

#[derive(Debug, Clone, Default, PartialEq, GqlObject, GqlFilter)]
#[gql(name = "VVFilter")]
struct VvFilter {
    #[gql(path = ".location")]
    location: Option<String>,
    #[gql(path = ".serial")]
    serial: Option<String>,
    #[gql(path = ".and", and)]
    and: Option<Box<VvFilter>>,
}

fn by_location(location: &str) -> VvFilter {
    VvFilter {
        location: Some(location.into()),
        ..Default::default()
    }
}

fn by_serial(serial: &str) -> VvFilter {
    VvFilter {
        serial: Some(serial.into()),
        ..Default::default()
    }
}

#[test]
fn test_combine_empty() {
    let head: Option<VvFilter> = combine(Vec::new());
    assert!(head.is_none());
}

#[test]
fn test_combine_single_is_unchanged() {
    let f = by_location("Berlin");
    let head = combine([f.clone()]).unwrap();
    assert_eq!(head, f);
    assert!(head.and().is_none());
}

#[test]
fn test_combine_last_is_head() {
    let head = combine([by_location("a"), by_location("b"), by_serial("c")]).unwrap();

    assert_eq!(head.serial.as_deref(), Some("c"));
    let second = head.and().unwrap();
    assert_eq!(second.location.as_deref(), Some("b"));
    let third = second.and().unwrap();
    assert_eq!(third.location.as_deref(), Some("a"));
    assert!(third.and().is_none());
    assert_eq!(head.chain_len(), 3);
}

#[test]
fn test_combine_does_not_touch_inputs() {
    let filters = vec![by_location("a"), by_location("b")];
    let head = combine_cloned(&filters).unwrap();

    assert_eq!(head.chain_len(), 2);
    assert!(filters.iter().all(|f| f.and().is_none()));
}

#[test]
fn test_chain_walk_order() {
    let head = combine([by_location("a"), by_location("b"), by_location("c")]).unwrap();
    let order: Vec<_> = head
        .chain()
        .filter_map(|f| f.location.as_deref())
        .collect();
    assert_eq!(order, vec!["c", "b", "a"]);
}

#[test]
fn test_chain_serializes_nested() {
    let head = combine([by_location("Berlin"), by_serial("S-1")]).unwrap();

    let request = Request::query("vvList")
        .param("filter", head)
        .unwrap()
        .field("uuid")
        .build()
        .unwrap();
    assert_eq!(
        request,
        r#"query{vvList(filter:{serial:"S-1",and:{location:"Berlin"}}){uuid}}"#
    );
}
