//! Facade-level tests: everything reachable through `rankarray::*`.

use rankarray::{
    copy_to, index_of, last_index_of, sort_range, Array, ArrayLimits, Comparer, Element,
    ElementType, Error, ErrorKind, ObjectRef, PrimitiveKind, Result, SlotBuffer, TypeRegistry,
};
use std::cmp::Ordering;

/// Orders strings by length, then ordinally
struct ByLength;

impl Comparer for ByLength {
    fn compare(&self, a: &Element, b: &Element) -> Result<Ordering> {
        match (a.as_str(), b.as_str()) {
            (Some(x), Some(y)) => Ok(x.len().cmp(&y.len()).then_with(|| x.cmp(y))),
            _ => Err(Error::invalid_argument("ByLength only orders strings")),
        }
    }
}

#[test]
fn test_custom_comparer_through_facade() {
    let mut words: Array = Array::from_elements(
        ElementType::string(),
        ["pear", "fig", "banana", "kiwi", "apple"],
    )
    .unwrap();
    sort_range(&mut words, 0, 5, Some(&ByLength)).unwrap();
    let sorted: Vec<String> = words
        .elements()
        .filter_map(|e| e.as_str().map(str::to_string))
        .collect();
    assert_eq!(sorted, vec!["fig", "kiwi", "pear", "apple", "banana"]);
}

#[test]
fn test_comparer_contract_violation_is_invalid_state() {
    let mut mixed: Array =
        Array::from_elements(ElementType::object(), [Element::from("a"), Element::I32(1)]).unwrap();
    let err = sort_range(&mut mixed, 0, 2, Some(&ByLength)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn test_limits_from_toml() {
    let limits = ArrayLimits::from_toml_str("max_rank = 2\nmax_total_length = 10\n").unwrap();
    let ty = ElementType::primitive(PrimitiveKind::U8);
    assert!(Array::<SlotBuffer>::create_with_limits(ty.clone(), &[2, 5], None, &limits).is_ok());
    assert_eq!(
        Array::<SlotBuffer>::create_with_limits(ty.clone(), &[2, 6], None, &limits)
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidArgument
    );
    assert_eq!(
        Array::<SlotBuffer>::create_with_limits(ty, &[1, 1, 1], None, &limits)
            .unwrap_err()
            .kind(),
        ErrorKind::InvalidArgument
    );
}

#[test]
fn test_class_hierarchy_round_trip() {
    let mut registry = TypeRegistry::new();
    let animal = registry.define_class("Animal", "object").unwrap();
    let dog = registry.define_class("Dog", "Animal").unwrap();

    let rex = Element::from(ObjectRef::new(dog.clone(), "rex"));
    let dogs: Array = Array::from_elements(dog, [rex.clone()]).unwrap();
    let mut animals: Array = Array::create_with_bounds(animal, &[3], &[1]).unwrap();

    copy_to(&dogs, &mut animals, 2).unwrap();
    assert_eq!(index_of(&animals, &rex).unwrap(), Some(3));
    assert_eq!(last_index_of(&animals, &rex).unwrap(), Some(3));
    assert_eq!(index_of(&animals, &Element::from("cat")).unwrap(), None);
}

#[test]
fn test_value_slot_rejects_null() {
    let mut flags: Array = Array::vector(ElementType::primitive(PrimitiveKind::Bool), 1).unwrap();
    assert_eq!(
        flags.set_value1(0, Element::Null).unwrap_err().kind(),
        ErrorKind::NullArgument
    );
}
