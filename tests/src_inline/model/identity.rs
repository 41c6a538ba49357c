use super::*;

fn bind(id: &str, name: &str, category: GeneCategory) -> Binding {
    Binding {
        id: id.to_string(),
        name: name.to_string(),
        category,
    }
}

#[test]
fn test_table_lookup_and_counts() {
    let table = IdentityTable::from_bindings(vec![
        bind("1", "Adf1", GeneCategory::TranscriptionFactor),
        bind("g1", "CG1234", GeneCategory::Target),
        bind("gene7", "Noise1", GeneCategory::Noise),
    ])
    .unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.name_of("g1"), Some("CG1234"));
    assert_eq!(table.category_of("gene7"), Some(GeneCategory::Noise));
    assert_eq!(table.name_of("missing"), None);
    assert_eq!(table.count(GeneCategory::Target), 1);
    assert!(table.ids().contains("1"));
}

#[test]
fn test_duplicate_name_rejected() {
    let err = IdentityTable::from_bindings(vec![
        bind("a", "Same", GeneCategory::Target),
        bind("b", "Same", GeneCategory::Noise),
    ])
    .unwrap_err();
    assert_eq!(
        err,
        IdentityError::DuplicateName {
            name: "Same".to_string(),
            first: "a".to_string(),
            second: "b".to_string(),
        }
    );
}

#[test]
fn test_duplicate_id_rejected() {
    let err = IdentityTable::from_bindings(vec![
        bind("a", "One", GeneCategory::Target),
        bind("a", "Two", GeneCategory::Target),
    ])
    .unwrap_err();
    assert!(matches!(err, IdentityError::DuplicateId { .. }));
}

#[test]
fn test_empty_table() {
    let table = IdentityTable::from_bindings(Vec::new()).unwrap();
    assert!(table.is_empty());
}
