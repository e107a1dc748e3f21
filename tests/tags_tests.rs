use dining_hall_lambda_rust::tags::{TagKind, TagTable};

#[test]
fn builtin_table_classifies_dietary_and_allergen_tags() {
    let table = TagTable::builtin();
    assert_eq!(table.classify("vegan"), Some(TagKind::Dietary));
    assert_eq!(table.classify("Vegetarian "), Some(TagKind::Dietary));
    assert_eq!(table.classify("milk"), Some(TagKind::Allergen));
    assert_eq!(table.classify("tree nuts"), Some(TagKind::Allergen));
    assert_eq!(table.classify("spicy"), None);

    assert_eq!(table.allergens().count(), 9);
    assert!(table.dietary().any(|e| e.tag == "halal"));
}

#[test]
fn labels_fall_back_to_the_raw_tag() {
    let table = TagTable::builtin();
    let dairy = table.label("milk");
    assert_eq!(dairy.label, "Dairy");
    assert_eq!(dairy.emoji, "🥛");

    let unknown = table.label("msg");
    assert_eq!(unknown.label, "msg");
    assert_eq!(unknown.emoji, "⚠️");
}

#[test]
fn partition_splits_and_deduplicates_a_selection() {
    let table = TagTable::builtin();
    let selection = table.partition(&["vegan", "Milk", "milk", "", "gluten free", "halal"]);
    assert_eq!(selection.require, vec!["vegan", "halal"]);
    assert_eq!(selection.exclude, vec!["milk"]);
    assert_eq!(selection.unknown, vec!["gluten free"]);
}

#[test]
fn table_can_be_loaded_from_json() {
    let json = r#"[
        {"tag": "Gluten", "kind": "allergen", "label": "Gluten"},
        {"tag": "kosher", "kind": "dietary", "label": "Kosher", "emoji": "✡️"}
    ]"#;
    let table = TagTable::from_json(json).expect("table parses");
    assert_eq!(table.classify("gluten"), Some(TagKind::Allergen));
    assert_eq!(table.classify("kosher"), Some(TagKind::Dietary));
    assert_eq!(table.classify("milk"), None);
    assert_eq!(table.label("gluten").emoji, "⚠️");

    let selection = table.partition(&["kosher", "gluten"]);
    assert_eq!(selection.require, vec!["kosher"]);
    assert_eq!(selection.exclude, vec!["gluten"]);
}

#[test]
fn malformed_table_is_an_error() {
    assert!(TagTable::from_json(r#"[{"tag": "x", "kind": "sometimes"}]"#).is_err());
}
