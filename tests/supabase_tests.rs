use dining_hall_lambda_rust::store::{FoodQuery, SortKey, TagFilter};
use dining_hall_lambda_rust::supabase::{SupabaseStore, food_params, rating_params};

fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Vec<&'a str> {
    params.iter().filter(|(k, _)| *k == key).map(|(_, v)| v.as_str()).collect()
}

#[test]
fn plain_query_selects_orders_and_limits() {
    let query = FoodQuery {
        text: "",
        sort: SortKey::Rating,
        limit: Some(200),
        tags: None,
    };
    let params = food_params(&query);
    assert!(param(&params, "name").is_empty());
    assert!(param(&params, "allergens").is_empty());
    assert_eq!(param(&params, "order"), vec!["avg_rating.desc.nullslast"]);
    assert_eq!(param(&params, "limit"), vec!["200"]);
    assert!(param(&params, "select")[0].contains("allergens"));
}

#[test]
fn tag_predicates_are_pushed_down() {
    let tags = TagFilter {
        require_all: vec!["vegan".to_string()],
        exclude_any: vec!["milk".to_string(), "tree nuts".to_string()],
    };
    let query = FoodQuery {
        text: "  Chili ",
        sort: SortKey::Recent,
        limit: Some(50),
        tags: Some(&tags),
    };
    let params = food_params(&query);
    assert_eq!(param(&params, "name"), vec!["ilike.*Chili*"]);
    assert_eq!(param(&params, "allergens"), vec![r#"cs.{"vegan"}"#]);
    // Foods with no tag set at all still pass the exclusion.
    assert_eq!(
        param(&params, "or"),
        vec![r#"(allergens.is.null,allergens.not.ov.{"milk","tree nuts"})"#]
    );
    assert_eq!(param(&params, "order"), vec!["created_at.desc.nullslast"]);
}

#[test]
fn client_side_mode_sends_no_tag_filters_or_limit() {
    let query = FoodQuery {
        text: "pizza",
        sort: SortKey::Rating,
        limit: None,
        tags: None,
    };
    let params = food_params(&query);
    assert_eq!(param(&params, "name"), vec!["ilike.*pizza*"]);
    assert!(param(&params, "or").is_empty());
    assert!(param(&params, "limit").is_empty());
}

#[test]
fn like_metacharacters_in_text_match_literally() {
    let cases = [
        ("50%", r"ilike.*50\%*"),
        ("a_b", r"ilike.*a\_b*"),
        (r"c:\menu", r"ilike.*c:\\menu*"),
        ("mac, cheese", "ilike.*mac, cheese*"),
    ];
    for (text, expected) in cases {
        let query = FoodQuery {
            text,
            sort: SortKey::Rating,
            limit: Some(200),
            tags: None,
        };
        let params = food_params(&query);
        assert_eq!(param(&params, "name"), vec![expected], "text was: {}", text);
        assert_eq!(param(&params, "limit"), vec!["200"]);
    }
}

#[test]
fn text_with_a_star_is_left_to_the_caller_without_a_limit() {
    let tags = TagFilter {
        require_all: vec!["vegan".to_string()],
        exclude_any: Vec::new(),
    };
    let query = FoodQuery {
        text: "5* special",
        sort: SortKey::Rating,
        limit: Some(200),
        tags: Some(&tags),
    };
    let params = food_params(&query);
    assert!(param(&params, "name").is_empty());
    assert!(param(&params, "limit").is_empty());
    assert_eq!(param(&params, "allergens"), vec![r#"cs.{"vegan"}"#]);
}

#[test]
fn rating_ids_are_quoted_and_escaped() {
    let params = rating_params(&["f1", r#"odd"id"#], 500);
    assert_eq!(param(&params, "food_id"), vec![r#"in.("f1","odd\"id")"#]);
    assert_eq!(param(&params, "limit"), vec!["500"]);
}

#[test]
fn store_debug_does_not_need_network() {
    let store = SupabaseStore::new("https://example.invalid/", "anon".to_string());
    let debug = format!("{:?}", store);
    assert!(debug.contains("https://example.invalid/rest/v1"), "debug was: {}", debug);
}
