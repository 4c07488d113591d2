// tests/output_tests.rs

use rql_parser::output::{to_json, to_json_string, tokens_to_json};
use rql_parser::{parse, tokenize};
use serde_json::json;

#[test]
fn test_full_query_rendering() {
    let query = parse("and(eq(a,b),gt(c,1))&select(x,y)&sort(+a,-b)&limit(10,20)").unwrap();
    assert_eq!(
        to_json(&query),
        json!({
            "filter": {
                "op": "and",
                "queries": [
                    { "op": "eq", "field": "a", "value": "b" },
                    { "op": "gt", "field": "c", "value": 1 },
                ],
            },
            "select": ["x", "y"],
            "sort": [
                { "field": "a", "direction": "asc" },
                { "field": "b", "direction": "desc" },
            ],
            "limit": { "limit": 10, "offset": 20 },
        })
    );
}

#[test]
fn test_absent_clauses_render_as_null() {
    let query = parse("eq(a,1)").unwrap();
    let rendered = to_json(&query);
    assert_eq!(rendered["filter"]["op"], "eq");
    assert!(rendered["select"].is_null());
    assert!(rendered["sort"].is_null());
    assert!(rendered["limit"].is_null());

    let empty = to_json(&parse("").unwrap());
    assert!(empty["filter"].is_null());
    assert!(empty["limit"].is_null());
}

#[test]
fn test_literal_kinds_map_to_json_types() {
    let query = parse("in(a,(null,true,false,empty(),1.5,-2,x))").unwrap();
    assert_eq!(
        to_json(&query)["filter"]["values"],
        json!([null, true, false, "", 1.5, -2, "x"])
    );
}

#[test]
fn test_constant_call_forms_normalize() {
    let query = parse("eq(a,true())").unwrap();
    assert_eq!(to_json(&query)["filter"]["value"], json!(true));
}

#[test]
fn test_string_cast_renders_as_a_string() {
    let query = parse("eq(a,string:3)").unwrap();
    assert_eq!(to_json(&query)["filter"]["value"], json!("3"));
}

#[test]
fn test_dates_render_as_their_source_text() {
    let query = parse("eq(a,2015-04-16T17:40:32Z)").unwrap();
    assert_eq!(
        to_json(&query)["filter"]["value"],
        json!("2015-04-16T17:40:32Z")
    );
}

#[test]
fn test_not_and_membership_shapes() {
    let query = parse("not(out(a,(1,2)))").unwrap();
    assert_eq!(
        to_json(&query)["filter"],
        json!({
            "op": "not",
            "query": {
                "op": "out",
                "field": "a",
                "values": [1, 2],
            },
        })
    );
}

#[test]
fn test_compact_string_form() {
    let rendered = to_json_string(&parse("eq(a,1)&limit(5)").unwrap());
    assert!(rendered.contains("\"filter\""));
    assert!(rendered.contains("\"limit\":5"));
}

#[test]
fn test_token_stream_rendering() {
    let stream = tokenize("a=eq=1").unwrap();
    assert_eq!(
        tokens_to_json(stream.tokens()),
        json!([
            { "value": "a", "kind": "STRING", "position": 0 },
            { "value": "eq", "kind": "OPERATOR", "position": 1 },
            { "value": "1", "kind": "INTEGER", "position": 5 },
        ])
    );
}
