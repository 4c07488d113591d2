// tests/parser_tests.rs

use rql_parser::{
    ComparisonOp, Limit, MembershipOp, QueryNode, SortDirection, SyntaxError, Value, ValueKind,
    parse,
};

fn filter(input: &str) -> QueryNode {
    parse(input)
        .unwrap_or_else(|e| panic!("parse failed for {:?}: {}", input, e))
        .filter
        .expect("query has no filter")
}

fn comparison(op: ComparisonOp, field: &str, value: Value) -> QueryNode {
    QueryNode::Comparison {
        op,
        field: field.to_string(),
        value,
    }
}

fn string_value(raw: &str) -> Value {
    Value::new(raw, ValueKind::String)
}

fn integer_value(raw: &str) -> Value {
    Value::new(raw, ValueKind::Integer)
}

// ============================================================================
// Scalar comparisons, both surface forms
// ============================================================================

#[test]
fn test_simple_comparison() {
    assert_eq!(
        filter("eq(name,value)"),
        comparison(ComparisonOp::Eq, "name", string_value("value"))
    );
}

#[test]
fn test_call_and_fiql_forms_build_the_same_node() {
    let test_cases = vec![
        ("eq(a,1)", "a=eq=1"),
        ("ne(a,1)", "a=ne=1"),
        ("lt(a,1)", "a=lt=1"),
        ("gt(a,1)", "a=gt=1"),
        ("le(a,1)", "a=le=1"),
        ("ge(a,1)", "a=ge=1"),
        ("eq(a,1)", "a=1"),
        ("eq(a,1)", "a==1"),
        ("in(a,(1,2))", "a=in=(1,2)"),
        ("out(a,(1,2))", "a=out=(1,2)"),
    ];
    for (call, fiql) in test_cases {
        assert_eq!(
            parse(call).unwrap(),
            parse(fiql).unwrap(),
            "{} and {} should parse identically",
            call,
            fiql
        );
    }
}

#[test]
fn test_fiql_symbol_spellings() {
    let test_cases = vec![
        ("a=1", ComparisonOp::Eq),
        ("a==1", ComparisonOp::Eq),
        ("a!=1", ComparisonOp::Ne),
        ("a<>1", ComparisonOp::Ne),
        ("a<1", ComparisonOp::Lt),
        ("a>1", ComparisonOp::Gt),
        ("a<=1", ComparisonOp::Le),
        ("a>=1", ComparisonOp::Ge),
    ];
    for (input, expected) in test_cases {
        assert_eq!(
            filter(input),
            comparison(expected, "a", integer_value("1")),
            "wrong node for {}",
            input
        );
    }
}

#[test]
fn test_value_kinds_flow_from_the_lexer() {
    let test_cases = vec![
        ("eq(a,hello)", ValueKind::String, "hello"),
        ("eq(a,42)", ValueKind::Integer, "42"),
        ("eq(a,-1)", ValueKind::Integer, "-1"),
        ("eq(a,1.5)", ValueKind::Float, "1.5"),
        ("eq(a,-.4e12)", ValueKind::Float, "-.4e12"),
        ("eq(a,2015-04-19)", ValueKind::Date, "2015-04-19"),
        (
            "eq(a,2015-04-16T17:40:32Z)",
            ValueKind::DateTime,
            "2015-04-16T17:40:32Z",
        ),
        ("eq(a,null)", ValueKind::Null, "null"),
        ("eq(a,true)", ValueKind::True, "true"),
        ("eq(a,false())", ValueKind::False, "false()"),
        ("eq(a,empty())", ValueKind::Empty, "empty()"),
        // calendar-invalid dates are plain strings
        ("eq(a,2015-02-29)", ValueKind::String, "2015-02-29"),
    ];
    for (input, kind, raw) in test_cases {
        match filter(input) {
            QueryNode::Comparison { value, .. } => {
                assert_eq!(value.kind, kind, "wrong kind for {}", input);
                assert_eq!(value.raw, raw, "wrong raw text for {}", input);
            }
            other => panic!("expected a comparison for {}, got {:?}", input, other),
        }
    }
}

#[test]
fn test_known_cast_overrides_the_lexed_kind() {
    match filter("eq(a,string:3)") {
        QueryNode::Comparison { value, .. } => {
            assert_eq!(value.kind, ValueKind::String);
            assert_eq!(value.raw, "3");
            assert_eq!(value.cast.as_deref(), Some("string"));
        }
        other => panic!("expected a comparison, got {:?}", other),
    }
}

#[test]
fn test_unknown_cast_keeps_the_lexed_kind() {
    match filter("eq(a,foo:1)") {
        QueryNode::Comparison { value, .. } => {
            assert_eq!(value.kind, ValueKind::Integer);
            assert_eq!(value.raw, "1");
            assert_eq!(value.cast.as_deref(), Some("foo"));
        }
        other => panic!("expected a comparison, got {:?}", other),
    }
}

// ============================================================================
// Array membership
// ============================================================================

#[test]
fn test_membership_operators() {
    assert_eq!(
        filter("in(a,(1,b))"),
        QueryNode::Membership {
            op: MembershipOp::In,
            field: "a".to_string(),
            values: vec![integer_value("1"), string_value("b")],
        }
    );
    assert_eq!(
        filter("out(c,(2,d))"),
        QueryNode::Membership {
            op: MembershipOp::Out,
            field: "c".to_string(),
            values: vec![integer_value("2"), string_value("d")],
        }
    );
}

#[test]
fn test_membership_needs_at_least_one_value() {
    let err = parse("in(a,())").unwrap_err();
    assert_eq!(
        err,
        SyntaxError::WrongArity {
            operator: "in".to_string(),
            min: 1,
            given: 0,
            position: 0,
        }
    );
}

// ============================================================================
// Logic operators and glue
// ============================================================================

#[test]
fn test_logic_call_forms() {
    assert_eq!(
        filter("and(eq(a,b),lt(c,d))"),
        QueryNode::And(vec![
            comparison(ComparisonOp::Eq, "a", string_value("b")),
            comparison(ComparisonOp::Lt, "c", string_value("d")),
        ])
    );
    assert_eq!(
        filter("or(eq(a,b),lt(c,d))"),
        QueryNode::Or(vec![
            comparison(ComparisonOp::Eq, "a", string_value("b")),
            comparison(ComparisonOp::Lt, "c", string_value("d")),
        ])
    );
    assert_eq!(
        filter("not(eq(a,b))"),
        QueryNode::Not(Box::new(comparison(
            ComparisonOp::Eq,
            "a",
            string_value("b")
        )))
    );
}

#[test]
fn test_glue_folds_flat() {
    assert_eq!(
        filter("eq(a,1)&eq(b,2)&eq(c,3)"),
        QueryNode::And(vec![
            comparison(ComparisonOp::Eq, "a", integer_value("1")),
            comparison(ComparisonOp::Eq, "b", integer_value("2")),
            comparison(ComparisonOp::Eq, "c", integer_value("3")),
        ])
    );
    assert_eq!(
        filter("eq(a,1)|eq(b,2)"),
        QueryNode::Or(vec![
            comparison(ComparisonOp::Eq, "a", integer_value("1")),
            comparison(ComparisonOp::Eq, "b", integer_value("2")),
        ])
    );
}

#[test]
fn test_glue_chain_inside_a_logic_argument() {
    assert_eq!(
        filter("not(eq(a,b)&eq(c,d))"),
        QueryNode::Not(Box::new(QueryNode::And(vec![
            comparison(ComparisonOp::Eq, "a", string_value("b")),
            comparison(ComparisonOp::Eq, "c", string_value("d")),
        ])))
    );
}

#[test]
fn test_groups_decide_association() {
    assert_eq!(
        filter("(eq(a,b)&lt(c,d))&(ne(e,f)|gt(g,h))"),
        QueryNode::And(vec![
            QueryNode::And(vec![
                comparison(ComparisonOp::Eq, "a", string_value("b")),
                comparison(ComparisonOp::Lt, "c", string_value("d")),
            ]),
            QueryNode::Or(vec![
                comparison(ComparisonOp::Ne, "e", string_value("f")),
                comparison(ComparisonOp::Gt, "g", string_value("h")),
            ]),
        ])
    );
}

#[test]
fn test_group_around_a_single_expression_is_transparent() {
    assert_eq!(filter("(eq(a,b))"), filter("eq(a,b)"));
}

#[test]
fn test_deep_groups_mixed_with_fiql() {
    let node =
        filter("(eq(a,b)|lt(c,d)|and(gt(e,f),(ne(g,h)|gt(i,j)|in(k,(l,m,n))|(o<>p&q=le=r))))");
    match node {
        QueryNode::Or(children) => {
            assert_eq!(children.len(), 3);
            assert_eq!(
                children[0],
                comparison(ComparisonOp::Eq, "a", string_value("b"))
            );
            match &children[2] {
                QueryNode::And(args) => {
                    assert_eq!(args.len(), 2);
                    match &args[1] {
                        QueryNode::Or(inner) => {
                            assert_eq!(inner.len(), 4);
                            assert_eq!(
                                inner[3],
                                QueryNode::And(vec![
                                    comparison(ComparisonOp::Ne, "o", string_value("p")),
                                    comparison(ComparisonOp::Le, "q", string_value("r")),
                                ])
                            );
                        }
                        other => panic!("expected an or group, got {:?}", other),
                    }
                }
                other => panic!("expected an and node, got {:?}", other),
            }
        }
        other => panic!("expected an or node, got {:?}", other),
    }
}

#[test]
fn test_mixed_glue_is_rejected() {
    assert!(matches!(
        parse("eq(a,1)&eq(b,2)|eq(c,3)").unwrap_err(),
        SyntaxError::MixedGlue { .. }
    ));
    assert!(matches!(
        parse("(eq(a,1)|eq(b,2)&eq(c,3))").unwrap_err(),
        SyntaxError::MixedGlue { .. }
    ));
}

#[test]
fn test_logic_operator_arity() {
    assert_eq!(
        parse("and(eq(a,b))").unwrap_err(),
        SyntaxError::WrongArity {
            operator: "and".to_string(),
            min: 2,
            given: 1,
            position: 0,
        }
    );
    assert_eq!(
        parse("or()").unwrap_err(),
        SyntaxError::WrongArity {
            operator: "or".to_string(),
            min: 2,
            given: 0,
            position: 0,
        }
    );
}

#[test]
fn test_arity_error_message() {
    let err = parse("and(eq(a,b))").unwrap_err();
    assert_eq!(
        err.to_string(),
        "\"and\" operator expects at least 2 parameters, 1 given (offset 0)"
    );
}

#[test]
fn test_nesting_depth_is_bounded() {
    let deep = format!("{}eq(a,b){}", "(".repeat(70), ")".repeat(70));
    assert!(matches!(
        parse(&deep).unwrap_err(),
        SyntaxError::DepthExceeded { .. }
    ));

    // just inside the bound still parses
    let ok = format!("{}eq(a,b){}", "(".repeat(60), ")".repeat(60));
    assert!(parse(&ok).is_ok());
}

// ============================================================================
// Auxiliary clauses
// ============================================================================

#[test]
fn test_select_clause() {
    let query = parse("select(a,b,c)").unwrap();
    assert_eq!(query.select.unwrap().fields, vec!["a", "b", "c"]);
    assert!(query.filter.is_none());

    let query = parse("select()").unwrap();
    assert!(query.select.unwrap().fields.is_empty());
}

#[test]
fn test_sort_clause_directions() {
    let query = parse("sort(a,+b,-c)").unwrap();
    let fields = query.sort.unwrap().fields;
    let spec: Vec<(&str, SortDirection)> = fields
        .iter()
        .map(|f| (f.name.as_str(), f.direction))
        .collect();
    assert_eq!(
        spec,
        vec![
            ("a", SortDirection::Ascending),
            ("b", SortDirection::Ascending),
            ("c", SortDirection::Descending),
        ]
    );
}

#[test]
fn test_sort_needs_at_least_one_field() {
    assert_eq!(
        parse("sort()").unwrap_err(),
        SyntaxError::WrongArity {
            operator: "sort".to_string(),
            min: 1,
            given: 0,
            position: 0,
        }
    );
}

#[test]
fn test_limit_clause() {
    assert_eq!(
        parse("limit(10)").unwrap().limit,
        Some(Limit {
            limit: 10,
            offset: 0
        })
    );
    assert_eq!(
        parse("limit(10,20)").unwrap().limit,
        Some(Limit {
            limit: 10,
            offset: 20
        })
    );
}

#[test]
fn test_full_query_with_all_clauses() {
    let query = parse("and(eq(a,b),gt(c,1))&select(x,y)&sort(+a)&limit(10,20)").unwrap();
    assert!(matches!(query.filter, Some(QueryNode::And(_))));
    assert_eq!(query.select.unwrap().fields, vec!["x", "y"]);
    assert_eq!(query.sort.unwrap().fields.len(), 1);
    assert_eq!(
        query.limit,
        Some(Limit {
            limit: 10,
            offset: 20
        })
    );
}

#[test]
fn test_clause_order_does_not_matter() {
    let a = parse("limit(5)&eq(a,b)&sort(c)").unwrap();
    let b = parse("eq(a,b)&sort(c)&limit(5)").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_clauses_are_not_expressions() {
    assert_eq!(
        parse("and(eq(a,b),limit(1))").unwrap_err(),
        SyntaxError::MisplacedClause {
            operator: "limit".to_string(),
            position: 12,
        }
    );
    assert!(matches!(
        parse("(sort(a))").unwrap_err(),
        SyntaxError::MisplacedClause { .. }
    ));
}

#[test]
fn test_clauses_cannot_be_glued_with_or() {
    assert!(matches!(
        parse("eq(a,b)|sort(c)").unwrap_err(),
        SyntaxError::ClauseWithOr { .. }
    ));
}

#[test]
fn test_duplicate_clauses_are_rejected() {
    assert!(matches!(
        parse("limit(1)&limit(2,3)").unwrap_err(),
        SyntaxError::DuplicateClause { .. }
    ));
    assert!(matches!(
        parse("select(a)&eq(b,c)&select(d)").unwrap_err(),
        SyntaxError::DuplicateClause { .. }
    ));
}

// ============================================================================
// Whole-query edge cases
// ============================================================================

#[test]
fn test_empty_input_is_an_empty_query() {
    let query = parse("").unwrap();
    assert!(query.is_empty());
    assert!(query.filter.is_none());
    assert!(query.select.is_none());
    assert!(query.sort.is_none());
    assert!(query.limit.is_none());
}

#[test]
fn test_trailing_input_is_rejected() {
    assert!(matches!(
        parse("eq(a,b)eq(c,d)").unwrap_err(),
        SyntaxError::TrailingInput { .. }
    ));
}

#[test]
fn test_unterminated_group_is_rejected() {
    assert!(matches!(
        parse("(eq(a,b)").unwrap_err(),
        SyntaxError::UnexpectedEof { .. }
    ));
    assert!(matches!(
        parse("eq(a,b").unwrap_err(),
        SyntaxError::UnexpectedEof { .. }
    ));
}

#[test]
fn test_bare_string_is_not_a_query() {
    assert!(matches!(
        parse("hello").unwrap_err(),
        SyntaxError::UnexpectedToken { .. } | SyntaxError::UnexpectedEof { .. }
    ));
}

#[test]
fn test_parsing_is_deterministic() {
    let input = "(eq(a,b)&lt(c,d))&(ne(e,f)|gt(g,h))&sort(-x)&limit(3)";
    assert_eq!(parse(input).unwrap(), parse(input).unwrap());
}
