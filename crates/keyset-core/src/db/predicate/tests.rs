use crate::{
    db::{
        direction::Direction,
        filter::FilterSet,
        order::{SortSpec, SortSpecList},
        predicate::{Predicate, PredicateBuilder},
        query::OrderTerm,
    },
    value::{Value, ValueTag, strict_order_cmp},
};
use proptest::prelude::*;
use std::{cmp::Ordering, collections::BTreeMap};

const COLUMNS: [&str; 3] = ["a", "b", "c"];

fn row(values: &[Value]) -> BTreeMap<String, Value> {
    COLUMNS
        .iter()
        .zip(values)
        .map(|(column, value)| ((*column).to_string(), value.clone()))
        .collect()
}

fn sorts(directions: &[Direction]) -> SortSpecList {
    SortSpecList::new(
        COLUMNS
            .iter()
            .zip(directions)
            .map(|(column, direction)| SortSpec::new(*column, *direction))
            .collect(),
    )
}

// Reference lexicographic comparison under per-column directions.
fn strictly_after(row: &[Value], cursor: &[Value], directions: &[Direction]) -> bool {
    for ((r, c), direction) in row.iter().zip(cursor).zip(directions) {
        let ordering = strict_order_cmp(r, c).expect("same comparable variant");
        match direction.apply(ordering) {
            Ordering::Equal => {}
            Ordering::Greater => return true,
            Ordering::Less => return false,
        }
    }

    false
}

fn all_directions(n: usize) -> Vec<Vec<Direction>> {
    (0..1u32 << n)
        .map(|mask| {
            (0..n)
                .map(|bit| {
                    if mask & (1 << bit) == 0 {
                        Direction::Asc
                    } else {
                        Direction::Desc
                    }
                })
                .collect()
        })
        .collect()
}

fn all_tuples(n: usize, domain: i64) -> Vec<Vec<Value>> {
    let mut out = vec![vec![]];
    for _ in 0..n {
        out = out
            .into_iter()
            .flat_map(|prefix: Vec<Value>| {
                (0..domain).map(move |v| {
                    let mut next = prefix.clone();
                    next.push(Value::Int(v));
                    next
                })
            })
            .collect();
    }
    out
}

#[test]
fn cursor_predicate_matches_lexicographic_order_exhaustively() {
    let tuples = all_tuples(3, 3);

    for directions in all_directions(3) {
        for cursor in &tuples {
            let resumed = sorts(&directions)
                .with_cursor(cursor.clone())
                .expect("arity matches");
            let predicate =
                PredicateBuilder::cursor_predicate(&resumed).expect("int cursor is comparable");

            for candidate in &tuples {
                assert_eq!(
                    predicate.eval(&row(candidate)),
                    strictly_after(candidate, cursor, &directions),
                    "directions={directions:?} cursor={cursor:?} row={candidate:?}"
                );
            }
        }
    }
}

fn arb_mixed_column() -> impl Strategy<Value = (Direction, Vec<Value>)> {
    let direction = prop_oneof![Just(Direction::Asc), Just(Direction::Desc)];
    let values = prop_oneof![
        prop::collection::vec((-2i64..2).prop_map(Value::Int), 2),
        prop::collection::vec("[ab]{0,2}".prop_map(Value::Text), 2),
        prop::collection::vec(any::<bool>().prop_map(Value::Bool), 2),
        prop::collection::vec(
            (-2i32..2).prop_map(|v| Value::float(f64::from(v) / 2.0).expect("finite")),
            2
        ),
    ];

    (direction, values)
}

proptest! {
    #[test]
    fn cursor_predicate_matches_lexicographic_order_for_mixed_types(
        columns in prop::collection::vec(arb_mixed_column(), 1..=3)
    ) {
        let directions: Vec<Direction> = columns.iter().map(|(d, _)| *d).collect();
        let candidate: Vec<Value> = columns.iter().map(|(_, v)| v[0].clone()).collect();
        let cursor: Vec<Value> = columns.iter().map(|(_, v)| v[1].clone()).collect();

        let resumed = sorts(&directions).with_cursor(cursor.clone()).expect("arity matches");
        let predicate = PredicateBuilder::cursor_predicate(&resumed).expect("comparable cursor");

        prop_assert_eq!(
            predicate.eval(&row(&candidate)),
            strictly_after(&candidate, &cursor, &directions)
        );
    }
}

#[test]
fn first_page_has_no_cursor_predicate() {
    let list = SortSpecList::new(vec![SortSpec::desc("rating"), SortSpec::asc("id")]);
    let fragment = PredicateBuilder::build(&FilterSet::new(), &list).expect("should build");

    assert_eq!(fragment.predicate, Predicate::True);
    assert_eq!(
        fragment.order,
        vec![
            OrderTerm::new("rating", Direction::Desc),
            OrderTerm::new("id", Direction::Asc),
        ]
    );
}

#[test]
fn two_column_cursor_predicate_has_expected_shape() {
    let list = SortSpecList::new(vec![SortSpec::desc("rating"), SortSpec::asc("id")])
        .with_cursor(vec![Value::Int(4), Value::Int(10)])
        .expect("arity matches");
    let predicate = PredicateBuilder::cursor_predicate(&list).expect("should build");

    assert_eq!(
        predicate,
        Predicate::or(vec![
            Predicate::lt("rating", Value::Int(4)),
            Predicate::And(vec![
                Predicate::eq("rating", Value::Int(4)),
                Predicate::gt("id", Value::Int(10)),
            ]),
        ])
    );
}

#[test]
fn single_column_cursor_is_one_strict_comparison() {
    let list = SortSpecList::new(vec![SortSpec::desc("id")])
        .with_cursor(vec![Value::Int(7)])
        .expect("arity matches");

    assert_eq!(
        PredicateBuilder::cursor_predicate(&list).expect("should build"),
        Predicate::lt("id", Value::Int(7))
    );
}

#[test]
fn filters_and_cursor_are_conjoined() {
    let filters = FilterSet::new()
        .in_("category_id", [1, 2])
        .eq("published", true)
        .in_("tag", Vec::<Value>::new());
    let list = SortSpecList::new(vec![SortSpec::asc("id")])
        .with_cursor(vec![Value::Int(3)])
        .expect("arity matches");

    let fragment = PredicateBuilder::build(&filters, &list).expect("should build");

    assert_eq!(
        fragment.predicate,
        Predicate::And(vec![
            Predicate::And(vec![
                Predicate::in_("category_id", vec![Value::Int(1), Value::Int(2)]),
                Predicate::eq("published", Value::Bool(true)),
            ]),
            Predicate::gt("id", Value::Int(3)),
        ])
    );
}

#[test]
fn empty_in_set_contributes_no_predicate() {
    let filters = FilterSet::new().in_("category_id", Vec::<i64>::new());

    assert_eq!(
        PredicateBuilder::filter_predicate(&filters).expect("should build"),
        Predicate::True
    );
}

#[test]
fn non_comparable_values_are_rejected() {
    let filters = FilterSet::new().eq("title", Value::Null);
    let err = PredicateBuilder::filter_predicate(&filters).expect_err("null filter");
    assert_eq!(err.column, "title");
    assert_eq!(err.found, ValueTag::Null);

    let filters = FilterSet::new().in_("id", [Value::Int(1), Value::Blob(vec![1])]);
    let err = PredicateBuilder::filter_predicate(&filters).expect_err("blob member");
    assert_eq!(err.found, ValueTag::Blob);

    let list = SortSpecList::new(vec![SortSpec::asc("rating"), SortSpec::asc("id")])
        .with_cursor(vec![Value::List(vec![]), Value::Int(1)])
        .expect("arity matches");
    let err = PredicateBuilder::cursor_predicate(&list).expect_err("list cursor");
    assert_eq!(err.column, "rating");
    assert_eq!(err.found, ValueTag::List);
}

#[test]
fn eval_never_matches_missing_columns_or_mixed_types() {
    let row = row(&[Value::Int(1)]);

    assert!(!Predicate::eq("missing", Value::Int(1)).eval(&row));
    assert!(!Predicate::eq("a", Value::from("1")).eval(&row));
    assert!(!Predicate::gt("a", Value::float(0.5).expect("finite")).eval(&row));
    assert!(Predicate::in_("a", vec![Value::Int(0), Value::Int(1)]).eval(&row));
    assert!(!Predicate::in_("a", vec![]).eval(&row));
}

#[test]
fn display_renders_readable_tree() {
    let predicate = Predicate::or(vec![
        Predicate::lt("rating", Value::Int(4)),
        Predicate::And(vec![
            Predicate::eq("rating", Value::Int(4)),
            Predicate::gt("id", Value::Int(10)),
        ]),
    ]);

    assert_eq!(
        predicate.to_string(),
        "(rating < 4 OR (rating = 4 AND id > 10))"
    );
}
