//! Module: db::sql
//! Responsibility: render a `PageQuery` as a parameterised SQL fragment.
//! Does not own: connection handling or statement execution.
//!
//! Values never appear in the SQL text; they are returned as ordered bind
//! parameters. Identifiers come from the entity allow-list and are quoted.

use crate::{
    db::{
        predicate::{CompareOp, ComparePredicate, Predicate},
        query::PageQuery,
    },
    value::Value,
};
use std::fmt::Write as _;

///
/// SqlDialect
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SqlDialect {
    /// Backtick identifiers, `?` placeholders.
    #[default]
    MySql,
    /// Double-quoted identifiers, `$n` placeholders.
    Postgres,
    /// Double-quoted identifiers, `?` placeholders.
    Sqlite,
}

impl SqlDialect {
    fn quote_ident(self, ident: &str) -> String {
        let quote = match self {
            Self::MySql => '`',
            Self::Postgres | Self::Sqlite => '"',
        };

        let mut out = String::with_capacity(ident.len() + 2);
        out.push(quote);
        for ch in ident.chars() {
            if ch == quote {
                out.push(quote);
            }
            out.push(ch);
        }
        out.push(quote);
        out
    }

    fn placeholder(self, position: usize) -> String {
        match self {
            Self::MySql | Self::Sqlite => "?".to_string(),
            Self::Postgres => format!("${position}"),
        }
    }
}

///
/// SqlFragment
///
/// `WHERE` body (empty when unfiltered), `ORDER BY` body, limit, and the
/// bind parameters for every placeholder in order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SqlFragment {
    pub where_sql: String,
    pub order_by_sql: String,
    pub limit: u32,
    pub params: Vec<Value>,
}

impl SqlFragment {
    /// Trailing clause text: `[WHERE ...] ORDER BY ... LIMIT n`.
    #[must_use]
    pub fn clause(&self) -> String {
        let mut out = String::new();
        if !self.where_sql.is_empty() {
            let _ = write!(out, "WHERE {} ", self.where_sql);
        }
        let _ = write!(out, "ORDER BY {} LIMIT {}", self.order_by_sql, self.limit);
        out
    }
}

/// Render one page query for a dialect.
#[must_use]
pub fn render(query: &PageQuery, dialect: SqlDialect) -> SqlFragment {
    let mut renderer = Renderer {
        dialect,
        params: Vec::new(),
    };

    let where_sql = match query.predicate() {
        Predicate::True => String::new(),
        predicate => renderer.predicate(predicate, false),
    };

    let order_by_sql = query
        .order()
        .iter()
        .map(|term| {
            format!(
                "{} {}",
                dialect.quote_ident(&term.column),
                term.direction.keyword()
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    SqlFragment {
        where_sql,
        order_by_sql,
        limit: query.limit(),
        params: renderer.params,
    }
}

///
/// Renderer
/// Accumulates bind parameters while walking the predicate tree.
///

struct Renderer {
    dialect: SqlDialect,
    params: Vec<Value>,
}

impl Renderer {
    fn bind(&mut self, value: &Value) -> String {
        self.params.push(value.clone());
        self.dialect.placeholder(self.params.len())
    }

    // Nested compound nodes are parenthesized; the root is not.
    fn predicate(&mut self, predicate: &Predicate, nested: bool) -> String {
        let (children, sep) = match predicate {
            Predicate::True => return "1 = 1".to_string(),
            Predicate::Compare(cmp) => return self.compare(cmp),
            // Empty nodes keep the in-memory meaning: all() is true, any() is false.
            Predicate::And(children) if children.is_empty() => return "1 = 1".to_string(),
            Predicate::Or(children) if children.is_empty() => return "1 = 0".to_string(),
            Predicate::And(children) => (children, " AND "),
            Predicate::Or(children) => (children, " OR "),
        };

        let body = children
            .iter()
            .map(|child| self.predicate(child, true))
            .collect::<Vec<_>>()
            .join(sep);

        if nested && children.len() > 1 {
            format!("({body})")
        } else {
            body
        }
    }

    fn compare(&mut self, cmp: &ComparePredicate) -> String {
        let column = self.dialect.quote_ident(&cmp.column);

        match (cmp.op, &cmp.value) {
            (CompareOp::In, Value::List(items)) if items.is_empty() => "1 = 0".to_string(),
            (CompareOp::In, Value::List(items)) => {
                let placeholders = items
                    .iter()
                    .map(|item| self.bind(item))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{column} IN ({placeholders})")
            }
            (op, value) => {
                let placeholder = self.bind(value);
                format!("{column} {} {placeholder}", op.symbol())
            }
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::{SqlDialect, render};
    use crate::{
        db::{
            direction::Direction,
            predicate::Predicate,
            query::{OrderTerm, PageQuery},
        },
        value::Value,
    };

    fn rating_query() -> PageQuery {
        PageQuery::new(
            "shop::product",
            Predicate::and(vec![
                Predicate::in_("category_id", vec![Value::Int(1), Value::Int(2)]),
                Predicate::or(vec![
                    Predicate::lt("rating", Value::Int(4)),
                    Predicate::and(vec![
                        Predicate::eq("rating", Value::Int(4)),
                        Predicate::gt("id", Value::Int(10)),
                    ]),
                ]),
            ]),
            vec![
                OrderTerm::new("rating", Direction::Desc),
                OrderTerm::new("id", Direction::Asc),
            ],
            10,
        )
    }

    #[test]
    fn mysql_uses_backticks_and_question_marks() {
        let sql = render(&rating_query(), SqlDialect::MySql);

        assert_eq!(
            sql.where_sql,
            "`category_id` IN (?, ?) AND (`rating` < ? OR (`rating` = ? AND `id` > ?))"
        );
        assert_eq!(sql.order_by_sql, "`rating` DESC, `id` ASC");
        assert_eq!(
            sql.params,
            vec![
                Value::Int(1),
                Value::Int(2),
                Value::Int(4),
                Value::Int(4),
                Value::Int(10)
            ]
        );
        assert_eq!(
            sql.clause(),
            "WHERE `category_id` IN (?, ?) AND (`rating` < ? OR (`rating` = ? AND `id` > ?)) \
             ORDER BY `rating` DESC, `id` ASC LIMIT 10"
        );
    }

    #[test]
    fn postgres_numbers_placeholders_in_bind_order() {
        let sql = render(&rating_query(), SqlDialect::Postgres);

        assert_eq!(
            sql.where_sql,
            "\"category_id\" IN ($1, $2) AND (\"rating\" < $3 OR (\"rating\" = $4 AND \"id\" > $5))"
        );
    }

    #[test]
    fn unfiltered_first_page_has_no_where_clause() {
        let query = PageQuery::new(
            "shop::product",
            Predicate::True,
            vec![OrderTerm::new("id", Direction::Asc)],
            25,
        );
        let sql = render(&query, SqlDialect::Sqlite);

        assert!(sql.where_sql.is_empty());
        assert!(sql.params.is_empty());
        assert_eq!(sql.clause(), "ORDER BY \"id\" ASC LIMIT 25");
    }

    #[test]
    fn empty_compound_nodes_render_as_constant_conditions() {
        let query = PageQuery::new(
            "shop::product",
            Predicate::And(vec![
                Predicate::eq("id", Value::Int(1)),
                Predicate::Or(vec![]),
                Predicate::And(vec![]),
            ]),
            vec![OrderTerm::new("id", Direction::Asc)],
            10,
        );
        let sql = render(&query, SqlDialect::MySql);

        assert_eq!(sql.where_sql, "`id` = ? AND 1 = 0 AND 1 = 1");
        assert_eq!(sql.params, vec![Value::Int(1)]);

        let nothing = PageQuery::new(
            "shop::product",
            Predicate::Or(vec![]),
            vec![OrderTerm::new("id", Direction::Asc)],
            10,
        );
        assert_eq!(render(&nothing, SqlDialect::MySql).where_sql, "1 = 0");
    }

    #[test]
    fn embedded_quotes_in_identifiers_are_doubled() {
        let query = PageQuery::new(
            "shop::product",
            Predicate::eq("we\"ird", Value::Bool(true)),
            vec![OrderTerm::new("id", Direction::Desc)],
            10,
        );
        let sql = render(&query, SqlDialect::Sqlite);

        assert_eq!(sql.where_sql, "\"we\"\"ird\" = ?");
    }
}
