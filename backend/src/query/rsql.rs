//! RSQL constraint tree: atomic comparison builders, AND/OR composition
//! and serialization to the catalog's wire syntax.

use common::filters::SatisfyMode;

/// Attributes covered by the free-text search expansion. Fixed policy:
/// the collection's own name/id/acronym plus the same three attributes of
/// the owning biobank.
pub const SEARCH_ATTRIBUTES: &[&str] = &[
    "name",
    "id",
    "acronym",
    "biobank.name",
    "biobank.id",
    "biobank.acronym",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    /// `=in=` set membership.
    In,
    /// `==` equality.
    Eq,
    /// `=q=` fuzzy match.
    Search,
}

impl ComparisonOperator {
    fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::In => "=in=",
            ComparisonOperator::Eq => "==",
            ComparisonOperator::Search => "=q=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOperator {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    Comparison {
        selector: String,
        operator: ComparisonOperator,
        arguments: Vec<String>,
    },
    Group {
        operator: GroupOperator,
        operands: Vec<Constraint>,
    },
}

/// Build a single `=in=` comparison; an empty value set yields no
/// constraint at all, never an error.
pub fn in_query(selector: &str, values: &[String]) -> Vec<Constraint> {
    if values.is_empty() {
        return Vec::new();
    }
    vec![Constraint::Comparison {
        selector: selector.to_string(),
        operator: ComparisonOperator::In,
        arguments: values.to_vec(),
    }]
}

/// Build one `==` comparison per value; the caller decides how to join them.
pub fn equality_comparisons(selector: &str, values: &[String]) -> Vec<Constraint> {
    values
        .iter()
        .map(|value| Constraint::Comparison {
            selector: selector.to_string(),
            operator: ComparisonOperator::Eq,
            arguments: vec![value.clone()],
        })
        .collect()
}

/// Build a single fuzzy-match comparison; empty text yields no constraint.
pub fn fuzzy_query(selector: &str, text: &str) -> Vec<Constraint> {
    if text.is_empty() {
        return Vec::new();
    }
    vec![Constraint::Comparison {
        selector: selector.to_string(),
        operator: ComparisonOperator::Search,
        arguments: vec![text.to_string()],
    }]
}

/// Compile one facet's values according to its satisfy mode: any-of is a
/// set membership, all-of is per-value equality joined by the enclosing
/// AND group.
pub fn facet_predicate(selector: &str, values: &[String], mode: SatisfyMode) -> Vec<Constraint> {
    match mode {
        SatisfyMode::Any => in_query(selector, values),
        SatisfyMode::All => equality_comparisons(selector, values),
    }
}

/// Expand free-text search into an OR group of fuzzy comparisons over the
/// fixed searchable attribute list.
pub fn search_expansion(text: &str) -> Vec<Constraint> {
    if text.is_empty() {
        return Vec::new();
    }
    vec![or(SEARCH_ATTRIBUTES
        .iter()
        .flat_map(|attr| fuzzy_query(attr, text))
        .collect())]
}

pub fn and(operands: Vec<Constraint>) -> Constraint {
    Constraint::Group {
        operator: GroupOperator::And,
        operands,
    }
}

pub fn or(operands: Vec<Constraint>) -> Constraint {
    Constraint::Group {
        operator: GroupOperator::Or,
        operands,
    }
}

/// Serialize a constraint tree to the RSQL wire syntax. Empty groups
/// compile to the identity (empty) query; single-child groups collapse to
/// the child; OR groups are parenthesized inside AND groups to preserve
/// precedence.
pub fn transform_to_rsql(constraint: &Constraint) -> String {
    render(constraint, None)
}

fn render(constraint: &Constraint, parent: Option<GroupOperator>) -> String {
    match constraint {
        Constraint::Comparison {
            selector,
            operator,
            arguments,
        } => {
            let rendered_args = match operator {
                ComparisonOperator::In if arguments.len() > 1 => {
                    let joined = arguments
                        .iter()
                        .map(|a| encode_rsql_value(a))
                        .collect::<Vec<_>>()
                        .join(",");
                    format!("({joined})")
                }
                _ => arguments
                    .first()
                    .map(|a| encode_rsql_value(a))
                    .unwrap_or_default(),
            };
            format!("{}{}{}", selector, operator.as_str(), rendered_args)
        }
        Constraint::Group { operator, operands } => {
            let parts = operands
                .iter()
                .map(|operand| render(operand, Some(*operator)))
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>();
            if parts.is_empty() {
                return String::new();
            }
            if parts.len() == 1 {
                return parts.into_iter().next().unwrap_or_default();
            }
            let separator = match operator {
                GroupOperator::And => ";",
                GroupOperator::Or => ",",
            };
            let joined = parts.join(separator);
            // `,` binds looser than `;`, so only OR under AND needs parens
            if *operator == GroupOperator::Or && parent == Some(GroupOperator::And) {
                format!("({joined})")
            } else {
                joined
            }
        }
    }
}

const RESERVED: &[char] = &[
    '"', '\'', '(', ')', ';', ',', '=', '!', '~', '<', '>', ' ',
];

/// Quote a value when it contains RSQL-reserved characters. Double quotes
/// are preferred; single quotes are used when the value itself contains a
/// double quote; backslash escaping covers the value containing both.
pub fn encode_rsql_value(value: &str) -> String {
    if !value.is_empty() && !value.contains(RESERVED) {
        return value.to_string();
    }
    if !value.contains('"') {
        format!("\"{value}\"")
    } else if !value.contains('\'') {
        format!("'{value}'")
    } else {
        format!(
            "\"{}\"",
            value.replace('\\', "\\\\").replace('"', "\\\"")
        )
    }
}
