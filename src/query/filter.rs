//! Filter expression construction / 过滤表达式构建
//!
//! Renders structured predicates into the engine's native filter syntax.
//! Fragments are AND-joined in insertion order; set predicates carry their
//! own parentheses and no other precedence grouping is applied.

use serde::{Deserialize, Serialize};

/// Comparison operator supported by the filter syntax / 支持的比较运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Eq,
    Gt,
    Lt,
    Ge,
    Le,
    Ne,
}

impl Operator {
    /// Parse a source token / 解析运算符
    ///
    /// `!=` and `<>` both normalize to [`Operator::Ne`]. Any other token is
    /// unsupported and yields `None`; callers drop the predicate silently
    /// rather than raising an error.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "=" => Some(Self::Eq),
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            ">=" => Some(Self::Ge),
            "<=" => Some(Self::Le),
            "!=" | "<>" => Some(Self::Ne),
            _ => None,
        }
    }

    /// Engine-native token / 引擎原生写法
    pub fn token(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Ne => "!=",
        }
    }
}

/// One accumulated filter condition / 单个过滤条件
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `field OPERATOR "value"`
    Compare {
        field: String,
        operator: Operator,
        value: String,
    },
    /// `(field="v1" OR field="v2" OR ...)`
    SetIn { field: String, values: Vec<String> },
    /// `NOT (field="v1" OR field="v2" OR ...)`
    SetNotIn { field: String, values: Vec<String> },
}

impl Predicate {
    /// Render this predicate as one engine-native fragment.
    ///
    /// Set predicates with no values render nothing. Value literals are
    /// double-quoted verbatim; embedded quotes are not escaped.
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Compare {
                field,
                operator,
                value,
            } => Some(format!("{}{}\"{}\"", field, operator.token(), value)),
            Self::SetIn { field, values } => {
                if values.is_empty() {
                    None
                } else {
                    Some(format!("({})", terms(field, values)))
                }
            }
            Self::SetNotIn { field, values } => {
                if values.is_empty() {
                    None
                } else {
                    Some(format!("NOT ({})", terms(field, values)))
                }
            }
        }
    }
}

/// OR-joined disjunction shared by both set predicates / OR 连接的条件组
///
/// Preserves input order, no sorting or dedup.
fn terms(field: &str, values: &[String]) -> String {
    values
        .iter()
        .map(|value| format!("{}=\"{}\"", field, value))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// AND-join all rendered fragments in insertion order / 组合完整过滤表达式
///
/// Returns `None` when nothing renders, so callers can leave the filter
/// field off the request entirely.
pub fn render_filters(predicates: &[Predicate]) -> Option<String> {
    let fragments: Vec<String> = predicates.iter().filter_map(Predicate::render).collect();
    if fragments.is_empty() {
        None
    } else {
        Some(fragments.join(" AND "))
    }
}
