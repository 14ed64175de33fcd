//! Translation of listing query strings into storage filters.
//!
//! Clients filter any listing route with plain query parameters. A bare
//! `key=value` pair is an equality test; a bracketed suffix selects a
//! comparison operator:
//!
//! ```text
//! GET /api/v1/bootcamps?averageCost[lte]=10000&housing=true&careers[in]=Business
//! ```
//!
//! The four control parameters `select`, `sort`, `page` and `limit` are never
//! filters. They drive projection, ordering and pagination instead.
//!
//! Translation is structural: every key is split into a field path and an
//! optional operator and turned into a [`Condition`] directly. Keys that do not
//! follow the `field`, `field[]`, `field[op]` or `field[op][]` shapes are
//! rejected with a [`QueryError`].

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::pagination::PageRequest;

/// Query parameters that are never treated as filter fields.
pub const CONTROL_KEYS: [&str; 4] = ["select", "sort", "page", "limit"];

/// Field every resource is ordered by when no `sort` is given (newest first).
pub const CREATED_AT_FIELD: &str = "createdAt";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Malformed query parameter `{0}`")]
    Malformed(String),
    #[error("Unknown query operator `{0}`")]
    UnknownOperator(String),
    #[error("Operator `{operator}` given more than once for `{field}`")]
    DuplicateOperator { field: String, operator: String },
    #[error("Invalid field name `{0}`")]
    InvalidField(String),
}

/// Dotted path to a (possibly nested) document field, e.g. `location.state`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Parses a client-supplied field name.
    ///
    /// Every dot-separated segment must be a non-empty run of ASCII
    /// alphanumerics or underscores.
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();

        let valid = segments.iter().all(|s| {
            !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        });
        if !valid {
            return Err(QueryError::InvalidField(raw.to_string()));
        }

        Ok(Self(segments))
    }

    /// Builds a path from a trusted, compile-time field name.
    pub fn from_static(raw: &'static str) -> Self {
        Self(raw.split('.').map(str::to_string).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Resolves the path inside a document.
    pub fn lookup<'a>(&self, doc: &'a Map<String, Value>) -> Option<&'a Value> {
        let (first, rest) = self.0.split_first()?;
        let mut current = doc.get(first)?;
        for segment in rest {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// A raw query-string value.
///
/// Query strings carry no types, so the operand keeps the text and offers
/// numeric and boolean readings. Storage backends pick the reading that
/// matches the type of the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand(String);

impl Operand {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_number(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|n| n.is_finite())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.0.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

impl From<&str> for Operand {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Operand {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Eq(Operand),
    Gt(Operand),
    Gte(Operand),
    Lt(Operand),
    Lte(Operand),
    In(Vec<Operand>),
}

impl Predicate {
    pub fn operator(&self) -> &'static str {
        match self {
            Predicate::Eq(_) => "eq",
            Predicate::Gt(_) => "gt",
            Predicate::Gte(_) => "gte",
            Predicate::Lt(_) => "lt",
            Predicate::Lte(_) => "lte",
            Predicate::In(_) => "in",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: FieldPath,
    pub predicate: Predicate,
}

/// Conjunction of conditions. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Equality on a trusted field name; used by services for lookups.
    pub fn eq(field: &'static str, value: impl Into<Operand>) -> Self {
        Self::all().and_eq(field, value)
    }

    pub fn and_eq(self, field: &'static str, value: impl Into<Operand>) -> Self {
        self.and(FieldPath::from_static(field), Predicate::Eq(value.into()))
    }

    pub fn and(mut self, field: FieldPath, predicate: Predicate) -> Self {
        self.conditions.push(Condition { field, predicate });
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Translates raw query-string pairs into a filter.
    ///
    /// Control keys are skipped. Repeating a bare key (`a=1&a=2`) or an `in`
    /// key accumulates operands into one `in` condition; repeating any other
    /// operator for the same field is an error.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, QueryError> {
        let mut entries: Vec<(FieldPath, Kind, Vec<Operand>)> = Vec::new();

        for (key, value) in pairs {
            if is_control_key(key) {
                continue;
            }

            let parsed = parse_key(key)?;
            let field = FieldPath::parse(parsed.field)?;
            let kind = match parsed.operator {
                None => Kind::Eq,
                Some(op) => Kind::from_operator(op)?,
            };
            if parsed.array && !matches!(kind, Kind::Eq | Kind::In) {
                return Err(QueryError::Malformed(key.clone()));
            }

            let existing = entries
                .iter()
                .position(|(f, k, _)| *f == field && *k == kind);

            match existing {
                Some(index) if matches!(kind, Kind::Eq | Kind::In) => {
                    entries[index].2.push(Operand::new(value.as_str()));
                }
                Some(_) => {
                    return Err(QueryError::DuplicateOperator {
                        field: field.to_string(),
                        operator: kind.as_str().to_string(),
                    });
                }
                None => entries.push((field, kind, vec![Operand::new(value.as_str())])),
            }
        }

        let conditions = entries
            .into_iter()
            .map(|(field, kind, mut operands)| {
                let predicate = match kind {
                    Kind::Eq if operands.len() == 1 => Predicate::Eq(operands.remove(0)),
                    Kind::Eq | Kind::In => Predicate::In(operands),
                    Kind::Gt => Predicate::Gt(operands.remove(0)),
                    Kind::Gte => Predicate::Gte(operands.remove(0)),
                    Kind::Lt => Predicate::Lt(operands.remove(0)),
                    Kind::Lte => Predicate::Lte(operands.remove(0)),
                };
                Condition { field, predicate }
            })
            .collect();

        Ok(Self { conditions })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl Kind {
    fn from_operator(op: &str) -> Result<Self, QueryError> {
        match op {
            "gt" => Ok(Kind::Gt),
            "gte" => Ok(Kind::Gte),
            "lt" => Ok(Kind::Lt),
            "lte" => Ok(Kind::Lte),
            "in" => Ok(Kind::In),
            other => Err(QueryError::UnknownOperator(other.to_string())),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Kind::Eq => "eq",
            Kind::Gt => "gt",
            Kind::Gte => "gte",
            Kind::Lt => "lt",
            Kind::Lte => "lte",
            Kind::In => "in",
        }
    }
}

struct ParsedKey<'a> {
    field: &'a str,
    operator: Option<&'a str>,
    array: bool,
}

fn base_name(key: &str) -> &str {
    key.split('[').next().unwrap_or(key)
}

fn is_control_key(key: &str) -> bool {
    CONTROL_KEYS.contains(&base_name(key))
}

/// Splits `field`, `field[]`, `field[op]` and `field[op][]` keys.
fn parse_key(key: &str) -> Result<ParsedKey<'_>, QueryError> {
    let malformed = || QueryError::Malformed(key.to_string());

    let Some(open) = key.find('[') else {
        if key.contains(']') {
            return Err(malformed());
        }
        return Ok(ParsedKey {
            field: key,
            operator: None,
            array: false,
        });
    };

    let (field, mut rest) = key.split_at(open);
    let mut brackets = Vec::new();
    while !rest.is_empty() {
        let inner = rest.strip_prefix('[').ok_or_else(malformed)?;
        let close = inner.find(']').ok_or_else(malformed)?;
        let (segment, tail) = inner.split_at(close);
        if segment.contains('[') {
            return Err(malformed());
        }
        brackets.push(segment);
        rest = &tail[1..];
    }

    let (operator, array) = match brackets.as_slice() {
        [""] => (None, true),
        [op] => (Some(*op), false),
        [op, ""] if !op.is_empty() => (Some(*op), true),
        _ => return Err(malformed()),
    };

    Ok(ParsedKey {
        field,
        operator,
        array,
    })
}

/// Fields kept in returned documents (`select=name,description`).
///
/// The document `id` is always kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection(Vec<FieldPath>);

impl Projection {
    /// Parses a comma-separated field list. Returns `None` when it names no field.
    pub fn parse(raw: &str) -> Result<Option<Self>, QueryError> {
        let fields = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(FieldPath::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((!fields.is_empty()).then_some(Self(fields)))
    }

    pub fn fields(&self) -> &[FieldPath] {
        &self.0
    }

    pub fn apply(&self, doc: &Map<String, Value>) -> Map<String, Value> {
        let mut out = Map::new();
        if let Some(id) = doc.get("id") {
            out.insert("id".to_string(), id.clone());
        }
        for field in &self.0 {
            if let Some(value) = field.lookup(doc) {
                insert_path(&mut out, field.segments(), value.clone());
            }
        }
        out
    }
}

fn insert_path(out: &mut Map<String, Value>, segments: &[String], value: Value) {
    match segments {
        [] => {}
        [last] => {
            out.insert(last.clone(), value);
        }
        [first, rest @ ..] => {
            let entry = out
                .entry(first.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(inner) = entry {
                insert_path(inner, rest, value);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: FieldPath,
    pub descending: bool,
}

impl SortKey {
    /// Parses `sort=name,-averageCost`. A leading `-` means descending.
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, QueryError> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix('-') {
                Some(field) => Ok(SortKey {
                    field: FieldPath::parse(field)?,
                    descending: true,
                }),
                None => Ok(SortKey {
                    field: FieldPath::parse(s)?,
                    descending: false,
                }),
            })
            .collect()
    }

    /// Newest first.
    pub fn default_order() -> Vec<Self> {
        vec![SortKey {
            field: FieldPath::from_static(CREATED_AT_FIELD),
            descending: true,
        }]
    }
}

/// Everything a listing route needs from the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: Filter,
    pub projection: Option<Projection>,
    pub sort: Vec<SortKey>,
    pub page: PageRequest,
}

impl ListQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, QueryError> {
        // The first occurrence of a control key wins.
        let control = |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };

        let projection = match control("select") {
            Some(raw) => Projection::parse(raw)?,
            None => None,
        };

        let sort = match control("sort") {
            Some(raw) => SortKey::parse_list(raw)?,
            None => Vec::new(),
        };
        let sort = if sort.is_empty() {
            SortKey::default_order()
        } else {
            sort
        };

        Ok(Self {
            filter: Filter::from_pairs(pairs)?,
            projection,
            sort,
            page: PageRequest::from_raw(control("page"), control("limit")),
        })
    }

    /// Narrows the listing to documents whose `field` equals `value`.
    pub fn scoped_to(mut self, field: &'static str, value: impl Into<Operand>) -> Self {
        self.filter = self.filter.and_eq(field, value);
        self
    }
}
