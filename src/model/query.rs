//! List query parameters for collection reads.
//!
//! The backend collection API accepts paging (`page`, `limit`), filter clauses written as
//! `field||op||value` (repeated `filter` parameters are AND-ed, repeated `or` parameters are
//! OR-ed), a JSON search object `s`, relation `join`s and `sort`s. [`ListQuery`] parses the
//! proxy's raw query pairs into that shape, rejects malformed input and renders the pairs
//! forwarded to the backend.

use std::{fmt, str::FromStr};

use serde_json::Value;
use thiserror::Error;

use crate::model::translator::Translator;

const CLAUSE_SEPARATOR: &str = "||";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid value for query parameter `{param}`: {reason}")]
    InvalidParam { param: String, reason: String },
    #[error("Malformed filter clause `{0}`, expected `field||operator||value`")]
    MalformedFilter(String),
    #[error("Unknown filter operator `{0}`")]
    UnknownOperator(String),
    #[error("Malformed sort clause `{0}`, expected `field,ASC` or `field,DESC`")]
    MalformedSort(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
    Starts,
    Ends,
    Cont,
    Excl,
    In,
    NotIn,
    IsNull,
    NotNull,
    Between,
}

impl FilterOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::Starts => "starts",
            Self::Ends => "ends",
            Self::Cont => "cont",
            Self::Excl => "excl",
            Self::In => "in",
            Self::NotIn => "notin",
            Self::IsNull => "isnull",
            Self::NotNull => "notnull",
            Self::Between => "between",
        }
    }

    /// Whether the operator takes no operand
    pub fn is_unary(self) -> bool {
        matches!(self, Self::IsNull | Self::NotNull)
    }
}

impl FromStr for FilterOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let operator = match s {
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "gt" => Self::Gt,
            "lt" => Self::Lt,
            "gte" => Self::Gte,
            "lte" => Self::Lte,
            "starts" => Self::Starts,
            "ends" => Self::Ends,
            "cont" => Self::Cont,
            "excl" => Self::Excl,
            "in" => Self::In,
            "notin" => Self::NotIn,
            "isnull" => Self::IsNull,
            "notnull" => Self::NotNull,
            "between" => Self::Between,
            other => return Err(QueryError::UnknownOperator(other.to_string())),
        };

        Ok(operator)
    }
}

/// A single `field||op||value` condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterClause {
    pub field: String,
    pub operator: FilterOperator,
    pub value: Option<String>,
}

impl FilterClause {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: Some(value.into()),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Eq, value)
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator: FilterOperator::IsNull,
            value: None,
        }
    }

    pub fn parse(clause: &str) -> Result<Self, QueryError> {
        let malformed = || QueryError::MalformedFilter(clause.to_string());

        let mut parts = clause.splitn(3, CLAUSE_SEPARATOR);
        let field = parts.next().filter(|field| !field.is_empty()).ok_or_else(malformed)?;
        let operator: FilterOperator = parts.next().ok_or_else(malformed)?.parse()?;
        let value = parts.next().map(str::to_string);

        match (operator.is_unary(), &value) {
            (true, Some(_)) | (false, None) => Err(malformed()),
            _ => Ok(Self {
                field: field.to_string(),
                operator,
                value,
            }),
        }
    }

    fn to_backend(self, translator: &Translator) -> Self {
        Self {
            field: translator.backend_name(&self.field).to_string(),
            ..self
        }
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{CLAUSE_SEPARATOR}{}", self.field, self.operator.as_str())?;

        if let Some(value) = &self.value {
            write!(f, "{CLAUSE_SEPARATOR}{value}")?;
        }

        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortClause {
    pub field: String,
    pub order: SortOrder,
}

impl SortClause {
    pub fn parse(clause: &str) -> Result<Self, QueryError> {
        let malformed = || QueryError::MalformedSort(clause.to_string());

        let (field, order) = clause.split_once(',').ok_or_else(malformed)?;
        if field.is_empty() {
            return Err(malformed());
        }

        let order = match order.to_ascii_uppercase().as_str() {
            "ASC" => SortOrder::Asc,
            "DESC" => SortOrder::Desc,
            _ => return Err(malformed()),
        };

        Ok(Self {
            field: field.to_string(),
            order,
        })
    }
}

impl fmt::Display for SortClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = match self.order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };

        write!(f, "{},{order}", self.field)
    }
}

/// Parsed list parameters, in frontend field naming until [`ListQuery::to_backend`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub filter: Vec<FilterClause>,
    pub or: Vec<FilterClause>,
    pub search: Option<Value>,
    pub join: Vec<String>,
    pub sort: Vec<SortClause>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, clause: FilterClause) -> Self {
        self.filter.push(clause);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Parses raw query pairs. Parameters the backend does not understand are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();

        for (key, value) in pairs {
            let value = value.as_ref();

            match key.as_ref() {
                "page" => query.page = Some(parse_positive("page", value)?),
                "limit" => query.limit = Some(parse_positive("limit", value)?),
                "filter" | "filter[]" => query.filter.push(FilterClause::parse(value)?),
                "or" | "or[]" => query.or.push(FilterClause::parse(value)?),
                "join" | "join[]" => query.join.push(value.to_string()),
                "sort" | "sort[]" => query.sort.push(SortClause::parse(value)?),
                "s" => {
                    let search: Value =
                        serde_json::from_str(value).map_err(|e| QueryError::InvalidParam {
                            param: "s".to_string(),
                            reason: e.to_string(),
                        })?;

                    if !search.is_object() {
                        return Err(QueryError::InvalidParam {
                            param: "s".to_string(),
                            reason: "expected a JSON object".to_string(),
                        });
                    }

                    query.search = Some(search);
                }
                _ => {}
            }
        }

        Ok(query)
    }

    /// Renames every field reference to its backend spelling
    pub fn to_backend(self, translator: &Translator) -> Self {
        Self {
            page: self.page,
            limit: self.limit,
            filter: self
                .filter
                .into_iter()
                .map(|clause| clause.to_backend(translator))
                .collect(),
            or: self
                .or
                .into_iter()
                .map(|clause| clause.to_backend(translator))
                .collect(),
            search: self
                .search
                .map(|search| translator.search_to_backend(search)),
            join: self
                .join
                .into_iter()
                .map(|join| join_to_backend(&join, translator))
                .collect(),
            sort: self
                .sort
                .into_iter()
                .map(|sort| SortClause {
                    field: translator.backend_name(&sort.field).to_string(),
                    order: sort.order,
                })
                .collect(),
        }
    }

    /// Query pairs in the form the backend collection API expects
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("s".to_string(), search.to_string()));
        }

        pairs.extend(self.filter.iter().map(|c| ("filter".to_string(), c.to_string())));
        pairs.extend(self.or.iter().map(|c| ("or".to_string(), c.to_string())));
        pairs.extend(self.join.iter().map(|j| ("join".to_string(), j.clone())));
        pairs.extend(self.sort.iter().map(|s| ("sort".to_string(), s.to_string())));

        pairs
    }
}

fn parse_positive(param: &str, value: &str) -> Result<u32, QueryError> {
    match value.parse::<u32>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(QueryError::InvalidParam {
            param: param.to_string(),
            reason: format!("expected a positive integer, got `{value}`"),
        }),
    }
}

/// `relation||field,field` with the selected fields renamed
fn join_to_backend(join: &str, translator: &Translator) -> String {
    match join.split_once(CLAUSE_SEPARATOR) {
        Some((relation, fields)) => {
            let fields: Vec<&str> = fields
                .split(',')
                .map(|field| translator.backend_name(field))
                .collect();

            format!("{relation}{CLAUSE_SEPARATOR}{}", fields.join(","))
        }
        None => join.to_string(),
    }
}
