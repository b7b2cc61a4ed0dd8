//! Typed query descriptions for roster listings.
//!
//! A [`MemberQuery`] is a list of tagged [`Filter`]s (field, operator, value), an
//! optional free-text search, sort keys and paging. Defaults for ordering and
//! page size come from [`RosterConfig`] and are passed in explicitly.

use crate::config::RosterConfig;
use crate::entities::{MemberColumn, member};
use chrono::NaiveDate;
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{ColumnTrait, Condition, EntityTrait, Order, QueryFilter, QueryOrder, Select};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Member fields that can be filtered or sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberField {
    LastName,
    FirstName,
    Email,
    Phone,
    City,
    State,
    PostalCode,
    Mmb,
    IsActive,
    Joined,
    PaidThrough,
    NewsletterType,
    LastUpdated,
}

impl MemberField {
    const fn column(self) -> MemberColumn {
        match self {
            Self::LastName => MemberColumn::LastName,
            Self::FirstName => MemberColumn::FirstName,
            Self::Email => MemberColumn::Email,
            Self::Phone => MemberColumn::Phone,
            Self::City => MemberColumn::City,
            Self::State => MemberColumn::State,
            Self::PostalCode => MemberColumn::PostalCode,
            Self::Mmb => MemberColumn::Mmb,
            Self::IsActive => MemberColumn::IsActive,
            Self::Joined => MemberColumn::Joined,
            Self::PaidThrough => MemberColumn::PaidThrough,
            Self::NewsletterType => MemberColumn::NewsletterType,
            Self::LastUpdated => MemberColumn::LastUpdated,
        }
    }
}

/// Comparison applied by a [`Filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Ne,
    /// Substring match on the value's text form
    Contains,
    /// Prefix match on the value's text form
    StartsWith,
    Gte,
    Lte,
    /// Field is empty; the value is ignored
    IsNull,
    /// Field is set; the value is ignored
    IsNotNull,
}

/// Right-hand side of a [`Filter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Date(NaiveDate),
    Text(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<FilterValue> for sea_orm::Value {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::Bool(b) => b.into(),
            FilterValue::Date(d) => d.into(),
            FilterValue::Text(s) => s.into(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for FilterValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// One condition on a member field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub field: MemberField,
    pub op: Operator,
    pub value: FilterValue,
}

impl Filter {
    /// Builds a filter.
    pub fn new(field: MemberField, op: Operator, value: impl Into<FilterValue>) -> Self {
        Self {
            field,
            op,
            value: value.into(),
        }
    }

    fn expr(&self) -> SimpleExpr {
        let column = self.field.column();
        let value = self.value.clone();
        match self.op {
            Operator::Eq => column.eq(value),
            Operator::Ne => column.ne(value),
            Operator::Contains => column.contains(value.to_string()),
            Operator::StartsWith => column.starts_with(value.to_string()),
            Operator::Gte => column.gte(value),
            Operator::Lte => column.lte(value),
            Operator::IsNull => column.is_null(),
            Operator::IsNotNull => column.is_not_null(),
        }
    }
}

/// Sort direction for a [`SortKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One ordering term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: MemberField,
    pub direction: SortDirection,
}

impl SortKey {
    /// Builds a sort key.
    #[must_use]
    pub const fn new(field: MemberField, direction: SortDirection) -> Self {
        Self { field, direction }
    }
}

/// A complete roster listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberQuery {
    /// All of these must hold
    pub filters: Vec<Filter>,
    /// Matches last name, first name or email
    pub search: Option<String>,
    pub sort: Vec<SortKey>,
    /// 1-based page number
    pub page: u64,
    /// Members per page
    pub limit: u64,
}

impl MemberQuery {
    /// First page of the configured roster: configured ordering and page size,
    /// restricted to active members unless the configuration shows inactive ones.
    #[must_use]
    pub fn from_config(config: &RosterConfig) -> Self {
        let filters = if config.show_inactive {
            Vec::new()
        } else {
            vec![Filter::new(MemberField::IsActive, Operator::Eq, true)]
        };
        Self {
            filters,
            search: None,
            sort: config.sort.clone(),
            page: 1,
            limit: config.page_size,
        }
    }

    /// Selects the 1-based page to fetch; zero is treated as the first page.
    #[must_use]
    pub fn page(mut self, page: u64) -> Self {
        self.page = page.max(1);
        self
    }

    /// Adds a free-text search; blank text is ignored.
    #[must_use]
    pub fn search(mut self, text: Option<&str>) -> Self {
        self.search = text
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToString::to_string);
        self
    }

    /// Adds a filter.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Combined filter and search condition.
    #[must_use]
    pub fn condition(&self) -> Condition {
        let mut condition = self
            .filters
            .iter()
            .fold(Condition::all(), |cond, filter| cond.add(filter.expr()));

        if let Some(text) = &self.search {
            condition = condition.add(
                Condition::any()
                    .add(MemberColumn::LastName.contains(text.as_str()))
                    .add(MemberColumn::FirstName.contains(text.as_str()))
                    .add(MemberColumn::Email.contains(text.as_str())),
            );
        }
        condition
    }

    /// The filtered, ordered select statement, without paging.
    #[must_use]
    pub fn select(&self) -> Select<member::Entity> {
        let select = member::Entity::find().filter(self.condition());
        let select = self.sort.iter().fold(select, |select, key| {
            let order = match key.direction {
                SortDirection::Asc => Order::Asc,
                SortDirection::Desc => Order::Desc,
            };
            select.order_by(key.field.column(), order)
        });
        select.order_by_asc(MemberColumn::Id)
    }
}

/// One page of results plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub data: Vec<T>,
    /// Number of records matching the filter across all pages
    pub total_count: u64,
    /// 1-based page number of `data`
    pub page: u64,
    pub page_count: u64,
}

impl<T> Page<T> {
    /// Converts every item on the page, keeping the counts. Stops at the first failure.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        Ok(Page {
            data: self.data.into_iter().map(f).collect::<Result<_, _>>()?,
            total_count: self.total_count,
            page: self.page,
            page_count: self.page_count,
        })
    }
}

/// Pages needed to show `total` records `limit` at a time.
#[must_use]
pub const fn page_count(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}
