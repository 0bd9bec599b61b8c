//! Module: db::coordinator
//! Responsibility: one paginated read end to end: validate, normalize,
//! build, fetch, and mint the continuation token.
//! Does not own: storage execution or transport encoding.


use crate::{
    config::PageConfig,
    db::{
        cursor::{CursorEntry, PageToken},
        filter::FilterSet,
        order::{SortRequest, SortSpecList, normalize_sorts},
        predicate::{PredicateBuilder, Row},
        query::PageQuery,
        response::PageResult,
        store::PageStore,
    },
    error::{PageError, UnsupportedValueTypeError},
    model::EntityModel,
    obs::sink::{MetricsEvent, PageSpan, RejectReason, record},
    value::ValueTag,
};

///
/// PageRequest
///
/// Already-decoded inbound request: filters, raw sorts, optional limit and
/// the token echoed back from the previous page.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PageRequest {
    pub filters: FilterSet,
    pub sorts: Vec<SortRequest>,
    pub limit: Option<u32>,
    pub token: Option<PageToken>,
}

impl PageRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: SortRequest) -> Self {
        self.sorts.push(sort);
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn token(mut self, token: impl Into<PageToken>) -> Self {
        self.token = Some(token.into());
        self
    }
}

///
/// PageCoordinator
///
/// Stateless across calls: every `execute` is independent and reads
/// nothing but its request, the entity model and the store.
///

#[derive(Clone, Debug)]
pub struct PageCoordinator<S> {
    model: EntityModel,
    config: PageConfig,
    store: S,
}

impl<S: PageStore> PageCoordinator<S> {
    #[must_use]
    pub const fn new(model: EntityModel, config: PageConfig, store: S) -> Self {
        Self {
            model,
            config,
            store,
        }
    }

    #[must_use]
    pub const fn model(&self) -> &EntityModel {
        &self.model
    }

    #[must_use]
    pub const fn config(&self) -> &PageConfig {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Build the query descriptor for a request without touching storage.
    pub fn plan(&self, request: &PageRequest) -> Result<PageQuery, PageError> {
        self.prepare(request).map(|(_, query)| query)
    }

    /// Fetch one page and, when it is full, the token for the next one.
    pub fn execute(&self, request: &PageRequest) -> Result<PageResult<S::Row>, PageError> {
        let entity_path = self.model.path();
        let mut span = PageSpan::new(entity_path, request.token.is_some());

        let result = self.execute_inner(request);
        match &result {
            Ok(page) => span.served(page.rows().len() as u64, page.has_next()),
            Err(err) => record_failure(entity_path, err),
        }

        result
    }

    fn execute_inner(&self, request: &PageRequest) -> Result<PageResult<S::Row>, PageError> {
        let (sorts, query) = self.prepare(request)?;
        let limit = query.limit() as usize;

        let mut rows = self.store.fetch(&query)?;
        rows.truncate(limit);

        let next_token = match rows.last() {
            Some(last) if rows.len() == limit => Some(self.next_token(&sorts, last)?),
            _ => None,
        };

        Ok(PageResult::new(rows, next_token))
    }

    fn prepare(&self, request: &PageRequest) -> Result<(SortSpecList, PageQuery), PageError> {
        request.filters.validate(&self.model)?;

        let sorts = normalize_sorts(&self.model, &request.sorts, request.token.as_ref())?;
        let limit = self.config.clamp_limit(request.limit);
        let fragment = PredicateBuilder::build(&request.filters, &sorts)?;

        let query = PageQuery::new(self.model.path(), fragment.predicate, fragment.order, limit);

        Ok((sorts, query))
    }

    // Resume point = the last row's value for every active sort column.
    fn next_token(&self, sorts: &SortSpecList, last: &S::Row) -> Result<PageToken, PageError> {
        let mut entries = Vec::with_capacity(sorts.len());

        for spec in sorts {
            let column = spec.column();
            let expected = self.model.column(column).map(|c| c.kind);

            let Some(value) = last.column_value(column) else {
                return Err(UnsupportedValueTypeError::new(column, ValueTag::Null, expected).into());
            };
            if value.scalar_type().is_none() || value.scalar_type() != expected {
                return Err(UnsupportedValueTypeError::new(column, value.tag(), expected).into());
            }

            entries.push(CursorEntry::new(column, spec.direction(), value));
        }

        Ok(PageToken::encode_entries(self.model.path(), &entries)?)
    }
}

fn record_failure(entity_path: &str, err: &PageError) {
    let event = match err {
        PageError::MalformedToken(_) => MetricsEvent::TokenRejected { entity_path },
        PageError::UnknownColumn(_) => MetricsEvent::RequestRejected {
            entity_path,
            reason: RejectReason::UnknownColumn,
        },
        PageError::UnsupportedValueType(_) => MetricsEvent::RequestRejected {
            entity_path,
            reason: RejectReason::UnsupportedValueType,
        },
        PageError::Storage(err) => MetricsEvent::StorageFailure {
            entity_path,
            kind: err.kind,
        },
    };

    record(event);
}
