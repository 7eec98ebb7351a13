//! Page sources and transparent page collection.
//!
//! The aggregation engine only ever sees fully materialized collections.
//! [`fetch_all`] walks every page a [`PageSource`] advertises and checks that
//! the rows received add up to the advertised total.

use chrono::NaiveDate;

use crate::types::{
    parse_row_date, ClientRow, InvestmentRow, PaginatedResponse, Paging, Meta, SaleRow, TargetRow,
    UserRow,
};
use crate::{Error, PageQuery};

/// Anything that can serve one page of a collection.
pub trait PageSource<T> {
    fn fetch_page(&self, query: &PageQuery) -> Result<PaginatedResponse<T>, Error>;
}

/// Rep and date a row is scoped to, for page query filtering.
///
/// `None` means the row carries no such scope and is never filtered on it.
pub trait Scoped {
    fn scope_rep(&self) -> Option<&str>;
    fn scope_date(&self) -> Option<NaiveDate>;
}

impl Scoped for SaleRow {
    fn scope_rep(&self) -> Option<&str> {
        Some(&self.usuario_id)
    }

    fn scope_date(&self) -> Option<NaiveDate> {
        parse_row_date(&self.data)
    }
}

impl Scoped for TargetRow {
    fn scope_rep(&self) -> Option<&str> {
        Some(&self.usuario_id)
    }

    fn scope_date(&self) -> Option<NaiveDate> {
        let year = i32::try_from(self.ano).ok()?;
        let month = u32::try_from(self.mes).ok()?;
        NaiveDate::from_ymd_opt(year, month, 1)
    }
}

impl Scoped for InvestmentRow {
    fn scope_rep(&self) -> Option<&str> {
        Some(&self.usuario_id)
    }

    fn scope_date(&self) -> Option<NaiveDate> {
        parse_row_date(&self.data)
    }
}

impl Scoped for ClientRow {
    fn scope_rep(&self) -> Option<&str> {
        Some(&self.usuario_id)
    }

    fn scope_date(&self) -> Option<NaiveDate> {
        None
    }
}

impl Scoped for UserRow {
    fn scope_rep(&self) -> Option<&str> {
        None
    }

    fn scope_date(&self) -> Option<NaiveDate> {
        None
    }
}

/// Serves pages out of an already-loaded collection.
///
/// Rows whose date cannot be parsed still pass the date filter so the
/// adapter gets to reject them with a proper error instead of having them
/// vanish silently.
#[derive(Debug, Clone)]
pub struct InMemorySource<T> {
    rows: Vec<T>,
}

impl<T> InMemorySource<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T: Scoped + Clone> PageSource<T> for InMemorySource<T> {
    fn fetch_page(&self, query: &PageQuery) -> Result<PaginatedResponse<T>, Error> {
        if query.page_size < 1 {
            return Err(Error::InvalidPageSize(query.page_size));
        }

        let selected: Vec<&T> = self
            .rows
            .iter()
            .filter(|row| query.selects(row.scope_rep(), row.scope_date()))
            .collect();

        let paging = Paging::for_items(query.page, query.page_size, selected.len() as i64);
        if query.page < 1 || (paging.total_pages > 0 && query.page > paging.total_pages) {
            return Err(Error::PageOutOfRange {
                page: query.page,
                total_pages: paging.total_pages,
            });
        }

        let start = ((query.page - 1) * query.page_size) as usize;
        let data = selected
            .into_iter()
            .skip(start)
            .take(query.page_size as usize)
            .cloned()
            .collect();

        Ok(PaginatedResponse {
            meta: Meta { paging },
            data,
        })
    }
}

/// Fetch every page matching `query`, starting from page 1.
///
/// The page number in `query` is ignored. Fails rather than returning a
/// partial collection when a page comes back empty early or the row count
/// does not match the advertised total.
pub fn fetch_all<T, S>(source: &S, query: &PageQuery) -> Result<Vec<T>, Error>
where
    S: PageSource<T> + ?Sized,
{
    if query.page_size < 1 {
        return Err(Error::InvalidPageSize(query.page_size));
    }

    let mut rows = Vec::new();
    let mut page = 1;
    let expected = loop {
        let response = source.fetch_page(&query.clone().with_page(page))?;
        let paging = response.meta.paging;
        let received = response.data.len();
        rows.extend(response.data);

        tracing::debug!(page, total_pages = paging.total_pages, received, "fetched page");

        if page >= paging.total_pages {
            break paging.total_items;
        }
        if received == 0 {
            return Err(Error::EmptyPage {
                page,
                total_pages: paging.total_pages,
            });
        }
        page += 1;
    };

    if rows.len() as i64 != expected {
        return Err(Error::IncompletePages {
            expected,
            received: rows.len() as i64,
        });
    }

    Ok(rows)
}
