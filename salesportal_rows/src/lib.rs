//! Row shapes for the sales portal backend.
//!
//! Mirrors the hosted backend's table schema (`vendas`, `metas`,
//! `investimentos`, `usuarios`, `clientes`) and the paginated envelope it
//! returns. Nothing here validates business meaning; that happens in the
//! adapter of `salesportal_lib`.

mod errors;
mod query;
mod source;
pub mod types;

pub use self::errors::Error;
pub use self::query::{PageQuery, DEFAULT_PAGE_SIZE};
pub use self::source::{fetch_all, InMemorySource, PageSource, Scoped};
