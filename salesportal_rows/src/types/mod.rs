mod amount;
pub use self::amount::RawAmount;

mod dates;
pub use self::dates::parse_row_date;

mod meta;
pub use self::meta::{Meta, PaginatedResponse, Paging};

mod sale;
pub use self::sale::SaleRow;

mod target;
pub use self::target::TargetRow;

mod investment;
pub use self::investment::{InvestmentRow, InvestmentStatus};

mod roster;
pub use self::roster::{ClientRow, UserRow};

mod snapshot;
pub use self::snapshot::Snapshot;
