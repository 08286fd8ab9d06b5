//! Shared domain types for roster.
//!
//! Everything here is plain data: records decoded from the remote source, the
//! page window that addresses a slice of the remote collection, and the small
//! enums the UI layers agree on.

pub mod load;
pub mod page;
pub mod theme;
pub mod user;

pub use load::LoadState;
pub use page::{PageResponse, PageWindow, PageWindowError};
pub use theme::ThemeMode;
pub use user::{
    Address, Bank, Company, Coordinates, Crypto, Hair, RecordId, RecordIdError, User,
};

/// Page sizes offered by the table footer.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

/// Page size used until the user picks another one.
pub const DEFAULT_PAGE_SIZE: usize = 10;
