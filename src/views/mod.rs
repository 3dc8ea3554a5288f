//! Views module - one pure function per dashboard tab
//!
//! Each view takes the current control values plus a reference to the table
//! it reads and returns something renderable. None of them hold state.

mod compare;
mod search;
mod share;
mod trend;

pub use compare::comparison;
pub use search::{
    search, SearchOutcome, SearchQuery, SearchRow, SearchTable, COLUMNS as SEARCH_COLUMNS,
    NO_DATA_MESSAGE,
};
pub use share::proportion;
pub use trend::{time_series, NO_SELECTION_TITLE};
