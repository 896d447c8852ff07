//! Search session: state machine, pagination and language aggregation.

pub mod controller;
pub mod languages;
pub mod paginator;
pub mod state;

pub use controller::{ControllerOptions, FetchMode, LoadMoreOutcome, ProfileController, SearchOutcome};
pub use languages::{aggregate, LanguageBreakdown, LanguageShare, LanguageTally};
pub use paginator::{PageRequest, Paginator, PaginatorState};
pub use state::{Phase, RegionStatus, RepositoryRegion, SessionSnapshot, SessionState, SessionTicket};
