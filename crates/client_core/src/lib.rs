//! Client-side core of the catering company directory: the loader behind the
//! [`CompanyDirectory`] seam, the view-state store and the display model that
//! every front end renders from.

pub mod card;
pub mod directory;
pub mod view_state;

pub use card::{format_created_on, CompanyCard, CountsSummary, ADDRESS_PLACEHOLDER};
pub use directory::{
    load_catering_companies, load_failure_message, CompanyDirectory, HttpCompanyDirectory,
    LoadError, LOAD_FAILURE_PREFIX,
};
pub use view_state::{
    filter_companies, CompanyViewState, LoadGeneration, LoadOutcome, LoadTicket, ViewPhase,
};
