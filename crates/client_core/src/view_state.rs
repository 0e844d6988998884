//! View-state store for the catering directory.
//!
//! Every load is stamped with a [`LoadGeneration`]. Results are applied only
//! when their generation is still the current one, so a slow response for an
//! old context can never overwrite the list of a newer one.

use shared::{
    domain::{CompanyId, ContextId},
    protocol::Company,
};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadGeneration(pub u64);

impl LoadGeneration {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: LoadGeneration,
    pub context: ContextId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Loading,
    EmptyNoData,
    EmptyNoMatch,
    HasResults,
}

impl ViewPhase {
    pub fn message(self) -> Option<&'static str> {
        match self {
            ViewPhase::Loading => Some("Loading catering companies..."),
            ViewPhase::EmptyNoData => Some("No catering companies exist yet."),
            ViewPhase::EmptyNoMatch => Some("No companies match this search."),
            ViewPhase::HasResults => None,
        }
    }
}

/// Companies whose name contains `term`, case-insensitively, in list order.
pub fn filter_companies<'a>(companies: &'a [Company], term: &str) -> Vec<&'a Company> {
    if term.is_empty() {
        return companies.iter().collect();
    }
    let needle = term.to_lowercase();
    companies
        .iter()
        .filter(|company| company.name.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, Clone)]
pub struct CompanyViewState {
    loading: bool,
    error: Option<String>,
    companies: Vec<Company>,
    search: String,
    selected: Option<CompanyId>,
    dialog_open: bool,
    context: Option<ContextId>,
    generation: LoadGeneration,
}

impl Default for CompanyViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyViewState {
    pub fn new() -> Self {
        Self {
            loading: true,
            error: None,
            companies: Vec::new(),
            search: String::new(),
            selected: None,
            dialog_open: false,
            context: None,
            generation: LoadGeneration::default(),
        }
    }

    /// Starts a load when `context` differs from the one currently shown,
    /// including the very first call.
    pub fn sync_context(&mut self, context: &ContextId) -> Option<LoadTicket> {
        if self.context.as_ref() == Some(context) {
            return None;
        }
        Some(self.begin_load(context.clone()))
    }

    pub fn begin_load(&mut self, context: ContextId) -> LoadTicket {
        self.generation = self.generation.next();
        self.loading = true;
        self.error = None;
        self.context = Some(context.clone());
        LoadTicket {
            generation: self.generation,
            context,
        }
    }

    pub fn complete_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<Company>, String>,
    ) -> LoadOutcome {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation.0,
                current = self.generation.0,
                context = %ticket.context,
                "dropping stale company load"
            );
            return LoadOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(companies) => self.companies = companies,
            Err(message) => self.error = Some(message),
        }
        LoadOutcome::Applied
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn context(&self) -> Option<&ContextId> {
        self.context.as_ref()
    }

    pub fn search_mut(&mut self) -> &mut String {
        &mut self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn visible_companies(&self) -> Vec<&Company> {
        filter_companies(&self.companies, &self.search)
    }

    pub fn phase(&self) -> ViewPhase {
        if self.loading {
            ViewPhase::Loading
        } else if self.companies.is_empty() {
            ViewPhase::EmptyNoData
        } else if self.visible_companies().is_empty() {
            ViewPhase::EmptyNoMatch
        } else {
            ViewPhase::HasResults
        }
    }

    /// Opens the detail dialog for a company of the current list.
    pub fn open_details(&mut self, id: &CompanyId) -> bool {
        if !self.companies.iter().any(|company| &company.id == id) {
            return false;
        }
        self.selected = Some(id.clone());
        self.dialog_open = true;
        true
    }

    pub fn close_details(&mut self) {
        self.dialog_open = false;
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn selected_id(&self) -> Option<&CompanyId> {
        self.selected.as_ref()
    }

    /// The selection resolved against the latest list.
    pub fn selected_company(&self) -> Option<&Company> {
        let id = self.selected.as_ref()?;
        self.companies.iter().find(|company| &company.id == id)
    }

    pub fn dialog_company(&self) -> Option<&Company> {
        if !self.dialog_open {
            return None;
        }
        self.selected_company()
    }
}

#[cfg(test)]
#[path = "tests/view_state_tests.rs"]
mod tests;
