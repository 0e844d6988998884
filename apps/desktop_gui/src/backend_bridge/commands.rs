//! Backend commands queued from UI to backend worker.

use client_core::LoadTicket;

#[derive(Debug)]
pub enum BackendCommand {
    LoadCompanies { ticket: LoadTicket },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadCompanies { .. } => "load_companies",
        }
    }
}
