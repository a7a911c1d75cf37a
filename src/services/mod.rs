//! Business logic services

pub mod overdue;
pub mod sanctions;

use std::sync::Arc;

use crate::{source::LoanSource, store::SanctionStore};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub overdue: overdue::OverdueService,
    pub sanctions: sanctions::SanctionsService,
}

impl Services {
    /// Create all services with the given collaborators
    pub fn new(source: Arc<dyn LoanSource>, store: Arc<dyn SanctionStore>) -> Self {
        Self {
            overdue: overdue::OverdueService::new(source),
            sanctions: sanctions::SanctionsService::new(store),
        }
    }
}
