//! Data models for Circulade

pub mod loan;
pub mod overdue;
pub mod sanction;

// Re-export commonly used types
pub use loan::LoanRecord;
pub use overdue::{BorrowerOverdueSummary, OverdueFilter};
pub use sanction::Sanction;
