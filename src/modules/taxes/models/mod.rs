mod tax;

pub use tax::{OwnershipRank, TaxAssessment, TaxCalculationRequest, TaxSchedule};
