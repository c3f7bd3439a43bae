//! Configuration loading and validation for the payroll engine.
//!
//! Configuration supplies the two catalogs the computation consumes: the
//! company working-day calendar and the allowance/deduction rules.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AllowancesConfig, CatalogWarning, CompanyCalendar, CompanyCalendarConfig, DeductionsConfig,
    Holiday, RuleCatalog,
};
