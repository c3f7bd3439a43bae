//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::{Arc, Mutex};

use crate::calculation::{NoTax, TaxSource};
use crate::config::ConfigLoader;
use crate::payslip::PayslipStore;

/// Shared application state.
///
/// Contains the loaded configuration, the payslip store and the tax
/// collaborator. The store sits behind a mutex so concurrent generations
/// targeting the same (employee, period) key serialize at the persist step.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<Mutex<PayslipStore>>,
    tax: Arc<dyn TaxSource + Send + Sync>,
}

impl AppState {
    /// Creates application state with the given configuration and no tax
    /// collaborator wired in.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_tax(config, NoTax)
    }

    /// Creates application state with a specific tax collaborator.
    pub fn with_tax<T: TaxSource + Send + Sync + 'static>(config: ConfigLoader, tax: T) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(Mutex::new(PayslipStore::new())),
            tax: Arc::new(tax),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the payslip store handle.
    pub fn store(&self) -> &Mutex<PayslipStore> {
        &self.store
    }

    /// Returns the tax collaborator.
    pub fn tax(&self) -> &(dyn TaxSource + Send + Sync) {
        self.tax.as_ref()
    }
}
