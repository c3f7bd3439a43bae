//! The jurisdictional tax collaborator seam.
//!
//! The engine does not model tax law. A [`TaxSource`] supplies the federal
//! tax amount for a period as an opaque figure; the pipeline adds it to the
//! tier-three deduction totals.

use rust_decimal::Decimal;

/// The inputs a tax collaborator may consider.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxInputs {
    /// Basic pay after tier-1 deductions.
    pub basic_pay: Decimal,
    /// Gross pay after tier-2 deductions.
    pub gross_pay: Decimal,
    /// Total calendar days in the period.
    pub period_days: u32,
}

/// Computes the jurisdictional tax amount for a period.
///
/// Implementations are external collaborators; the engine treats the
/// returned amount as opaque.
pub trait TaxSource {
    /// Returns the tax amount to withhold for the period.
    fn taxable_amount(&self, inputs: &TaxInputs) -> Decimal;
}

/// A tax source that withholds nothing. The default when no jurisdictional
/// collaborator is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTax;

impl TaxSource for NoTax {
    fn taxable_amount(&self, _inputs: &TaxInputs) -> Decimal {
        Decimal::ZERO
    }
}

/// A flat-rate tax source, mainly useful in tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct FlatRateTax {
    /// The percentage of gross pay to withhold.
    pub percent: Decimal,
}

impl TaxSource for FlatRateTax {
    fn taxable_amount(&self, inputs: &TaxInputs) -> Decimal {
        inputs.gross_pay * self.percent / Decimal::ONE_HUNDRED
    }
}
