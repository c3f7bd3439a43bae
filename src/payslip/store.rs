//! In-memory payslip persistence.
//!
//! Payslips are stored keyed by (employee, start_date, end_date). Writing a
//! payslip for a key that already exists overwrites the stored fields but
//! keeps the original record id, making recomputation idempotent at the
//! identity level.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{Payslip, PayslipKey};

/// An in-memory payslip store.
///
/// The store itself does no locking; the API layer wraps it in a mutex so
/// concurrent generations for the same key serialize at the persist step.
#[derive(Debug, Default)]
pub struct PayslipStore {
    slips: HashMap<PayslipKey, Payslip>,
}

impl PayslipStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites the payslip stored under its key.
    ///
    /// When a record already exists for the key its id is retained, so the
    /// identity of a payslip survives recomputation. Returns the stored
    /// record's id.
    pub fn upsert(&mut self, mut payslip: Payslip) -> Uuid {
        let key = payslip.key();
        if let Some(existing) = self.slips.get(&key) {
            payslip.id = existing.id;
        }
        let id = payslip.id;
        self.slips.insert(key, payslip);
        id
    }

    /// Fetches the payslip stored under a key.
    pub fn get(&self, key: &PayslipKey) -> Option<&Payslip> {
        self.slips.get(key)
    }

    /// Number of stored payslips.
    pub fn len(&self) -> usize {
        self.slips.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.slips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ContractAllowances, PayBreakdown, PayslipStatus, WagePeriod,
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn empty_breakdown() -> PayBreakdown {
        PayBreakdown {
            contract_wage: Decimal::ZERO,
            basic_pay: Decimal::ZERO,
            gross_pay: Decimal::ZERO,
            net_pay: Decimal::ZERO,
            total_deduction: Decimal::ZERO,
            loss_of_pay: Decimal::ZERO,
            lop_folded_into_basic: false,
            federal_tax: Decimal::ZERO,
            paid_days: Decimal::ZERO,
            unpaid_days: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            allowances: vec![],
            contract_allowances: ContractAllowances::default(),
            basic_pay_deductions: vec![],
            gross_pay_deductions: vec![],
            pretax_deductions: vec![],
            post_tax_deductions: vec![],
            tax_deductions: vec![],
            net_pay_deductions: vec![],
            employer_contributions: vec![],
        }
    }

    fn payslip_for(employee_id: Uuid, net_pay: Decimal) -> Payslip {
        let period = WagePeriod::new(date(2026, 1, 1), date(2026, 1, 31)).unwrap();
        Payslip {
            id: Uuid::new_v4(),
            employee_id,
            start_date: period.start_date,
            end_date: period.end_date,
            status: PayslipStatus::Draft,
            group_name: None,
            contract_wage: Decimal::ZERO,
            basic_pay: Decimal::ZERO,
            gross_pay: Decimal::ZERO,
            net_pay,
            total_deduction: Decimal::ZERO,
            breakdown: empty_breakdown(),
        }
    }

    /// PS-001: upsert for the same key keeps one record and its id
    #[test]
    fn test_upsert_is_idempotent() {
        let mut store = PayslipStore::new();
        let employee = Uuid::from_u128(7);

        let first_id = store.upsert(payslip_for(employee, Decimal::from(100)));
        let second_id = store.upsert(payslip_for(employee, Decimal::from(200)));

        assert_eq!(store.len(), 1);
        assert_eq!(first_id, second_id);
        let key = PayslipKey {
            employee_id: employee,
            start_date: date(2026, 1, 1),
            end_date: date(2026, 1, 31),
        };
        let stored = store.get(&key).unwrap();
        assert_eq!(stored.net_pay, Decimal::from(200));
        assert_eq!(stored.id, first_id);
    }

    /// PS-002: different employees get separate records
    #[test]
    fn test_different_employees_separate_records() {
        let mut store = PayslipStore::new();
        store.upsert(payslip_for(Uuid::from_u128(1), Decimal::from(100)));
        store.upsert(payslip_for(Uuid::from_u128(2), Decimal::from(100)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_get_missing_key() {
        let store = PayslipStore::new();
        let key = PayslipKey {
            employee_id: Uuid::from_u128(9),
            start_date: date(2026, 1, 1),
            end_date: date(2026, 1, 31),
        };
        assert!(store.get(&key).is_none());
        assert!(store.is_empty());
    }
}
