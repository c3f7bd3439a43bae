//! Pay breakdown models.
//!
//! This module contains the [`PayBreakdown`] type and its line items that
//! capture all outputs from a payslip computation: the pay figures, the
//! per-tier deduction lists, the allowance list and employer contributions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rules::PayComponent;

/// An allowance applied to an employee for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowanceLine {
    /// The id of the allowance rule that produced this line.
    pub rule_id: Uuid,
    /// The rule's display title.
    pub title: String,
    /// The computed amount.
    pub amount: Decimal,
}

/// A deduction applied to an employee for a period.
///
/// Lines are retained per tier so nothing is silently merged or dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// The id of the deduction rule that produced this line.
    pub rule_id: Uuid,
    /// The rule's display title.
    pub title: String,
    /// The computed amount.
    pub amount: Decimal,
}

/// An employer contribution computed for a deduction rule.
///
/// Contributions are reported for display and remittance; they are never
/// subtracted from the employee's net pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerContribution {
    /// The id of the deduction rule carrying the employer rate.
    pub rule_id: Uuid,
    /// The rule's display title.
    pub title: String,
    /// The base component the contribution rate was applied to.
    pub based_on: PayComponent,
    /// The computed contribution amount.
    pub amount: Decimal,
}

/// The fixed allowances carried on the contract.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContractAllowances {
    /// Housing allowance.
    pub housing: Decimal,
    /// Transport allowance.
    pub transport: Decimal,
    /// Other allowance.
    pub other: Decimal,
}

impl ContractAllowances {
    /// Sum of the three fixed allowances.
    pub fn total(&self) -> Decimal {
        self.housing + self.transport + self.other
    }
}

/// The complete result of one payslip computation.
///
/// Invariants (to two decimal places once rounded for persistence):
/// gross_pay = basic_pay + Σ allowances + fixed contract allowances − tier-2
/// deductions, and net_pay = gross_pay − tier-3 totals − federal tax −
/// loss-of-pay (unless folded into basic pay) − tier-4 deductions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayBreakdown {
    /// The contract wage the computation started from.
    pub contract_wage: Decimal,
    /// Basic pay after proration and tier-1 deductions.
    pub basic_pay: Decimal,
    /// Gross pay after allowances and tier-2 deductions.
    pub gross_pay: Decimal,
    /// Final net pay.
    pub net_pay: Decimal,
    /// Total of everything subtracted from gross pay (tier 3, federal tax,
    /// loss-of-pay when not folded, tier 4).
    pub total_deduction: Decimal,
    /// The loss-of-pay amount for the period, reported even when it was
    /// folded into basic pay.
    pub loss_of_pay: Decimal,
    /// True when the proration strategy already netted the loss-of-pay
    /// amount out of basic pay.
    pub lop_folded_into_basic: bool,
    /// The jurisdictional tax amount from the external tax collaborator.
    pub federal_tax: Decimal,
    /// Paid days in the period (half days count 0.5).
    pub paid_days: Decimal,
    /// Unpaid days in the period (half days count 0.5).
    pub unpaid_days: Decimal,
    /// Overtime hours recorded in the period (report-only).
    pub overtime_hours: Decimal,
    /// Dynamic allowances applied.
    pub allowances: Vec<AllowanceLine>,
    /// Fixed allowances from the contract.
    pub contract_allowances: ContractAllowances,
    /// Tier-1 deductions that reduced basic pay.
    pub basic_pay_deductions: Vec<DeductionLine>,
    /// Tier-2 deductions that reduced gross pay.
    pub gross_pay_deductions: Vec<DeductionLine>,
    /// Tier-3 pretax deductions.
    pub pretax_deductions: Vec<DeductionLine>,
    /// Tier-3 post-tax deductions.
    pub post_tax_deductions: Vec<DeductionLine>,
    /// Tier-3 tax deductions.
    pub tax_deductions: Vec<DeductionLine>,
    /// Tier-4 deductions that reduced net pay.
    pub net_pay_deductions: Vec<DeductionLine>,
    /// Employer contributions reported alongside the deductions.
    pub employer_contributions: Vec<EmployerContribution>,
}

fn sum(lines: &[DeductionLine]) -> Decimal {
    lines.iter().map(|line| line.amount).sum()
}

impl PayBreakdown {
    /// Sum of all dynamic allowance amounts.
    pub fn total_allowances(&self) -> Decimal {
        self.allowances.iter().map(|line| line.amount).sum()
    }

    /// Sum of the tier-3 deduction lists (pretax, post-tax and tax), without
    /// the federal tax amount.
    pub fn tier_three_total(&self) -> Decimal {
        sum(&self.pretax_deductions) + sum(&self.post_tax_deductions) + sum(&self.tax_deductions)
    }

    /// Sum of the tier-4 (net pay) deduction list.
    pub fn net_tier_total(&self) -> Decimal {
        sum(&self.net_pay_deductions)
    }

    /// Returns a copy with every currency figure rounded to two decimal
    /// places, ready for persistence.
    pub fn rounded(&self) -> PayBreakdown {
        let round_lines = |lines: &[DeductionLine]| {
            lines
                .iter()
                .map(|line| DeductionLine {
                    rule_id: line.rule_id,
                    title: line.title.clone(),
                    amount: line.amount.round_dp(2),
                })
                .collect()
        };
        PayBreakdown {
            contract_wage: self.contract_wage.round_dp(2),
            basic_pay: self.basic_pay.round_dp(2),
            gross_pay: self.gross_pay.round_dp(2),
            net_pay: self.net_pay.round_dp(2),
            total_deduction: self.total_deduction.round_dp(2),
            loss_of_pay: self.loss_of_pay.round_dp(2),
            lop_folded_into_basic: self.lop_folded_into_basic,
            federal_tax: self.federal_tax.round_dp(2),
            paid_days: self.paid_days,
            unpaid_days: self.unpaid_days,
            overtime_hours: self.overtime_hours,
            allowances: self
                .allowances
                .iter()
                .map(|line| AllowanceLine {
                    rule_id: line.rule_id,
                    title: line.title.clone(),
                    amount: line.amount.round_dp(2),
                })
                .collect(),
            contract_allowances: ContractAllowances {
                housing: self.contract_allowances.housing.round_dp(2),
                transport: self.contract_allowances.transport.round_dp(2),
                other: self.contract_allowances.other.round_dp(2),
            },
            basic_pay_deductions: round_lines(&self.basic_pay_deductions),
            gross_pay_deductions: round_lines(&self.gross_pay_deductions),
            pretax_deductions: round_lines(&self.pretax_deductions),
            post_tax_deductions: round_lines(&self.post_tax_deductions),
            tax_deductions: round_lines(&self.tax_deductions),
            net_pay_deductions: round_lines(&self.net_pay_deductions),
            employer_contributions: self
                .employer_contributions
                .iter()
                .map(|contribution| EmployerContribution {
                    rule_id: contribution.rule_id,
                    title: contribution.title.clone(),
                    based_on: contribution.based_on,
                    amount: contribution.amount.round_dp(2),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn line(title: &str, amount: &str) -> DeductionLine {
        DeductionLine {
            rule_id: Uuid::nil(),
            title: title.to_string(),
            amount: dec(amount),
        }
    }

    fn create_sample_breakdown() -> PayBreakdown {
        PayBreakdown {
            contract_wage: dec("3000"),
            basic_pay: dec("2800"),
            gross_pay: dec("2520"),
            net_pay: dec("2268"),
            total_deduction: dec("252"),
            loss_of_pay: dec("200"),
            lop_folded_into_basic: true,
            federal_tax: Decimal::ZERO,
            paid_days: dec("28"),
            unpaid_days: dec("2"),
            overtime_hours: Decimal::ZERO,
            allowances: vec![AllowanceLine {
                rule_id: Uuid::nil(),
                title: "Travel Allowance".to_string(),
                amount: dec("100.005"),
            }],
            contract_allowances: ContractAllowances::default(),
            basic_pay_deductions: vec![],
            gross_pay_deductions: vec![line("Union Fee", "280")],
            pretax_deductions: vec![line("Provident Fund", "126")],
            post_tax_deductions: vec![line("Canteen", "63")],
            tax_deductions: vec![line("Income Tax", "63")],
            net_pay_deductions: vec![],
            employer_contributions: vec![],
        }
    }

    /// BD-001: tier totals sum their lines
    #[test]
    fn test_tier_three_total() {
        let breakdown = create_sample_breakdown();
        assert_eq!(breakdown.tier_three_total(), dec("252"));
        assert_eq!(breakdown.net_tier_total(), Decimal::ZERO);
    }

    #[test]
    fn test_total_allowances() {
        let breakdown = create_sample_breakdown();
        assert_eq!(breakdown.total_allowances(), dec("100.005"));
    }

    /// BD-002: rounding touches every currency figure
    #[test]
    fn test_rounded_to_two_decimal_places() {
        let mut breakdown = create_sample_breakdown();
        breakdown.net_pay = dec("2268.0049");
        let rounded = breakdown.rounded();
        assert_eq!(rounded.net_pay, dec("2268.00"));
        assert_eq!(rounded.allowances[0].amount, dec("100.00"));
        // Day counts are not currency and stay untouched.
        assert_eq!(rounded.paid_days, dec("28"));
    }

    #[test]
    fn test_contract_allowances_total() {
        let fixed = ContractAllowances {
            housing: dec("250"),
            transport: dec("80"),
            other: dec("20"),
        };
        assert_eq!(fixed.total(), dec("350"));
    }

    #[test]
    fn test_serde_round_trip() {
        let breakdown = create_sample_breakdown();
        let json = serde_json::to_string(&breakdown).unwrap();
        let back: PayBreakdown = serde_json::from_str(&json).unwrap();
        assert_eq!(back, breakdown);
    }
}
