//! The layered compensation pipeline.
//!
//! Applies matched deduction rules in four tiers, each feeding the next:
//!
//! 1. basic-pay deductions shrink the prorated basic pay;
//! 2. gross pay is assembled (basic + dynamic allowances + fixed contract
//!    allowances) and gross-pay deductions shrink it;
//! 3. pretax/post-tax/tax deductions are computed against basic or gross
//!    pay and reported without altering either, together with the federal
//!    tax amount from the external tax collaborator;
//! 4. net pay is derived and net-pay deductions shrink it.
//!
//! Every matched rule is retained as a line in the resulting breakdown;
//! deductions are never silently merged or discarded.

use rust_decimal::Decimal;

use crate::config::RuleCatalog;
use crate::models::{
    AllowanceLine, AmountMode, CompensationTarget, Contract, ContractAllowances, DeductionCategory,
    DeductionLine, DeductionRule, Employee, EmployerContribution, PayBreakdown, PayComponent,
    WagePeriod,
};

use super::applicability::{allowance_applies, deduction_applies};
use super::proration::ProrationResult;
use super::tax::{TaxInputs, TaxSource};

/// Resolves a rule's amount against its base.
fn rule_amount(mode: AmountMode, base: Decimal) -> Decimal {
    match mode {
        AmountMode::Fixed(amount) => amount,
        AmountMode::Rate(percent) => base * percent / Decimal::ONE_HUNDRED,
    }
}

fn line(rule: &DeductionRule, amount: Decimal) -> DeductionLine {
    DeductionLine {
        rule_id: rule.id,
        title: rule.title.clone(),
        amount,
    }
}

fn sum(lines: &[DeductionLine]) -> Decimal {
    lines.iter().map(|line| line.amount).sum()
}

/// Runs the full compensation pipeline for one employee and period.
///
/// `proration` supplies the starting basic pay; when its
/// `lop_folded_into_basic` flag is set, the loss-of-pay amount has already
/// reduced basic pay and is excluded from the net-pay subtraction.
pub fn compute_breakdown(
    employee: &Employee,
    contract: Option<&Contract>,
    contract_wage: Decimal,
    proration: &ProrationResult,
    catalog: &RuleCatalog,
    period: &WagePeriod,
    tax: &dyn TaxSource,
) -> PayBreakdown {
    let applicable: Vec<&DeductionRule> = catalog
        .deductions()
        .iter()
        .filter(|rule| deduction_applies(employee, rule, period))
        .collect();

    // Tier 1: rules that shrink basic pay. Rates are computed against the
    // original, pre-deduction basic pay.
    let original_basic = proration.basic_pay;
    let basic_pay_deductions: Vec<DeductionLine> = applicable
        .iter()
        .filter(|rule| rule.affects == Some(CompensationTarget::BasicPay))
        .map(|rule| line(rule, rule_amount(rule.mode, original_basic)))
        .collect();
    let basic_pay = original_basic - sum(&basic_pay_deductions);

    // Dynamic allowances, evaluated against the reduced basic pay.
    let allowances: Vec<AllowanceLine> = catalog
        .allowances()
        .iter()
        .filter(|rule| allowance_applies(employee, rule, basic_pay, period))
        .map(|rule| AllowanceLine {
            rule_id: rule.id,
            title: rule.title.clone(),
            amount: rule_amount(rule.mode, basic_pay),
        })
        .collect();
    let total_allowances: Decimal = allowances.iter().map(|line| line.amount).sum();

    let contract_allowances = contract
        .map(|contract| ContractAllowances {
            housing: contract.housing_allowance,
            transport: contract.transport_allowance,
            other: contract.other_allowance,
        })
        .unwrap_or_default();

    // Tier 2: gross assembly, then rules that shrink gross pay. Rates are
    // computed against the assembled, pre-deduction gross pay.
    let assembled_gross = basic_pay + total_allowances + contract_allowances.total();
    let gross_pay_deductions: Vec<DeductionLine> = applicable
        .iter()
        .filter(|rule| rule.affects == Some(CompensationTarget::GrossPay))
        .map(|rule| line(rule, rule_amount(rule.mode, assembled_gross)))
        .collect();
    let gross_pay = assembled_gross - sum(&gross_pay_deductions);

    // Tier 3: pretax/post-tax/tax deductions. These do not alter basic or
    // gross pay; their base follows each rule's based_on component.
    let tier_three_base = |rule: &DeductionRule| match rule.based_on {
        PayComponent::BasicPay => basic_pay,
        PayComponent::GrossPay => gross_pay,
    };
    let tier_three = |category: DeductionCategory| -> Vec<DeductionLine> {
        applicable
            .iter()
            .filter(|rule| rule.affects.is_none() && rule.category == category)
            .map(|rule| line(rule, rule_amount(rule.mode, tier_three_base(rule))))
            .collect()
    };
    let pretax_deductions = tier_three(DeductionCategory::Pretax);
    let post_tax_deductions = tier_three(DeductionCategory::PostTax);
    let tax_deductions = tier_three(DeductionCategory::Tax);

    let federal_tax = tax.taxable_amount(&TaxInputs {
        basic_pay,
        gross_pay,
        period_days: period.total_days(),
    });

    let loss_of_pay_amount = if proration.lop_folded_into_basic {
        Decimal::ZERO
    } else {
        proration.loss_of_pay
    };

    // Tier 4: net pay derivation, then rules that shrink net pay. Rates are
    // computed against the intermediate net pay.
    let tier_three_total =
        sum(&pretax_deductions) + sum(&post_tax_deductions) + sum(&tax_deductions);
    let intermediate_net = gross_pay - tier_three_total - federal_tax - loss_of_pay_amount;
    let net_pay_deductions: Vec<DeductionLine> = applicable
        .iter()
        .filter(|rule| rule.affects == Some(CompensationTarget::NetPay))
        .map(|rule| line(rule, rule_amount(rule.mode, intermediate_net)))
        .collect();
    let net_pay = intermediate_net - sum(&net_pay_deductions);

    // Employer contributions are computed independently against the rule's
    // based_on component and reported alongside, never subtracted.
    let employer_contributions: Vec<EmployerContribution> = applicable
        .iter()
        .filter_map(|rule| {
            rule.employer_rate.map(|rate| {
                let base = match rule.based_on {
                    PayComponent::BasicPay => basic_pay,
                    PayComponent::GrossPay => gross_pay,
                };
                EmployerContribution {
                    rule_id: rule.id,
                    title: rule.title.clone(),
                    based_on: rule.based_on,
                    amount: base * rate / Decimal::ONE_HUNDRED,
                }
            })
        })
        .collect();

    let total_deduction =
        tier_three_total + federal_tax + sum(&net_pay_deductions) + loss_of_pay_amount;

    PayBreakdown {
        contract_wage,
        basic_pay,
        gross_pay,
        net_pay,
        total_deduction,
        loss_of_pay: proration.loss_of_pay,
        lop_folded_into_basic: proration.lop_folded_into_basic,
        federal_tax,
        paid_days: proration.paid_days,
        unpaid_days: proration.unpaid_days,
        overtime_hours: proration.overtime_hours,
        allowances,
        contract_allowances,
        basic_pay_deductions,
        gross_pay_deductions,
        pretax_deductions,
        post_tax_deductions,
        tax_deductions,
        net_pay_deductions,
        employer_contributions,
    }
}
