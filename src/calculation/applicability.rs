//! Rule applicability evaluation.
//!
//! Decides whether a configured allowance or deduction rule applies to an
//! employee: scope membership first, then the conjunctive condition set,
//! then (for allowances) the gating condition. Every comparison goes
//! through the closed [`ComparisonOp`] enum; a failed attribute lookup
//! makes the rule inapplicable and never propagates as an error.

use rust_decimal::Decimal;

use crate::models::{
    AllowanceRule, AttributeValue, ComparisonOp, Condition, DeductionRule, Employee, PayComponent,
    RuleScope, WagePeriod,
};

/// Normalizes configured text for comparison: trimmed, lowercased, spaces
/// collapsed to underscores.
fn normalize(value: &str) -> String {
    value.trim().to_lowercase().replace(' ', "_")
}

fn compare_ordered<T: PartialOrd>(op: ComparisonOp, left: &T, right: &T) -> bool {
    match op {
        ComparisonOp::Equal => left == right,
        ComparisonOp::NotEqual => left != right,
        ComparisonOp::LessThan => left < right,
        ComparisonOp::GreaterThan => left > right,
        ComparisonOp::LessThanOrEqual => left <= right,
        ComparisonOp::GreaterThanOrEqual => left >= right,
        // Contains is textual; Range is reserved and never matches.
        ComparisonOp::Contains | ComparisonOp::Range => false,
    }
}

/// Compares an attribute value against a configured condition value.
///
/// The configured value is coerced to the attribute's type; a failed
/// coercion means no match. Text ordering is lexicographic over the
/// normalized strings.
pub fn compare(op: ComparisonOp, attribute: &AttributeValue, configured: &str) -> bool {
    match attribute {
        AttributeValue::Number(number) => match configured.trim().parse::<Decimal>() {
            Ok(value) => compare_ordered(op, number, &value),
            Err(_) => false,
        },
        AttributeValue::Flag(flag) => {
            let value = match normalize(configured).as_str() {
                "true" | "yes" | "1" => true,
                "false" | "no" | "0" => false,
                _ => return false,
            };
            match op {
                ComparisonOp::Equal => *flag == value,
                ComparisonOp::NotEqual => *flag != value,
                _ => false,
            }
        }
        AttributeValue::Text(text) => {
            let left = normalize(text);
            let right = normalize(configured);
            match op {
                ComparisonOp::Contains => left.contains(&right),
                _ => compare_ordered(op, &left, &right),
            }
        }
    }
}

/// Checks whether an employee is in a rule's scope.
///
/// An employee is in scope when explicitly listed, or when the rule is
/// condition-based or applies to all active employees and the employee is
/// not excluded.
pub fn is_in_scope(employee: &Employee, scope: &RuleScope) -> bool {
    if scope.specific_employees.contains(&employee.id) {
        return true;
    }
    if scope.exclude_employees.contains(&employee.id) {
        return false;
    }
    if scope.is_condition_based {
        return true;
    }
    scope.include_active_employees && employee.is_active
}

/// Evaluates a conjunctive condition set against an employee.
///
/// Every condition must hold; an absent attribute fails the condition it
/// appears in, which fails the whole set.
pub fn conditions_hold(employee: &Employee, conditions: &[Condition]) -> bool {
    conditions.iter().all(|condition| {
        match employee.attribute(&condition.field) {
            Some(value) => compare(condition.operator, &value, &condition.value),
            None => false,
        }
    })
}

fn one_time_date_in_period(one_time_date: Option<chrono::NaiveDate>, period: &WagePeriod) -> bool {
    match one_time_date {
        Some(date) => period.contains_date(date),
        None => true,
    }
}

/// Decides whether an allowance rule applies to an employee for a period,
/// given the basic pay the gating condition may reference.
///
/// The gate is evaluated before gross pay exists, so a gate with a
/// gross-pay basis compares zero against its threshold.
pub fn allowance_applies(
    employee: &Employee,
    rule: &AllowanceRule,
    basic_pay: Decimal,
    period: &WagePeriod,
) -> bool {
    if !one_time_date_in_period(rule.one_time_date, period) {
        return false;
    }
    if !is_in_scope(employee, &rule.scope) {
        return false;
    }
    if rule.scope.is_condition_based && !conditions_hold(employee, &rule.conditions) {
        return false;
    }
    match &rule.gate {
        Some(gate) => {
            let subject = match gate.basis {
                PayComponent::BasicPay => basic_pay,
                PayComponent::GrossPay => Decimal::ZERO,
            };
            compare_ordered(gate.operator, &subject, &gate.amount)
        }
        None => true,
    }
}

/// Decides whether a deduction rule applies to an employee for a period.
pub fn deduction_applies(
    employee: &Employee,
    rule: &DeductionRule,
    period: &WagePeriod,
) -> bool {
    if !one_time_date_in_period(rule.one_time_date, period) {
        return false;
    }
    if !is_in_scope(employee, &rule.scope) {
        return false;
    }
    if rule.scope.is_condition_based && !conditions_hold(employee, &rule.conditions) {
        return false;
    }
    true
}
