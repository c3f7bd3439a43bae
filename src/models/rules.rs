//! Allowance and deduction rule models.
//!
//! Rules are configured once (see [`crate::config`]) and evaluated per
//! employee per period by [`crate::calculation::applicability`]. Comparison
//! operators form a closed enum mapped to typed comparison functions rather
//! than any string-based dispatch.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A comparison operator usable in rule conditions.
///
/// `Range` is intentionally unimplemented: it never matches, and the config
/// loader emits a validation warning for any rule that uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    /// Values are equal.
    Equal,
    /// Values differ.
    NotEqual,
    /// Attribute is strictly less than the condition value.
    LessThan,
    /// Attribute is strictly greater than the condition value.
    GreaterThan,
    /// Attribute is less than or equal to the condition value.
    LessThanOrEqual,
    /// Attribute is greater than or equal to the condition value.
    GreaterThanOrEqual,
    /// Textual attribute contains the condition value.
    Contains,
    /// Reserved operator that never matches.
    Range,
}

/// A single field/operator/value condition.
///
/// All conditions on a rule are conjunctive: every one must hold for the
/// rule to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// The employee attribute the condition reads (see
    /// [`crate::models::Employee::attribute`]).
    pub field: String,
    /// The comparison operator.
    pub operator: ComparisonOp,
    /// The configured comparison value, coerced to the attribute's type at
    /// evaluation time.
    pub value: String,
}

/// Who a rule applies to, before conditions are evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleScope {
    /// Employees the rule is explicitly assigned to.
    #[serde(default)]
    pub specific_employees: Vec<Uuid>,
    /// Employees the rule never applies to, regardless of conditions.
    #[serde(default)]
    pub exclude_employees: Vec<Uuid>,
    /// When true the rule applies to every active employee not excluded.
    #[serde(default)]
    pub include_active_employees: bool,
    /// When true the rule applies to any non-excluded employee whose
    /// attributes satisfy the condition set.
    #[serde(default)]
    pub is_condition_based: bool,
}

/// How a rule's amount is determined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountMode {
    /// A fixed currency amount.
    Fixed(Decimal),
    /// A percentage of the rule's base amount.
    Rate(Decimal),
}

/// The intermediate amount a rate is computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayComponent {
    /// The (possibly already reduced) basic pay.
    #[default]
    BasicPay,
    /// The assembled gross pay.
    GrossPay,
}

/// The intermediate amount a deduction reduces.
///
/// A deduction without this tag does not alter any pay component; it is a
/// pretax/post-tax/tax deduction reported in tier three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensationTarget {
    /// Tier one: shrinks basic pay before gross assembly.
    BasicPay,
    /// Tier two: shrinks gross pay after allowances are added.
    GrossPay,
    /// Tier four: shrinks the final net pay.
    NetPay,
}

/// The reporting category of an untagged (tier-three) deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionCategory {
    /// Deducted before tax is assessed.
    Pretax,
    /// Deducted after tax is assessed.
    #[default]
    PostTax,
    /// A tax deduction itself.
    Tax,
}

/// The gating condition an allowance carries in addition to its condition
/// set, e.g. "only if basic_pay > 5000".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowanceGate {
    /// The intermediate amount the gate reads. Gates are evaluated before
    /// gross pay exists, so a `GrossPay` basis compares zero.
    pub basis: PayComponent,
    /// The comparison operator.
    pub operator: ComparisonOp,
    /// The threshold amount.
    pub amount: Decimal,
}

/// A configured allowance rule.
///
/// Rate-mode allowances are a percentage of basic pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllowanceRule {
    /// Unique identifier of the rule.
    pub id: Uuid,
    /// Display title, e.g. "Travel Allowance".
    pub title: String,
    /// Fixed amount or rate over basic pay.
    pub mode: AmountMode,
    /// Who the rule applies to.
    #[serde(default)]
    pub scope: RuleScope,
    /// Conjunctive conditions, evaluated when the scope is condition-based.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Additional gating condition over basic pay.
    #[serde(default)]
    pub gate: Option<AllowanceGate>,
    /// When set, the rule only applies to periods containing this date.
    #[serde(default)]
    pub one_time_date: Option<NaiveDate>,
}

/// A configured deduction rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionRule {
    /// Unique identifier of the rule.
    pub id: Uuid,
    /// Display title, e.g. "Provident Fund".
    pub title: String,
    /// Fixed amount or rate over `based_on`.
    pub mode: AmountMode,
    /// Which intermediate amount the deduction reduces; `None` places it in
    /// the pretax/post-tax/tax tier.
    #[serde(default)]
    pub affects: Option<CompensationTarget>,
    /// The base a rate (and any employer contribution) is computed against.
    /// Ignored for `affects = gross_pay`/`net_pay` rules, whose rates use
    /// the amount they reduce.
    #[serde(default)]
    pub based_on: PayComponent,
    /// Reporting category when the deduction is untagged.
    #[serde(default)]
    pub category: DeductionCategory,
    /// Employer contribution percentage, computed against `based_on` and
    /// reported alongside without reducing employee pay.
    #[serde(default)]
    pub employer_rate: Option<Decimal>,
    /// Who the rule applies to.
    #[serde(default)]
    pub scope: RuleScope,
    /// Conjunctive conditions, evaluated when the scope is condition-based.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// When set, the rule only applies to periods containing this date.
    #[serde(default)]
    pub one_time_date: Option<NaiveDate>,
}
