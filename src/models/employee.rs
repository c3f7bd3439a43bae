//! Employee model and rule-queryable attributes.
//!
//! This module defines the [`Employee`] struct and the [`AttributeValue`]
//! enum used by the rule applicability evaluator. Attribute access goes
//! through an explicit getter map instead of any reflection mechanism, so
//! the set of fields a rule condition can reference is closed and known at
//! compile time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A typed value produced by looking up an employee attribute.
///
/// Rule conditions compare these values against configured condition values;
/// the comparison semantics depend on the variant (see
/// [`crate::calculation::applicability`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    /// A textual attribute such as a department name.
    Text(String),
    /// A numeric attribute such as years of experience.
    Number(Decimal),
    /// A boolean attribute such as the active flag.
    Flag(bool),
}

/// An employee subject to payroll computation.
///
/// The engine references employees, it does not own them: the struct carries
/// the identity plus the wage-relevant attributes the rule evaluator may
/// query. It is immutable for the duration of one computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: Uuid,
    /// The human-facing badge id (e.g., "PEP0023").
    pub badge_id: String,
    /// The employee's display name.
    pub name: String,
    /// Whether the employee is currently active.
    pub is_active: bool,
    /// The department the employee works in.
    #[serde(default)]
    pub department: Option<String>,
    /// The employee's job position.
    #[serde(default)]
    pub job_position: Option<String>,
    /// The employee's gender, as recorded in the HR system.
    #[serde(default)]
    pub gender: Option<String>,
    /// Country of the employee's work location.
    #[serde(default)]
    pub country: Option<String>,
    /// State/region of the employee's work location.
    #[serde(default)]
    pub state: Option<String>,
    /// The employee's marital status.
    #[serde(default)]
    pub marital_status: Option<String>,
    /// Years of experience.
    #[serde(default)]
    pub experience_years: Option<Decimal>,
    /// Number of children, used by some statutory deduction rules.
    #[serde(default)]
    pub children: Option<u32>,
}

impl Employee {
    /// Looks up a rule-queryable attribute by field name.
    ///
    /// Returns `None` when the field name is unknown or the attribute is not
    /// recorded for this employee. The rule evaluator treats `None` as "rule
    /// not applicable" rather than an error.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{AttributeValue, Employee};
    /// use uuid::Uuid;
    ///
    /// let employee = Employee {
    ///     id: Uuid::new_v4(),
    ///     badge_id: "PEP0001".to_string(),
    ///     name: "Adam Luis".to_string(),
    ///     is_active: true,
    ///     department: Some("S/W Dept".to_string()),
    ///     job_position: None,
    ///     gender: None,
    ///     country: None,
    ///     state: None,
    ///     marital_status: None,
    ///     experience_years: None,
    ///     children: None,
    /// };
    /// assert_eq!(
    ///     employee.attribute("department"),
    ///     Some(AttributeValue::Text("S/W Dept".to_string()))
    /// );
    /// assert_eq!(employee.attribute("job_position"), None);
    /// assert_eq!(employee.attribute("shoe_size"), None);
    /// ```
    pub fn attribute(&self, field: &str) -> Option<AttributeValue> {
        match field {
            "badge_id" => Some(AttributeValue::Text(self.badge_id.clone())),
            "department" => self.department.clone().map(AttributeValue::Text),
            "job_position" => self.job_position.clone().map(AttributeValue::Text),
            "gender" => self.gender.clone().map(AttributeValue::Text),
            "country" => self.country.clone().map(AttributeValue::Text),
            "state" => self.state.clone().map(AttributeValue::Text),
            "marital_status" => self.marital_status.clone().map(AttributeValue::Text),
            "experience" => self.experience_years.map(AttributeValue::Number),
            "children" => self
                .children
                .map(|count| AttributeValue::Number(Decimal::from(count))),
            "is_active" => Some(AttributeValue::Flag(self.is_active)),
            _ => None,
        }
    }
}
