//! Employee records and validated create input.
//!
//! [`Employee`] mirrors what the upstream directory reports and is never
//! altered by the facade. [`EmployeeCreateRequest`] is the raw caller input;
//! converting it into a [`NewEmployee`] applies the create rules in a fixed
//! order and stops at the first violation.

use std::fmt;

use uuid::Uuid;

/// Youngest age accepted when creating an employee.
pub const MIN_AGE: i32 = 16;
/// Oldest age accepted when creating an employee.
pub const MAX_AGE: i32 = 75;

/// Employee record as reported by the upstream directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Upstream-assigned opaque identifier.
    pub id: String,
    /// Display name; also the key used by the upstream delete call.
    pub name: String,
    /// Salary as reported upstream.
    pub salary: i64,
    /// Age as reported upstream.
    pub age: i32,
    /// Job title.
    pub title: String,
    /// Contact email.
    pub email: String,
}

/// Unvalidated input for creating an employee.
///
/// Every field is optional so that absent values reach the validation rules
/// instead of failing during decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeCreateRequest {
    /// Candidate identifier; forwarded but not relied upon upstream.
    pub id: Option<Uuid>,
    /// Required, non-blank.
    pub name: Option<String>,
    /// Required, greater than zero.
    pub salary: Option<i64>,
    /// Required, within [`MIN_AGE`]..=[`MAX_AGE`].
    pub age: Option<i32>,
    /// Required, non-blank.
    pub title: Option<String>,
    /// Optional contact email.
    pub email: Option<String>,
}

/// Validation errors returned when converting an [`EmployeeCreateRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    /// Name was missing or only whitespace.
    BlankName,
    /// Salary was missing, zero or negative.
    NonPositiveSalary,
    /// Age was missing or outside the accepted range.
    AgeOutOfRange {
        /// Youngest accepted age.
        min: i32,
        /// Oldest accepted age.
        max: i32,
    },
    /// Title was missing or only whitespace.
    BlankTitle,
}

impl EmployeeValidationError {
    /// Request field the violation refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::BlankName => "name",
            Self::NonPositiveSalary => "salary",
            Self::AgeOutOfRange { .. } => "age",
            Self::BlankTitle => "title",
        }
    }

    /// Stable machine-readable code for the violation.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BlankName => "blank_name",
            Self::NonPositiveSalary => "non_positive_salary",
            Self::AgeOutOfRange { .. } => "age_out_of_range",
            Self::BlankTitle => "blank_title",
        }
    }
}

impl fmt::Display for EmployeeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankName => write!(f, "employee name must not be blank"),
            Self::NonPositiveSalary => write!(f, "employee salary must be greater than zero"),
            Self::AgeOutOfRange { min, max } => {
                write!(f, "employee age must be between {min} and {max}")
            }
            Self::BlankTitle => write!(f, "employee title must not be blank"),
        }
    }
}

impl std::error::Error for EmployeeValidationError {}

/// Create input that passed validation and may be sent upstream.
///
/// # Examples
/// ```
/// use employee_directory::domain::{EmployeeCreateRequest, NewEmployee};
///
/// let request = EmployeeCreateRequest {
///     name: Some("Ada".into()),
///     salary: Some(90_000),
///     age: Some(36),
///     title: Some("Engineer".into()),
///     ..EmployeeCreateRequest::default()
/// };
/// let employee = NewEmployee::try_from(request).expect("valid request");
/// assert_eq!(employee.name(), "Ada");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    id: Option<Uuid>,
    name: String,
    salary: i64,
    age: i32,
    title: String,
    email: Option<String>,
}

impl NewEmployee {
    /// Candidate identifier supplied by the caller, if any.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Non-blank display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Salary, always greater than zero.
    pub fn salary(&self) -> i64 {
        self.salary
    }

    /// Age within [`MIN_AGE`]..=[`MAX_AGE`].
    pub fn age(&self) -> i32 {
        self.age
    }

    /// Non-blank job title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Contact email, if supplied.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

impl TryFrom<EmployeeCreateRequest> for NewEmployee {
    type Error = EmployeeValidationError;

    fn try_from(value: EmployeeCreateRequest) -> Result<Self, Self::Error> {
        let EmployeeCreateRequest {
            id,
            name,
            salary,
            age,
            title,
            email,
        } = value;

        let name = non_blank(name).ok_or(EmployeeValidationError::BlankName)?;
        let salary = salary
            .filter(|amount| *amount > 0)
            .ok_or(EmployeeValidationError::NonPositiveSalary)?;
        let age = age
            .filter(|years| (MIN_AGE..=MAX_AGE).contains(years))
            .ok_or(EmployeeValidationError::AgeOutOfRange {
                min: MIN_AGE,
                max: MAX_AGE,
            })?;
        let title = non_blank(title).ok_or(EmployeeValidationError::BlankTitle)?;

        Ok(Self {
            id,
            name,
            salary,
            age,
            title,
            email,
        })
    }
}
