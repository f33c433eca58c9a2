//! Budget form (draft) and its field validation

use chrono::NaiveDate;
use presupuestos_client::{parse_iso_date, Budget, BudgetRequest, BudgetStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

pub const NAME_REQUIRED: &str = "El nombre es requerido";
pub const AMOUNT_REQUIRED: &str = "El monto es requerido";
pub const AMOUNT_INVALID: &str = "El monto debe ser un número mayor a 0";
pub const AMOUNT_TOO_LARGE: &str = "El monto es demasiado grande";
pub const STATUS_INVALID: &str = "Selecciona un estado válido";
pub const DATE_REQUIRED: &str = "La fecha es requerida";
pub const DATE_INVALID: &str = "La fecha no es válida";

/// Form fields; the wire names double as HTML input names
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FormField {
    #[serde(rename = "nombre")]
    Name,
    #[serde(rename = "montoTotal")]
    Amount,
    #[serde(rename = "estado")]
    Status,
    #[serde(rename = "fecha")]
    Date,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "nombre",
            FormField::Amount => "montoTotal",
            FormField::Status => "estado",
            FormField::Date => "fecha",
        }
    }
}

impl std::str::FromStr for FormField {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nombre" => Ok(FormField::Name),
            "montoTotal" => Ok(FormField::Amount),
            "estado" => Ok(FormField::Status),
            "fecha" => Ok(FormField::Date),
            _ => Err(format!("Invalid form field: {}", s)),
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Field → message map; a missing key means the field is valid
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormErrors(BTreeMap<FormField, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    /// Drop the error for one field
    pub fn clear(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.iter().map(|(field, msg)| format!("{}: {}", field, msg)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Entry-time filter for the amount input: digits with at most one decimal point
pub fn amount_input_accepts(value: &str) -> bool {
    static AMOUNT_INPUT: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let pattern = AMOUNT_INPUT.get_or_init(|| regex::Regex::new(r"^[0-9]*\.?[0-9]*$").unwrap());
    value.is_empty() || pattern.is_match(value)
}

/// Parse amount text the way a numeric input would (`.5` and `5.` included)
fn parse_amount(raw: &str) -> Option<Decimal> {
    let mut text = raw.trim().to_string();
    if text.is_empty() || text == "." {
        return None;
    }
    if text.starts_with('.') {
        text.insert(0, '0');
    }
    if text.ends_with('.') {
        text.pop();
    }
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Well-formed decimal text that still failed to parse is out of `Decimal` range
fn is_digit_run(raw: &str) -> bool {
    let text = raw.trim();
    text.chars().any(|c| c.is_ascii_digit()) && amount_input_accepts(text)
}

/// The in-progress, not yet submitted form for one budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetForm {
    #[serde(rename = "nombre", default)]
    pub name: String,
    #[serde(rename = "montoTotal", default)]
    pub amount: String,
    #[serde(rename = "estado", default)]
    pub status: BudgetStatus,
    /// `YYYY-MM-DD`, as produced by a date input
    #[serde(rename = "fecha", default)]
    pub date: String,
}

impl BudgetForm {
    /// Empty form dated today
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            amount: String::new(),
            status: BudgetStatus::Pending,
            date: today.format("%Y-%m-%d").to_string(),
        }
    }

    /// Form prefilled from an existing budget
    pub fn from_budget(budget: &Budget, today: NaiveDate) -> Self {
        let status = match &budget.status {
            BudgetStatus::Unrecognized(_) => BudgetStatus::Pending,
            known => known.clone(),
        };
        Self {
            name: budget.name.clone(),
            amount: budget.total_amount.normalize().to_string(),
            status,
            date: budget.date_naive().unwrap_or(today).format("%Y-%m-%d").to_string(),
        }
    }

    /// Apply a user edit; returns false when the input was rejected
    ///
    /// Rejected amount characters and unknown status codes leave the
    /// form untouched.
    pub fn set_field(&mut self, field: FormField, value: &str) -> bool {
        match field {
            FormField::Name => self.name = value.to_string(),
            FormField::Amount => {
                if !amount_input_accepts(value) {
                    return false;
                }
                self.amount = value.to_string();
            }
            FormField::Status => match BudgetStatus::from_str(value) {
                Ok(status) => self.status = status,
                Err(_) => return false,
            },
            FormField::Date => self.date = value.to_string(),
        }
        true
    }

    /// Check every field
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();

        if self.name.trim().is_empty() {
            errors.insert(FormField::Name, NAME_REQUIRED);
        }

        if self.amount.trim().is_empty() {
            errors.insert(FormField::Amount, AMOUNT_REQUIRED);
        } else {
            match parse_amount(&self.amount) {
                Some(amount) if amount > Decimal::ZERO => {}
                None if is_digit_run(&self.amount) => errors.insert(FormField::Amount, AMOUNT_TOO_LARGE),
                _ => errors.insert(FormField::Amount, AMOUNT_INVALID),
            }
        }

        if matches!(self.status, BudgetStatus::Unrecognized(_)) {
            errors.insert(FormField::Status, STATUS_INVALID);
        }

        if self.date.trim().is_empty() {
            errors.insert(FormField::Date, DATE_REQUIRED);
        } else if parse_iso_date(&self.date).is_none() {
            errors.insert(FormField::Date, DATE_INVALID);
        }

        errors
    }

    /// Validate and convert into the API request body
    pub fn to_request(&self) -> Result<BudgetRequest, FormErrors> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        let total_amount = parse_amount(&self.amount).unwrap_or_default();
        Ok(BudgetRequest {
            name: self.name.trim().to_string(),
            total_amount,
            status: self.status.clone(),
            date: parse_iso_date(&self.date).map(BudgetRequest::timestamp_for),
        })
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn form(name: &str, amount: &str, date: &str) -> BudgetForm {
        BudgetForm {
            name: name.to_string(),
            amount: amount.to_string(),
            status: BudgetStatus::Pending,
            date: date.to_string(),
        }
    }

    #[test]
    fn test_empty_name_and_zero_amount() {
        let errors = form("", "0", "2024-01-01").validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(FormField::Name), Some(NAME_REQUIRED));
        assert_eq!(errors.get(FormField::Amount), Some(AMOUNT_INVALID));
        assert!(!errors.contains(FormField::Date));
    }

    #[test]
    fn test_valid_form() {
        let errors = form("Q1", "1500.50", "2024-01-01").validate();
        assert!(errors.is_empty());
    }

    #[test]
    fn test_name_is_trimmed() {
        let errors = form("   ", "10", "2024-01-01").validate();
        assert_eq!(errors.get(FormField::Name), Some(NAME_REQUIRED));

        let request = form("  Q1  ", "10", "2024-01-01").to_request().unwrap();
        assert_eq!(request.name, "Q1");
    }

    #[test]
    fn test_amount_rules() {
        assert_eq!(form("Q1", "", "2024-01-01").validate().get(FormField::Amount), Some(AMOUNT_REQUIRED));
        assert_eq!(form("Q1", "  ", "2024-01-01").validate().get(FormField::Amount), Some(AMOUNT_REQUIRED));
        assert_eq!(form("Q1", "abc", "2024-01-01").validate().get(FormField::Amount), Some(AMOUNT_INVALID));
        assert_eq!(form("Q1", "-5", "2024-01-01").validate().get(FormField::Amount), Some(AMOUNT_INVALID));
        assert_eq!(form("Q1", ".", "2024-01-01").validate().get(FormField::Amount), Some(AMOUNT_INVALID));
        assert!(form("Q1", ".5", "2024-01-01").validate().is_empty());
        assert!(form("Q1", "5.", "2024-01-01").validate().is_empty());
    }

    #[test]
    fn test_amount_beyond_decimal_range() {
        let huge = "9".repeat(40);
        assert_eq!(form("Q1", &huge, "2024-01-01").validate().get(FormField::Amount), Some(AMOUNT_TOO_LARGE));
        assert!(form("Q1", &huge, "2024-01-01").to_request().is_err());
        assert!(form("Q1", "79228162514264337593543950335", "2024-01-01").validate().is_empty());
    }

    #[test]
    fn test_date_rules() {
        assert_eq!(form("Q1", "1", "").validate().get(FormField::Date), Some(DATE_REQUIRED));
        assert_eq!(form("Q1", "1", "31/12/2024").validate().get(FormField::Date), Some(DATE_INVALID));
    }

    #[test]
    fn test_unrecognized_status_is_rejected() {
        let mut f = form("Q1", "1", "2024-01-01");
        f.status = BudgetStatus::Unrecognized("ARCHIVADO".to_string());
        assert_eq!(f.validate().get(FormField::Status), Some(STATUS_INVALID));
    }

    #[test]
    fn test_to_request() {
        let mut f = form("Q1", "1500.50", "2024-01-01");
        f.status = BudgetStatus::InReview;
        let request = f.to_request().unwrap();
        assert_eq!(request.total_amount, Decimal::from_str("1500.50").unwrap());
        assert_eq!(request.status, BudgetStatus::InReview);
        assert_eq!(request.date.as_deref(), Some("2024-01-01T00:00:00.000Z"));

        let errors = form("", "", "").to_request().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_amount_input_filter() {
        assert!(amount_input_accepts(""));
        assert!(amount_input_accepts("1500"));
        assert!(amount_input_accepts("1500."));
        assert!(amount_input_accepts("1500.50"));
        assert!(amount_input_accepts(".5"));
        assert!(!amount_input_accepts("1.2.3"));
        assert!(!amount_input_accepts("12a"));
        assert!(!amount_input_accepts("-1"));
        assert!(!amount_input_accepts("1,5"));
        assert!(!amount_input_accepts("١٢"));
    }

    #[test]
    fn test_set_field() {
        let mut f = BudgetForm::new(today());
        assert_eq!(f.date, "2024-06-01");
        assert_eq!(f.status, BudgetStatus::Pending);

        assert!(f.set_field(FormField::Amount, "12.5"));
        assert!(!f.set_field(FormField::Amount, "12.5x"));
        assert_eq!(f.amount, "12.5");

        assert!(f.set_field(FormField::Status, "APROBADO"));
        assert!(!f.set_field(FormField::Status, "BORRADOR"));
        assert_eq!(f.status, BudgetStatus::Approved);

        assert!(f.set_field(FormField::Name, "Viajes"));
        assert_eq!(f.name, "Viajes");
    }

    #[test]
    fn test_from_budget() {
        let budget = Budget {
            id: "b1".to_string(),
            name: "Marketing".to_string(),
            total_amount: Decimal::from_str("1500.50").unwrap(),
            status: BudgetStatus::Rejected,
            date: "2024-02-10T00:00:00Z".to_string(),
        };
        let f = BudgetForm::from_budget(&budget, today());
        assert_eq!(f.name, "Marketing");
        assert_eq!(f.amount, "1500.5");
        assert_eq!(f.status, BudgetStatus::Rejected);
        assert_eq!(f.date, "2024-02-10");

        let odd = Budget {
            status: BudgetStatus::Unrecognized("X".to_string()),
            date: "not a date".to_string(),
            ..budget
        };
        let f = BudgetForm::from_budget(&odd, today());
        assert_eq!(f.status, BudgetStatus::Pending);
        assert_eq!(f.date, "2024-06-01");
    }

    #[test]
    fn test_form_field_names() {
        for field in [FormField::Name, FormField::Amount, FormField::Status, FormField::Date] {
            assert_eq!(FormField::from_str(field.as_str()), Ok(field));
        }
        assert!(FormField::from_str("id").is_err());
    }

    #[test]
    fn test_form_decodes_html_names() {
        let f: BudgetForm = serde_json::from_value(serde_json::json!({
            "nombre": "Q1",
            "montoTotal": "10",
            "estado": "EN_REVISION",
            "fecha": "2024-01-01"
        }))
        .unwrap();
        assert_eq!(f.status, BudgetStatus::InReview);
        assert!(f.validate().is_empty());
    }
}
