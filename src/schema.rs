//! Expected output schema and column role resolution.

use crate::types::Role;
use once_cell::sync::Lazy;
use regex::Regex;

/// Accepted column names per role, in priority order.
const DATE_NAMES: &[&str] = &["Date", "Txn Date", "Transaction Date"];
const DESCRIPTION_NAMES: &[&str] = &["Description", "Narration", "Details"];
const DEBIT_NAMES: &[&str] = &["Debit Amt", "Debit", "Withdrawal", "Dr"];
const CREDIT_NAMES: &[&str] = &["Credit Amt", "Credit", "Deposit", "Cr"];
const AMOUNT_NAMES: &[&str] = &["Amount", "Amt"];
const BALANCE_NAMES: &[&str] = &["Balance", "Closing Balance", "Bal"];

/// Synonyms checked for a role.
pub fn synonyms(role: Role) -> &'static [&'static str] {
    match role {
        Role::Date => DATE_NAMES,
        Role::Description => DESCRIPTION_NAMES,
        Role::Debit => DEBIT_NAMES,
        Role::Credit => CREDIT_NAMES,
        Role::Amount => AMOUNT_NAMES,
        Role::Balance => BALANCE_NAMES,
    }
}

/// Ordered list of column names a bank's output must have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedSchema {
    columns: Vec<String>,
}

impl ExpectedSchema {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Resolve every role against this schema.
    pub fn resolve_roles(&self) -> ColumnRoles {
        ColumnRoles::resolve(self)
    }
}

/// Concrete column chosen for each role, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    pub date: Option<String>,
    pub description: Option<String>,
    pub debit: Option<String>,
    pub credit: Option<String>,
    pub amount: Option<String>,
    pub balance: Option<String>,
}

impl ColumnRoles {
    /// Pick, for each role, the first synonym present in the schema.
    pub fn resolve(schema: &ExpectedSchema) -> Self {
        let pick = |role: Role| {
            synonyms(role)
                .iter()
                .find(|name| schema.contains(name))
                .map(|name| name.to_string())
        };

        Self {
            date: pick(Role::Date),
            description: pick(Role::Description),
            debit: pick(Role::Debit),
            credit: pick(Role::Credit),
            amount: pick(Role::Amount),
            balance: pick(Role::Balance),
        }
    }

    pub fn column(&self, role: Role) -> Option<&str> {
        match role {
            Role::Date => self.date.as_deref(),
            Role::Description => self.description.as_deref(),
            Role::Debit => self.debit.as_deref(),
            Role::Credit => self.credit.as_deref(),
            Role::Amount => self.amount.as_deref(),
            Role::Balance => self.balance.as_deref(),
        }
    }

    /// Columns of the numeric roles that resolved, in role order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        Role::ALL
            .iter()
            .filter(|role| role.is_numeric())
            .filter_map(|role| self.column(*role))
            .collect()
    }

    /// Flagged rows write to the Amount column unless both Debit and Credit exist.
    pub fn flagged_uses_amount(&self) -> bool {
        self.amount.is_some() && (self.debit.is_none() || self.credit.is_none())
    }

    /// Tabular rows write to the Amount column only when neither Debit nor Credit exists.
    pub fn tabular_uses_amount(&self) -> bool {
        self.amount.is_some() && self.debit.is_none() && self.credit.is_none()
    }
}

/// Whether the statement text carries standalone CR/DR tokens.
pub fn has_type_flags(text: &str) -> bool {
    static FLAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s(?:cr|dr)\s").unwrap());
    FLAG_RE.is_match(text)
}

/// [`has_type_flags`] over separate lines.
pub fn lines_have_type_flags<S: AsRef<str>>(lines: &[S]) -> bool {
    lines.iter().any(|line| {
        let line: &str = line.as_ref();
        has_type_flags(&format!(" {} ", line))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_standard_schema() {
        let schema = ExpectedSchema::new(["Date", "Description", "Debit Amt", "Credit Amt", "Balance"]);
        let roles = schema.resolve_roles();

        assert_eq!(
            roles,
            ColumnRoles {
                date: Some("Date".into()),
                description: Some("Description".into()),
                debit: Some("Debit Amt".into()),
                credit: Some("Credit Amt".into()),
                amount: None,
                balance: Some("Balance".into()),
            }
        );
        assert_eq!(roles.numeric_columns(), vec!["Debit Amt", "Credit Amt", "Balance"]);
        assert!(!roles.flagged_uses_amount());
        assert!(!roles.tabular_uses_amount());
    }

    #[test]
    fn test_resolve_prefers_first_synonym() {
        let schema = ExpectedSchema::new(["Bal", "Balance", "Narration", "Txn Date", "Amt"]);
        let roles = schema.resolve_roles();

        assert_eq!(roles.balance.as_deref(), Some("Balance"));
        assert_eq!(roles.description.as_deref(), Some("Narration"));
        assert_eq!(roles.date.as_deref(), Some("Txn Date"));
        assert_eq!(roles.amount.as_deref(), Some("Amt"));
        assert!(roles.tabular_uses_amount());
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let schema = ExpectedSchema::new(["date", "BALANCE"]);
        let roles = schema.resolve_roles();
        assert_eq!(roles, ColumnRoles::default());
    }

    #[test]
    fn test_amount_with_one_sided_pair() {
        let schema = ExpectedSchema::new(["Date", "Amount", "Credit"]);
        let roles = schema.resolve_roles();
        assert!(roles.flagged_uses_amount());
        assert!(!roles.tabular_uses_amount());
    }

    #[test]
    fn test_type_flags() {
        assert!(has_type_flags("01-02-2024 Salary CR 5,000.00 10,000.00"));
        assert!(has_type_flags("x dr 1"));
        assert!(!has_type_flags("01-02-2024  CREDIT card  5.00"));
        assert!(!has_type_flags("Statement of Account"));

        assert!(lines_have_type_flags(&["Opening", "Fee DR"]));
        assert!(!lines_have_type_flags(&["Opening", "Fee DRAFT"]));
        assert!(lines_have_type_flags(&["01-02-2024\tSalary\tCR\t5,000.00\t10,000.00"]));
    }
}
