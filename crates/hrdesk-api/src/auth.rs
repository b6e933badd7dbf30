use secrecy::SecretString;

/// Explicit authentication context for every API call.
///
/// Replaces ambient session reads: whoever builds an [`HrClient`](crate::HrClient)
/// resolves the token and tenant identifiers once and hands them in.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Bearer token sent as `Authorization: Bearer <token>`.
    pub token: SecretString,
    /// Company the operator is administering (`employeeCompanyId`).
    pub company_id: String,
    /// The operator's own employee ID, when known.
    pub employee_id: Option<String>,
}

impl AuthContext {
    pub fn new(token: SecretString, company_id: impl Into<String>) -> Self {
        Self {
            token,
            company_id: company_id.into(),
            employee_id: None,
        }
    }

    pub fn with_employee(mut self, employee_id: impl Into<String>) -> Self {
        self.employee_id = Some(employee_id.into());
        self
    }
}
