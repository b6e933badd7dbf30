// Payroll runs.

use hrdesk_api::models::{Payroll, PayrollStatus};

use crate::console::Console;
use crate::error::CoreError;
use crate::store::ListMutation;

impl Console {
    pub async fn fetch_payroll(&self, month: u32, year: i32) -> Result<Vec<Payroll>, CoreError> {
        validate_period(month)?;
        self.store()
            .payroll
            .track(
                "fetch_payroll",
                self.client().list_payroll(month, year),
                |items| ListMutation::Replace(items.clone()),
            )
            .await
    }

    /// Payslips of one employee; defaults to the operator's own.
    pub async fn fetch_employee_payroll(
        &self,
        employee_id: Option<&str>,
    ) -> Result<Vec<Payroll>, CoreError> {
        let employee_id = self.resolve_employee(employee_id)?;
        self.store()
            .payroll
            .track(
                "fetch_employee_payroll",
                self.client().list_employee_payroll(&employee_id),
                |items| ListMutation::Replace(items.clone()),
            )
            .await
    }

    pub async fn generate_payroll(&self, month: u32, year: i32) -> Result<Vec<Payroll>, CoreError> {
        validate_period(month)?;
        self.store()
            .payroll
            .track(
                "generate_payroll",
                self.client().generate_payroll(month, year),
                |items| ListMutation::Replace(items.clone()),
            )
            .await
    }

    pub async fn update_payroll_status(
        &self,
        payroll_id: &str,
        status: PayrollStatus,
    ) -> Result<Payroll, CoreError> {
        self.store()
            .payroll
            .track(
                "update_payroll_status",
                self.client().update_payroll_status(payroll_id, status),
                |p| ListMutation::Update(p.clone()),
            )
            .await
    }
}

fn validate_period(month: u32) -> Result<(), CoreError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(CoreError::ValidationFailed {
            message: format!("month must be 1-12, got {month}"),
        })
    }
}
