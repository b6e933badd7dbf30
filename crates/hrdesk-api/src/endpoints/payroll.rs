use serde::Serialize;

use crate::client::{HrClient, Service};
use crate::error::Error;
use crate::models::{GeneratePayrollRequest, Payroll, PayrollStatus};

impl HrClient {
    /// Payroll runs for one pay period across the company.
    pub async fn list_payroll(&self, month: u32, year: i32) -> Result<Vec<Payroll>, Error> {
        self.get_with_params(
            Service::Api,
            &format!("payroll/company/{}", self.company_id()),
            &[("month", month.to_string()), ("year", year.to_string())],
            None,
        )
        .await
    }

    pub async fn list_employee_payroll(&self, employee_id: &str) -> Result<Vec<Payroll>, Error> {
        self.get(Service::Api, &format!("payroll/employee/{employee_id}"))
            .await
    }

    /// Ask the backend to compute payroll for every active employee.
    pub async fn generate_payroll(&self, month: u32, year: i32) -> Result<Vec<Payroll>, Error> {
        self.post(
            Service::Api,
            "payroll/generate",
            &GeneratePayrollRequest {
                company_id: self.company_id().to_owned(),
                month,
                year,
            },
            None,
        )
        .await
    }

    pub async fn update_payroll_status(
        &self,
        payroll_id: &str,
        status: PayrollStatus,
    ) -> Result<Payroll, Error> {
        #[derive(Serialize)]
        struct Body {
            status: PayrollStatus,
        }

        self.patch(
            Service::Api,
            &format!("payroll/{payroll_id}/status"),
            &Body { status },
        )
        .await
    }
}
