// Employee records, onboarding uploads and uniqueness checks.

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;

use crate::client::{HrClient, Service};
use crate::error::Error;
use crate::models::{Availability, Employee};
use crate::upload::Attachment;

/// Uniqueness checks run while the operator types; they must not hang.
const AVAILABILITY_TIMEOUT: Duration = Duration::from_secs(5);

/// Multipart field carrying the JSON-stringified employee metadata.
const EMPLOYEE_DATA_FIELD: &str = "employeeData";

impl HrClient {
    pub async fn list_employees(&self) -> Result<Vec<Employee>, Error> {
        self.get(
            Service::Api,
            &format!("employees/company/{}", self.company_id()),
        )
        .await
    }

    pub async fn get_employee(&self, employee_id: &str) -> Result<Employee, Error> {
        self.get(Service::Api, &format!("employees/{employee_id}"))
            .await
    }

    /// Create an employee from onboarding metadata plus document uploads.
    pub async fn create_employee<M: Serialize + Sync>(
        &self,
        metadata: &M,
        attachments: Vec<Attachment>,
    ) -> Result<Employee, Error> {
        self.send_multipart(
            Method::POST,
            "employees",
            EMPLOYEE_DATA_FIELD,
            metadata,
            attachments,
        )
        .await
    }

    pub async fn update_employee<M: Serialize + Sync>(
        &self,
        employee_id: &str,
        metadata: &M,
        attachments: Vec<Attachment>,
    ) -> Result<Employee, Error> {
        self.send_multipart(
            Method::PUT,
            &format!("employees/{employee_id}"),
            EMPLOYEE_DATA_FIELD,
            metadata,
            attachments,
        )
        .await
    }

    pub async fn delete_employee(&self, employee_id: &str) -> Result<(), Error> {
        self.delete(Service::Api, &format!("employees/{employee_id}"))
            .await
    }

    pub async fn check_email_available(&self, email: &str) -> Result<Availability, Error> {
        self.get_with_params(
            Service::Api,
            "employees/check-email",
            &[
                ("email", email.to_owned()),
                ("companyId", self.company_id().to_owned()),
            ],
            Some(AVAILABILITY_TIMEOUT),
        )
        .await
    }

    pub async fn check_phone_available(&self, phone: &str) -> Result<Availability, Error> {
        self.get_with_params(
            Service::Api,
            "employees/check-phone",
            &[
                ("phone", phone.to_owned()),
                ("companyId", self.company_id().to_owned()),
            ],
            Some(AVAILABILITY_TIMEOUT),
        )
        .await
    }
}
