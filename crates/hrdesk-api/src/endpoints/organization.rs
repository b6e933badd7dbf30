// Departments and designations.

use crate::client::{HrClient, Service};
use crate::error::Error;
use crate::models::{Department, DepartmentRequest, Designation, DesignationRequest};

impl HrClient {
    // ── Departments ──────────────────────────────────────────────────

    pub async fn list_departments(&self) -> Result<Vec<Department>, Error> {
        self.get(
            Service::Api,
            &format!("departments/company/{}", self.company_id()),
        )
        .await
    }

    pub async fn create_department(&self, body: &DepartmentRequest) -> Result<Department, Error> {
        self.post(Service::Api, "departments", body, None).await
    }

    pub async fn update_department(
        &self,
        department_id: &str,
        body: &DepartmentRequest,
    ) -> Result<Department, Error> {
        self.put(Service::Api, &format!("departments/{department_id}"), body)
            .await
    }

    pub async fn delete_department(&self, department_id: &str) -> Result<(), Error> {
        self.delete(Service::Api, &format!("departments/{department_id}"))
            .await
    }

    // ── Designations ─────────────────────────────────────────────────

    pub async fn list_designations(&self) -> Result<Vec<Designation>, Error> {
        self.get(
            Service::Api,
            &format!("designations/company/{}", self.company_id()),
        )
        .await
    }

    pub async fn list_designations_by_department(
        &self,
        department_id: &str,
    ) -> Result<Vec<Designation>, Error> {
        self.get(
            Service::Api,
            &format!("designations/department/{department_id}"),
        )
        .await
    }

    pub async fn create_designation(
        &self,
        body: &DesignationRequest,
    ) -> Result<Designation, Error> {
        self.post(Service::Api, "designations", body, None).await
    }

    pub async fn update_designation(
        &self,
        designation_id: &str,
        body: &DesignationRequest,
    ) -> Result<Designation, Error> {
        self.put(Service::Api, &format!("designations/{designation_id}"), body)
            .await
    }

    pub async fn delete_designation(&self, designation_id: &str) -> Result<(), Error> {
        self.delete(Service::Api, &format!("designations/{designation_id}"))
            .await
    }
}
