// Departments and designations.

use hrdesk_api::models::{Department, DepartmentRequest, Designation, DesignationRequest};

use crate::console::Console;
use crate::error::CoreError;
use crate::store::ListMutation;

impl Console {
    // ── Departments ──────────────────────────────────────────────────

    pub async fn fetch_departments(&self) -> Result<Vec<Department>, CoreError> {
        self.store()
            .departments
            .track(
                "fetch_departments",
                self.client().list_departments(),
                |items| ListMutation::Replace(items.clone()),
            )
            .await
    }

    pub async fn create_department(
        &self,
        body: &DepartmentRequest,
    ) -> Result<Department, CoreError> {
        self.store()
            .departments
            .track(
                "create_department",
                self.client().create_department(body),
                |dept| ListMutation::Insert(dept.clone()),
            )
            .await
    }

    pub async fn update_department(
        &self,
        department_id: &str,
        body: &DepartmentRequest,
    ) -> Result<Department, CoreError> {
        self.store()
            .departments
            .track(
                "update_department",
                self.client().update_department(department_id, body),
                |dept| ListMutation::Update(dept.clone()),
            )
            .await
    }

    pub async fn delete_department(&self, department_id: &str) -> Result<(), CoreError> {
        self.store()
            .departments
            .track(
                "delete_department",
                self.client().delete_department(department_id),
                |_| ListMutation::Remove(department_id.to_owned()),
            )
            .await
    }

    // ── Designations ─────────────────────────────────────────────────

    pub async fn fetch_designations(&self) -> Result<Vec<Designation>, CoreError> {
        self.store()
            .designations
            .track(
                "fetch_designations",
                self.client().list_designations(),
                |items| ListMutation::Replace(items.clone()),
            )
            .await
    }

    /// Designations of one department; replaces the cached list.
    pub async fn fetch_designations_by_department(
        &self,
        department_id: &str,
    ) -> Result<Vec<Designation>, CoreError> {
        self.store()
            .designations
            .track(
                "fetch_designations_by_department",
                self.client().list_designations_by_department(department_id),
                |items| ListMutation::Replace(items.clone()),
            )
            .await
    }

    pub async fn create_designation(
        &self,
        body: &DesignationRequest,
    ) -> Result<Designation, CoreError> {
        self.store()
            .designations
            .track(
                "create_designation",
                self.client().create_designation(body),
                |d| ListMutation::Insert(d.clone()),
            )
            .await
    }

    pub async fn update_designation(
        &self,
        designation_id: &str,
        body: &DesignationRequest,
    ) -> Result<Designation, CoreError> {
        self.store()
            .designations
            .track(
                "update_designation",
                self.client().update_designation(designation_id, body),
                |d| ListMutation::Update(d.clone()),
            )
            .await
    }

    pub async fn delete_designation(&self, designation_id: &str) -> Result<(), CoreError> {
        self.store()
            .designations
            .track(
                "delete_designation",
                self.client().delete_designation(designation_id),
                |_| ListMutation::Remove(designation_id.to_owned()),
            )
            .await
    }
}
