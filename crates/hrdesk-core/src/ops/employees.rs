// Employee records, onboarding submission and debounced uniqueness checks.

use hrdesk_api::models::{Availability, Employee};
use tracing::debug;

use crate::console::Console;
use crate::error::CoreError;
use crate::onboarding::{EmployeeDraft, Errors, FieldError};
use crate::store::{ListMutation, Phase};

/// Flatten draft errors into one operator-facing line.
fn summarize(errors: &Errors) -> String {
    errors
        .iter()
        .map(|(key, err)| format!("{key}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl Console {
    /// Record a client-side validation failure on the employees slice.
    fn reject_draft(&self, errors: &Errors) -> CoreError {
        let message = summarize(errors);
        let slice = &self.store().employees;
        slice.dispatch(Phase::Pending);
        slice.dispatch(Phase::Rejected(message.clone()));
        CoreError::ValidationFailed { message }
    }

    pub async fn fetch_employees(&self) -> Result<Vec<Employee>, CoreError> {
        self.store()
            .employees
            .track(
                "fetch_employees",
                self.client().list_employees(),
                |items| ListMutation::Replace(items.clone()),
            )
            .await
    }

    /// Fetch one employee and make it the selection.
    pub async fn fetch_employee(&self, employee_id: &str) -> Result<Employee, CoreError> {
        self.store()
            .employees
            .track(
                "fetch_employee",
                self.client().get_employee(employee_id),
                |e| ListMutation::Select(e.clone()),
            )
            .await
    }

    /// Validate a complete onboarding draft and submit it as multipart.
    ///
    /// Client-side validation failures never reach the network; they are
    /// recorded on the employees slice like any other rejection.
    pub async fn onboard_employee(&self, draft: EmployeeDraft) -> Result<Employee, CoreError> {
        let errors = draft.validate();
        if !errors.is_empty() {
            return Err(self.reject_draft(&errors));
        }

        let metadata = draft.metadata();
        let attachments = draft.into_attachments();
        debug!(attachments = attachments.len(), "submitting onboarding draft");

        self.store()
            .employees
            .track(
                "onboard_employee",
                self.client().create_employee(&metadata, attachments),
                |e| ListMutation::Insert(e.clone()),
            )
            .await
    }

    /// Send an edited draft. Only format errors block an update; fields the
    /// operator left blank keep their stored values.
    pub async fn update_employee(
        &self,
        employee_id: &str,
        draft: EmployeeDraft,
    ) -> Result<Employee, CoreError> {
        let errors: Errors = draft
            .validate()
            .into_iter()
            .filter(|(_, err)| *err != FieldError::Required)
            .collect();
        if !errors.is_empty() {
            return Err(self.reject_draft(&errors));
        }

        let metadata = draft.metadata();
        self.store()
            .employees
            .track(
                "update_employee",
                self.client()
                    .update_employee(employee_id, &metadata, draft.into_attachments()),
                |e| ListMutation::Update(e.clone()),
            )
            .await
    }

    pub async fn delete_employee(&self, employee_id: &str) -> Result<(), CoreError> {
        self.store()
            .employees
            .track(
                "delete_employee",
                self.client().delete_employee(employee_id),
                |_| ListMutation::Remove(employee_id.to_owned()),
            )
            .await
    }

    // ── Uniqueness checks ────────────────────────────────────────────

    /// Debounced email availability check. `Ok(None)` means a newer check
    /// superseded this one before it was sent.
    pub async fn check_email_available(
        &self,
        email: &str,
    ) -> Result<Option<Availability>, CoreError> {
        let client = self.client();
        self.email_checks()
            .run(|| client.check_email_available(email))
            .await
            .transpose()
            .map_err(CoreError::from)
    }

    /// Debounced phone availability check; see
    /// [`check_email_available`](Self::check_email_available).
    pub async fn check_phone_available(
        &self,
        phone: &str,
    ) -> Result<Option<Availability>, CoreError> {
        let client = self.client();
        self.phone_checks()
            .run(|| client.check_phone_available(phone))
            .await
            .transpose()
            .map_err(CoreError::from)
    }
}
