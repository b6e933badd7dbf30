// Attendance (separate microservice).

use chrono::NaiveDate;
use hrdesk_api::models::{AttendanceRecord, AttendanceSummary};

use crate::console::Console;
use crate::error::CoreError;
use crate::store::{ListMutation, ValueMutation};

impl Console {
    pub async fn fetch_attendance(
        &self,
        employee_id: Option<&str>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, CoreError> {
        if from > to {
            return Err(CoreError::ValidationFailed {
                message: format!("range start {from} is after its end {to}"),
            });
        }
        let employee_id = self.resolve_employee(employee_id)?;
        self.store()
            .attendance
            .track(
                "fetch_attendance",
                self.client().list_attendance(&employee_id, from, to),
                |items| ListMutation::Replace(items.clone()),
            )
            .await
    }

    pub async fn fetch_attendance_summary(
        &self,
        date: NaiveDate,
    ) -> Result<AttendanceSummary, CoreError> {
        self.store()
            .attendance_summary
            .track(
                "fetch_attendance_summary",
                self.client().attendance_summary(date),
                |s| ValueMutation::Set(s.clone()),
            )
            .await
    }

    pub async fn check_in(&self, employee_id: Option<&str>) -> Result<AttendanceRecord, CoreError> {
        let employee_id = self.resolve_employee(employee_id)?;
        self.store()
            .attendance
            .track("check_in", self.client().check_in(&employee_id), |r| {
                ListMutation::Insert(r.clone())
            })
            .await
    }

    /// The backend updates the day's record, so the cached entry is replaced.
    pub async fn check_out(&self, employee_id: Option<&str>) -> Result<AttendanceRecord, CoreError> {
        let employee_id = self.resolve_employee(employee_id)?;
        self.store()
            .attendance
            .track("check_out", self.client().check_out(&employee_id), |r| {
                ListMutation::Insert(r.clone())
            })
            .await
    }
}
