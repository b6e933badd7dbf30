// Attendance microservice (separate base URL).

use std::time::Duration;

use chrono::{NaiveDate, Utc};

use crate::client::{HrClient, Service};
use crate::error::Error;
use crate::models::{AttendanceRecord, AttendanceSummary, PunchRequest};

const ATTENDANCE_TIMEOUT: Duration = Duration::from_secs(10);

impl HrClient {
    pub async fn list_attendance(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AttendanceRecord>, Error> {
        self.get_with_params(
            Service::Attendance,
            &format!("attendance/employee/{employee_id}"),
            &[("from", from.to_string()), ("to", to.to_string())],
            Some(ATTENDANCE_TIMEOUT),
        )
        .await
    }

    pub async fn attendance_summary(&self, date: NaiveDate) -> Result<AttendanceSummary, Error> {
        self.get_with_params(
            Service::Attendance,
            &format!("attendance/company/{}/summary", self.company_id()),
            &[("date", date.to_string())],
            Some(ATTENDANCE_TIMEOUT),
        )
        .await
    }

    pub async fn check_in(&self, employee_id: &str) -> Result<AttendanceRecord, Error> {
        self.punch("attendance/check-in", employee_id).await
    }

    pub async fn check_out(&self, employee_id: &str) -> Result<AttendanceRecord, Error> {
        self.punch("attendance/check-out", employee_id).await
    }

    async fn punch(&self, path: &str, employee_id: &str) -> Result<AttendanceRecord, Error> {
        let body = PunchRequest {
            employee_id: employee_id.to_owned(),
            company_id: self.company_id().to_owned(),
            timestamp: Utc::now().to_rfc3339(),
        };
        self.post(Service::Attendance, path, &body, Some(ATTENDANCE_TIMEOUT))
            .await
    }
}
