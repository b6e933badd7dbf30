// Manager dashboard: four independent reads fanned out concurrently.

use chrono::NaiveDate;

use crate::console::Console;
use crate::error::CoreError;
use crate::model::DashboardSummary;
use crate::store::ValueMutation;

impl Console {
    pub async fn fetch_dashboard(&self, date: NaiveDate) -> Result<DashboardSummary, CoreError> {
        let client = self.client();
        let op = async {
            let (employees, departments, leads, attendance) = tokio::try_join!(
                client.list_employees(),
                client.list_departments(),
                client.list_leads(),
                client.attendance_summary(date),
            )?;
            Ok::<_, CoreError>(DashboardSummary::from_parts(
                &employees,
                departments.len(),
                &leads,
                attendance,
            ))
        };
        self.store()
            .dashboard
            .track("fetch_dashboard", op, |s| ValueMutation::Set(s.clone()))
            .await
    }
}
