use hrdesk_api::models::{AttendanceSummary, Employee, Lead, LeadStatus};
use serde::{Deserialize, Serialize};

/// Aggregate counts shown on the manager dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub employees: usize,
    pub active_employees: usize,
    pub departments: usize,
    pub leads: usize,
    pub open_leads: usize,
    pub won_leads: usize,
    pub attendance: AttendanceSummary,
}

impl DashboardSummary {
    pub fn from_parts(
        employees: &[Employee],
        departments: usize,
        leads: &[Lead],
        attendance: AttendanceSummary,
    ) -> Self {
        let active_employees = employees
            .iter()
            .filter(|e| {
                e.status
                    .as_deref()
                    .is_none_or(|s| s.eq_ignore_ascii_case("active"))
            })
            .count();
        let won_leads = leads.iter().filter(|l| l.status == LeadStatus::Won).count();
        let open_leads = leads
            .iter()
            .filter(|l| !matches!(l.status, LeadStatus::Won | LeadStatus::Lost))
            .count();

        Self {
            employees: employees.len(),
            active_employees,
            departments,
            leads: leads.len(),
            open_leads,
            won_leads,
            attendance,
        }
    }
}
