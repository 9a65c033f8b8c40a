use serde::Serialize;

use crate::domain::alert::Alert;

/// Maintenance count for one workflow status.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusCount {
    pub code: &'static str,
    pub label: &'static str,
    pub badge: &'static str,
    pub count: u64,
    pub href: String,
}

/// Data required to render the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub counts: Vec<StatusCount>,
    pub latest_alerts: Vec<Alert>,
}
