use crate::app::submission::Receipt;
use crate::config::SeedData;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub case_number: Option<String>,
    #[serde(default)]
    pub due: Option<NaiveDate>,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub message: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub read: bool,
}

/// Process-wide portal state shared by the screens that need it. Built once
/// at start-up and lives until exit.
#[derive(Debug, Default)]
pub struct AppState {
    tasks: Vec<Task>,
    alerts: Vec<Alert>,
    receipts: Vec<Receipt>,
}

impl AppState {
    pub fn new(seed: SeedData) -> Self {
        tracing::debug!(
            tasks = seed.tasks.len(),
            alerts = seed.alerts.len(),
            "application state initialised"
        );
        Self {
            tasks: seed.tasks,
            alerts: seed.alerts,
            receipts: Vec::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn open_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|task| !task.done)
    }

    pub fn complete_task(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == id && !task.done) {
            Some(task) => {
                task.done = true;
                true
            }
            None => false,
        }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn unread_alerts(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|alert| !alert.read)
    }

    pub fn acknowledge_alert(&mut self, id: &str) -> bool {
        match self.alerts.iter_mut().find(|alert| alert.id == id && !alert.read) {
            Some(alert) => {
                alert.read = true;
                true
            }
            None => false,
        }
    }

    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    /// Stores the receipt and raises a confirmation alert for it.
    pub fn record_submission(&mut self, receipt: Receipt) {
        tracing::info!(reference = %receipt.reference, flow = receipt.flow, "submission recorded");
        self.alerts.push(Alert {
            id: format!("A-{}", receipt.reference),
            message: format!("{} submitted as {}", receipt.flow, receipt.reference),
            severity: Severity::Info,
            read: false,
        });
        self.receipts.push(receipt);
    }
}

#[cfg(test)]
mod tests {
    use super::{Alert, AppState, Severity, Task};
    use crate::app::submission::{Receipt, ReferenceNumber};
    use crate::config::SeedData;
    use crate::core::FormData;

    fn state() -> AppState {
        AppState::new(SeedData {
            tasks: vec![
                Task {
                    id: "T-1".into(),
                    title: "Serve witness list".into(),
                    case_number: None,
                    due: None,
                    done: false,
                },
                Task {
                    id: "T-2".into(),
                    title: "Pay filing fee".into(),
                    case_number: None,
                    due: None,
                    done: true,
                },
            ],
            alerts: vec![Alert {
                id: "A-1".into(),
                message: "Hearing moved".into(),
                severity: Severity::Warning,
                read: false,
            }],
        })
    }

    #[test]
    fn completing_a_task_is_one_shot() {
        let mut state = state();
        assert_eq!(state.open_tasks().count(), 1);
        assert!(state.complete_task("T-1"));
        assert!(!state.complete_task("T-1"));
        assert!(!state.complete_task("T-9"));
        assert_eq!(state.open_tasks().count(), 0);
    }

    #[test]
    fn acknowledging_alerts() {
        let mut state = state();
        assert!(state.acknowledge_alert("A-1"));
        assert_eq!(state.unread_alerts().count(), 0);
        assert!(!state.acknowledge_alert("A-1"));
    }

    #[test]
    fn submissions_raise_an_alert() {
        let mut state = state();
        let receipt = Receipt::new(
            ReferenceNumber::from_parts("EXH", 2026, "0A1B2C3D"),
            "exhibit",
            FormData::new().with("title", "Lease"),
        );
        state.record_submission(receipt);
        assert_eq!(state.receipts().len(), 1);
        assert_eq!(state.unread_alerts().count(), 2);
        assert!(
            state
                .alerts()
                .iter()
                .any(|alert| alert.message == "exhibit submitted as EXH-2026-0A1B2C3D")
        );
    }
}
