//! Page alerts raised through [`Notifier`] while a response is built.

use std::cell::RefCell;

use actix_web_flash_messages::Level;
use serde::Serialize;

use crate::listing::controller::{NotificationKind, Notifier};
use crate::routes::alert_level_to_str;

fn level(kind: NotificationKind) -> Level {
    match kind {
        NotificationKind::Success => Level::Success,
        NotificationKind::Info => Level::Info,
        NotificationKind::Warning => Level::Warning,
        NotificationKind::Error => Level::Error,
    }
}

/// A notification rendered in the current response.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PageAlert {
    pub message: String,
    pub level: &'static str,
}

/// Collects notifications raised while rendering a page.
#[derive(Debug, Default)]
pub struct AlertCollector {
    alerts: RefCell<Vec<PageAlert>>,
}

impl AlertCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.borrow().is_empty()
    }

    pub fn into_alerts(self) -> Vec<PageAlert> {
        self.alerts.into_inner()
    }
}

impl Notifier for AlertCollector {
    fn notify(&self, message: &str, kind: NotificationKind) {
        self.alerts.borrow_mut().push(PageAlert {
            message: message.to_string(),
            level: alert_level_to_str(&level(kind)),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_keeps_order_and_levels() {
        let collector = AlertCollector::new();
        assert!(collector.is_empty());

        collector.notify("No se pudo cargar la lista.", NotificationKind::Error);
        collector.notify("Vehículo guardado.", NotificationKind::Success);

        assert_eq!(
            collector.into_alerts(),
            vec![
                PageAlert {
                    message: "No se pudo cargar la lista.".to_string(),
                    level: "danger",
                },
                PageAlert {
                    message: "Vehículo guardado.".to_string(),
                    level: "success",
                },
            ]
        );
    }
}
