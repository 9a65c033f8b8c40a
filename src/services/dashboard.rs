//! Landing page: maintenance counts per status and the latest alerts.

use crate::domain::alert::Alert;
use crate::domain::auth::{AuthenticatedUser, can_view};
use crate::domain::maintenance::{Maintenance, MaintenanceStatus};
use crate::domain::resource::Resource;
use crate::dto::dashboard::{DashboardData, StatusCount};
use crate::listing::controller::{ListController, Notifier, PageSource};
use crate::listing::filters::{FilterMap, FilterValue};
use crate::listing::query::{PageQuery, SortSpec};
use crate::services::list::{list_href, scoped_query};
use crate::services::{ServiceError, ServiceResult};

pub const LATEST_ALERTS: u32 = 5;

/// Counts come from `totalElements` of one-row pages, one per status.
pub async fn load_dashboard<M, A, N>(
    maintenance: &M,
    alerts: &A,
    notifier: &N,
    user: &AuthenticatedUser,
) -> ServiceResult<DashboardData>
where
    M: PageSource<Maintenance> + ?Sized,
    A: PageSource<Alert> + ?Sized,
    N: Notifier + ?Sized,
{
    if !can_view(user, Resource::Mantenimientos) {
        return Err(ServiceError::Unauthorized);
    }

    let mut counts = Vec::with_capacity(MaintenanceStatus::ALL.len());
    for status in MaintenanceStatus::ALL {
        let filters = FilterMap::default().with("estado", FilterValue::text(status.code()));
        let visible = PageQuery::new(0, 1).filters(filters);
        let mut controller = ListController::<Maintenance>::restore(scoped_query(
            user,
            Resource::Mantenimientos,
            visible.clone(),
        ))
        .error_message("No se pudieron cargar los mantenimientos.");
        controller.sync(maintenance, notifier).await;

        counts.push(StatusCount {
            code: status.code(),
            label: status.label(),
            badge: status.badge(),
            count: controller.total_elements(),
            href: list_href(Resource::Mantenimientos, &PageQuery { size: 10, ..visible }),
        });
    }

    let latest_alerts = if can_view(user, Resource::Alertas) {
        let query = PageQuery::new(0, LATEST_ALERTS)
            .sort(SortSpec::desc("fechaCreacion"))
            .filters(FilterMap::default().with("leida", FilterValue::text("false")));
        let mut controller = ListController::<Alert>::restore(scoped_query(
            user,
            Resource::Alertas,
            query,
        ))
        .error_message("No se pudieron cargar las alertas.");
        controller.sync(alerts, notifier).await;
        controller.into_items()
    } else {
        Vec::new()
    };

    Ok(DashboardData {
        counts,
        latest_alerts,
    })
}
