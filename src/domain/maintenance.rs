//! Maintenance records and their status workflow.
//!
//! The workflow is a static table: the backend owns the actual state, the
//! console only decides which transition buttons are enabled and refuses to
//! send a transition the table does not allow.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::domain::auth::{AuthenticatedUser, Role, Scoped};
use crate::domain::types::{
    ClientId, MaintenanceId, TypeConstraintError, VehicleId, WorkshopId,
};
use crate::domain::vehicle::VehicleRef;
use crate::domain::workshop::WorkerRef;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceStatus {
    Solicitado,
    Pendiente,
    EnProceso,
    Completado,
    Cancelado,
}

impl MaintenanceStatus {
    pub const ALL: [MaintenanceStatus; 5] = [
        MaintenanceStatus::Solicitado,
        MaintenanceStatus::Pendiente,
        MaintenanceStatus::EnProceso,
        MaintenanceStatus::Completado,
        MaintenanceStatus::Cancelado,
    ];

    /// Wire value, identical to the serde representation.
    pub const fn code(self) -> &'static str {
        match self {
            MaintenanceStatus::Solicitado => "SOLICITADO",
            MaintenanceStatus::Pendiente => "PENDIENTE",
            MaintenanceStatus::EnProceso => "EN_PROCESO",
            MaintenanceStatus::Completado => "COMPLETADO",
            MaintenanceStatus::Cancelado => "CANCELADO",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MaintenanceStatus::Solicitado => "Solicitado",
            MaintenanceStatus::Pendiente => "Pendiente",
            MaintenanceStatus::EnProceso => "En proceso",
            MaintenanceStatus::Completado => "Completado",
            MaintenanceStatus::Cancelado => "Cancelado",
        }
    }

    pub const fn badge(self) -> &'static str {
        match self {
            MaintenanceStatus::Solicitado => "secondary",
            MaintenanceStatus::Pendiente => "warning",
            MaintenanceStatus::EnProceso => "primary",
            MaintenanceStatus::Completado => "success",
            MaintenanceStatus::Cancelado => "danger",
        }
    }

    /// Statuses reachable in one step.
    pub const fn next(self) -> &'static [MaintenanceStatus] {
        use MaintenanceStatus::*;

        match self {
            Solicitado => &[Pendiente, Cancelado],
            Pendiente => &[EnProceso, Cancelado],
            EnProceso => &[Completado, Cancelado],
            Completado | Cancelado => &[],
        }
    }

    pub fn can_transition_to(self, target: MaintenanceStatus) -> bool {
        self.next().contains(&target)
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_empty()
    }
}

impl Display for MaintenanceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MaintenanceStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaintenanceStatus::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(s.to_string()))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    pub id: MaintenanceId,
    #[serde(default)]
    pub vehiculo: Option<VehicleRef>,
    #[serde(default)]
    pub trabajador: Option<WorkerRef>,
    pub descripcion: String,
    pub estado: MaintenanceStatus,
    #[serde(default)]
    pub fecha_creacion: Option<NaiveDateTime>,
    #[serde(default)]
    pub fecha_inicio: Option<NaiveDateTime>,
    #[serde(default)]
    pub fecha_fin: Option<NaiveDateTime>,
    #[serde(default)]
    pub taller_id: Option<WorkshopId>,
    #[serde(default)]
    pub cliente_id: Option<ClientId>,
}

impl Maintenance {
    /// Time spent on the job: until `fecha_fin` when finished, until `now`
    /// while in progress, `None` before work started.
    pub fn elapsed(&self, now: NaiveDateTime) -> Option<TimeDelta> {
        let start = self.fecha_inicio?;
        let end = match self.estado {
            MaintenanceStatus::EnProceso => now,
            _ => self.fecha_fin?,
        };
        Some(end - start).filter(|delta| *delta >= TimeDelta::zero())
    }
}

impl Scoped for Maintenance {
    fn workshop_id(&self) -> Option<WorkshopId> {
        self.taller_id
    }

    fn client_id(&self) -> Option<ClientId> {
        self.cliente_id
    }
}

/// Whether the user may move `record` to `target`.
///
/// Workshop staff drive the workflow of their own workshop; clients may only
/// cancel their own requests before work starts.
pub fn can_change_status(
    user: &AuthenticatedUser,
    record: &Maintenance,
    target: MaintenanceStatus,
) -> bool {
    match user.role {
        Role::Admin => true,
        Role::AdminTaller | Role::Trabajador => {
            user.workshop_id.is_some() && record.taller_id == user.workshop_id
        }
        Role::Cliente => {
            target == MaintenanceStatus::Cancelado
                && matches!(
                    record.estado,
                    MaintenanceStatus::Solicitado | MaintenanceStatus::Pendiente
                )
                && user.client_id.is_some()
                && record.cliente_id == user.client_id
        }
    }
}

/// Payload sent when a maintenance request is created.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMaintenance {
    pub vehiculo_id: VehicleId,
    pub taller_id: WorkshopId,
    pub descripcion: String,
    pub fecha_programada: Option<chrono::NaiveDate>,
    pub estado: MaintenanceStatus,
}

/// Formats a duration as `HH:MM:SS`, hours unbounded.
pub fn format_elapsed(delta: TimeDelta) -> String {
    let seconds = delta.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
