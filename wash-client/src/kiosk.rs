//! Kiosk override editor
//!
//! Edits one hardware kiosk: name, status, assignment and the per-service
//! IoT overrides for the services of its branch. Nothing is sent until
//! [`KioskEditor::save`], which PUTs the whole override map (last write wins).

use shared::iot::{IotError, IotField, IotOverrides, IotParams, IotValue};
use shared::models::{HardwareKiosk, KioskAssign, KioskStatus, KioskUpdate, Service};
use thiserror::Error;

use crate::api::{AdminApi, ListFilter};
use crate::http::HttpClient;
use crate::ClientResult;

/// Editor errors
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("service {0} does not belong to the kiosk's branch")]
    UnknownService(String),

    #[error(transparent)]
    Iot(#[from] IotError),
}

#[derive(Debug, Clone)]
pub struct KioskEditor {
    kiosk: HardwareKiosk,
    services: Vec<Service>,
    name: String,
    status: KioskStatus,
    org_id: Option<String>,
    branch_id: Option<String>,
    overrides: IotOverrides,
}

impl KioskEditor {
    /// Open the editor on `kiosk` with the services of its branch
    pub fn new(kiosk: HardwareKiosk, services: Vec<Service>) -> Self {
        Self {
            name: kiosk.name.clone(),
            status: kiosk.status,
            org_id: kiosk.org_id().map(str::to_string),
            branch_id: kiosk.branch_id().map(str::to_string),
            overrides: kiosk.iot_overrides.clone(),
            kiosk,
            services,
        }
    }

    pub fn kiosk(&self) -> &HardwareKiosk {
        &self.kiosk
    }

    pub fn into_kiosk(self) -> HardwareKiosk {
        self.kiosk
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn overrides(&self) -> &IotOverrides {
        &self.overrides
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_status(&mut self, status: KioskStatus) {
        self.status = status;
    }

    fn service(&self, service_id: &str) -> Result<&Service, EditorError> {
        self.services
            .iter()
            .find(|s| s.id == service_id)
            .ok_or_else(|| EditorError::UnknownService(service_id.to_string()))
    }

    /// Seed every branch service with a copy of its baseline
    pub fn populate_defaults(&mut self) {
        self.overrides.populate_defaults(&self.services);
    }

    pub fn set_field(
        &mut self,
        service_id: &str,
        field: IotField,
        value: IotValue,
    ) -> Result<(), EditorError> {
        self.service(service_id)?;
        self.overrides.set_field(service_id, field, value)?;
        Ok(())
    }

    /// Parse raw input for `field` and set it
    pub fn set_field_str(
        &mut self,
        service_id: &str,
        field: IotField,
        raw: &str,
    ) -> Result<(), EditorError> {
        let value = IotValue::parse_for(field, raw)?;
        self.set_field(service_id, field, value)
    }

    /// Reset one field to the baseline; returns whether the entry disappeared
    pub fn clear_field(&mut self, service_id: &str, field: IotField) -> bool {
        self.overrides.clear_field(service_id, field)
    }

    /// Drop every override of one service
    pub fn reset_service(&mut self, service_id: &str) -> bool {
        self.overrides.remove(service_id).is_some()
    }

    /// Parameters the kiosk runs for a branch service
    pub fn effective(&self, service_id: &str) -> Option<IotParams> {
        self.service(service_id)
            .ok()
            .map(|service| self.overrides.effective_for(service))
    }

    /// Override entries for services outside the current branch
    pub fn orphaned(&self) -> Vec<String> {
        self.overrides
            .orphaned(self.services.iter().map(|s| s.id.as_str()))
    }

    /// Move the kiosk to another organization/branch
    ///
    /// Overrides keyed by services the new branch does not offer are pruned;
    /// returns the pruned service IDs.
    pub fn reassign(
        &mut self,
        org_id: Option<String>,
        branch_id: Option<String>,
        services: Vec<Service>,
    ) -> Vec<String> {
        self.org_id = org_id.filter(|id| !id.is_empty());
        self.branch_id = branch_id.filter(|id| !id.is_empty());
        self.services = services;
        let pruned = self
            .overrides
            .retain_services(self.services.iter().map(|s| s.id.as_str()));
        if !pruned.is_empty() {
            tracing::info!(kiosk = %self.kiosk.id, pruned = ?pruned, "Pruned overrides of foreign services");
        }
        pruned
    }

    pub fn is_dirty(&self) -> bool {
        self.name != self.kiosk.name
            || self.status != self.kiosk.status
            || self.org_id.as_deref() != self.kiosk.org_id()
            || self.branch_id.as_deref() != self.kiosk.branch_id()
            || self.overrides != self.kiosk.iot_overrides
    }

    /// PUT body: the editable fields plus the whole override map
    pub fn update_payload(&self) -> KioskUpdate {
        let mut overrides = self.overrides.clone();
        overrides.compact();
        KioskUpdate {
            name: self.name.clone(),
            status: self.status,
            org_id: self.org_id.clone(),
            branch_id: self.branch_id.clone(),
            iot_overrides: overrides,
        }
    }

    /// Persist and reload the editor from the server's answer
    pub async fn save<C: HttpClient>(&mut self, api: &AdminApi<'_, C>) -> ClientResult<&HardwareKiosk> {
        let payload = self.update_payload();
        let saved = api.update_hardware_kiosk(&self.kiosk.id, &payload).await?;
        tracing::info!(kiosk = %saved.id, overrides = saved.iot_overrides.len(), "Kiosk saved");
        let services = std::mem::take(&mut self.services);
        *self = Self::new(saved, services);
        Ok(&self.kiosk)
    }
}

/// Assign a kiosk, then drop overrides the new branch has no service for
///
/// Returns the kiosk as stored and the pruned service IDs. The follow-up
/// PUT is only sent when something was pruned.
pub async fn assign_kiosk<C: HttpClient>(
    api: &AdminApi<'_, C>,
    kiosk_id: &str,
    assign: &KioskAssign,
) -> ClientResult<(HardwareKiosk, Vec<String>)> {
    let kiosk = api.assign_kiosk(kiosk_id, assign).await?;
    prune_foreign_overrides(api, kiosk).await
}

/// Unassign a kiosk; without a branch no override survives
pub async fn unassign_kiosk<C: HttpClient>(
    api: &AdminApi<'_, C>,
    kiosk_id: &str,
) -> ClientResult<(HardwareKiosk, Vec<String>)> {
    let kiosk = api.unassign_kiosk(kiosk_id).await?;
    prune_foreign_overrides(api, kiosk).await
}

async fn prune_foreign_overrides<C: HttpClient>(
    api: &AdminApi<'_, C>,
    kiosk: HardwareKiosk,
) -> ClientResult<(HardwareKiosk, Vec<String>)> {
    if kiosk.iot_overrides.is_empty() {
        return Ok((kiosk, Vec::new()));
    }

    let org_id = kiosk.org_id().map(str::to_string);
    let branch_id = kiosk.branch_id().map(str::to_string);
    let services = match &branch_id {
        Some(branch_id) => {
            let filter = ListFilter {
                org_id: org_id.clone(),
                branch_id: Some(branch_id.clone()),
            };
            api.services(&filter).await?
        }
        None => Vec::new(),
    };

    let mut editor = KioskEditor::new(kiosk, Vec::new());
    let pruned = editor.reassign(org_id, branch_id, services);
    if !pruned.is_empty() {
        editor.save(api).await?;
    }
    Ok((editor.into_kiosk(), pruned))
}
