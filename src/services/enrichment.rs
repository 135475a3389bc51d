//! Cross-store join: attaches equipment names to requests
//!
//! Requests and equipment live in different databases, so the join happens
//! here. Listings resolve all names with one batched lookup.

use std::collections::{BTreeSet, HashMap};

use crate::{
    error::AppResult,
    models::maintenance_request::{MaintenanceRequest, MaintenanceRequestDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct EnrichmentService {
    repository: Repository,
}

impl EnrichmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Enrich a single request
    pub async fn enrich_one(&self, request: MaintenanceRequest) -> AppResult<MaintenanceRequestDetails> {
        let equipment_name = match request.equipment_id {
            Some(id) => self.repository.equipment.name_by_id(id).await?,
            None => None,
        };
        Ok(MaintenanceRequestDetails { request, equipment_name })
    }

    /// Enrich a listing, keeping its order
    pub async fn enrich_all(&self, requests: Vec<MaintenanceRequest>) -> AppResult<Vec<MaintenanceRequestDetails>> {
        let ids: Vec<i64> = requests
            .iter()
            .filter_map(|request| request.equipment_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let names = self.repository.equipment.names_by_ids(&ids).await?;
        Ok(attach_names(requests, &names))
    }
}

/// Pair each request with its equipment name; unknown ids give None
pub fn attach_names(
    requests: Vec<MaintenanceRequest>,
    names: &HashMap<i64, String>,
) -> Vec<MaintenanceRequestDetails> {
    requests
        .into_iter()
        .map(|request| {
            let equipment_name = request.equipment_id.and_then(|id| names.get(&id).cloned());
            MaintenanceRequestDetails { request, equipment_name }
        })
        .collect()
}
