//! Project service and state machine.
//!
//! One project per process: an optional RFP, an append-only bid list and an
//! optional analysis. The service exposes only transition operations —
//! `load_rfp`, `add_bid`, `run_analysis`, `reset` — so the ordering
//! invariants (RFP before bids, bids before analysis) are enforced at this
//! boundary rather than by caller convention.
//!
//! The project sits behind a `tokio::sync::Mutex` that is held across the
//! whole stage invocation, so two bid submissions arriving together are
//! serialised rather than racing on the shared bid list. Every successful
//! mutation rewrites the durable store before the lock is released.

use crate::stages::{self, Upload};
use crate::store::ProjectStore;
use crate::{CoreConfig, CoreResult, ValidationError};
use std::sync::Arc;
use tdr_model::ModelClient;
use tdr_staging::BlobStore;
use tdr_types::{Analysis, Bid, Project, Requirement, Rfp};
use tokio::sync::Mutex;
use tracing::info;

/// Orchestrates the tender review workflow over one project.
#[derive(Clone)]
pub struct ProjectService {
    project: Arc<Mutex<Project>>,
    store: Arc<ProjectStore>,
    staging: Arc<dyn BlobStore>,
    model: Arc<dyn ModelClient>,
}

impl ProjectService {
    /// Creates the service, restoring any persisted project from the store.
    pub fn new(
        config: &CoreConfig,
        staging: Arc<dyn BlobStore>,
        model: Arc<dyn ModelClient>,
    ) -> Self {
        let store = ProjectStore::new(config.store_path());
        let project = store.load();
        if project.rfp.is_some() {
            info!(bids = project.bids.len(), "restored project from store");
        }
        Self {
            project: Arc::new(Mutex::new(project)),
            store: Arc::new(store),
            staging,
            model,
        }
    }

    /// Returns a copy of the current project state.
    pub async fn snapshot(&self) -> Project {
        self.project.lock().await.clone()
    }

    /// Extracts an RFP from the upload and makes it the project's RFP.
    ///
    /// Legal only while no RFP is loaded; a failed extraction leaves the
    /// project untouched.
    pub async fn load_rfp(&self, upload: &Upload) -> CoreResult<Rfp> {
        let mut project = self.project.lock().await;
        if project.rfp.is_some() {
            return Err(ValidationError::RfpAlreadyLoaded.into());
        }

        let rfp =
            stages::extract_rfp(self.staging.as_ref(), self.model.as_ref(), upload).await?;

        project.rfp = Some(rfp.clone());
        self.store.save(&project)?;
        Ok(rfp)
    }

    /// Assesses the uploaded bid and appends it to the project.
    ///
    /// The RFP's requirements are used unless the caller supplied its own
    /// list. Requires an RFP either way; a failed assessment appends
    /// nothing.
    pub async fn add_bid(
        &self,
        upload: &Upload,
        requirements: Option<Vec<Requirement>>,
    ) -> CoreResult<Bid> {
        let mut project = self.project.lock().await;
        let Some(rfp) = project.rfp.as_ref() else {
            return Err(ValidationError::MissingRfp.into());
        };
        let requirements = requirements.unwrap_or_else(|| rfp.requirements.clone());

        let bid = stages::assess_bid(
            self.staging.as_ref(),
            self.model.as_ref(),
            upload,
            &requirements,
        )
        .await?;

        project.bids.push(bid.clone());
        self.store.save(&project)?;
        Ok(bid)
    }

    /// Runs the comparative analysis over all accumulated bids.
    ///
    /// Requires an RFP and at least one bid. A fresh analysis replaces any
    /// prior one wholesale; a failed run leaves the prior one untouched.
    pub async fn run_analysis(&self) -> CoreResult<Analysis> {
        let mut project = self.project.lock().await;
        let Some(rfp) = project.rfp.as_ref() else {
            return Err(ValidationError::MissingRfp.into());
        };

        let analysis = stages::analyse_bids(self.model.as_ref(), rfp, &project.bids).await?;

        project.analysis = Some(analysis.clone());
        self.store.save(&project)?;
        Ok(analysis)
    }

    /// Clears the project unconditionally and wipes the durable store.
    pub async fn reset(&self) -> CoreResult<()> {
        let mut project = self.project.lock().await;
        *project = Project::default();
        self.store.clear()?;
        info!("project reset");
        Ok(())
    }
}
