//! Allocation screens: join records resolved into their referenced records.
//!
//! Every load fans out one lookup per foreign key per row, all concurrently, and
//! publishes the resolved rows only once every lookup has succeeded. A single
//! failed lookup fails the whole batch and the previous rows stay on screen.

use futures::future::try_join_all;

use crate::api::ApiClient;
use crate::config::SubmitPolicy;
use crate::controller::{ActivationScope, CancelHandle};
use crate::errors::ClientError;
use crate::models::{Allocation, ResolvedAllocation, Resource};
use crate::notify::{Action, NotificationSurface};
use crate::validation::{validate, FieldErrors};

/// Resolve both foreign keys of every allocation.
///
/// Issues exactly two lookups per allocation. An empty list resolves to an
/// empty list without touching the network.
pub async fn resolve_allocations<A: Allocation>(
    api: &ApiClient,
    allocations: &[A],
) -> Result<Vec<ResolvedAllocation<A>>, ClientError> {
    if allocations.is_empty() {
        return Ok(Vec::new());
    }

    try_join_all(allocations.iter().map(|allocation| async move {
        let (left, right) = tokio::try_join!(
            api.get::<A::Left>(allocation.left_id()),
            api.get::<A::Right>(allocation.right_id()),
        )?;
        Ok::<_, ClientError>(ResolvedAllocation {
            allocation_id: allocation.id(),
            left,
            right,
        })
    }))
    .await
}

pub struct AllocationController<A: Allocation> {
    api: ApiClient,
    policy: SubmitPolicy,
    scope: ActivationScope,
    rows: Vec<ResolvedAllocation<A>>,
    left_options: Vec<A::Left>,
    right_options: Vec<A::Right>,
    draft: A,
    errors: FieldErrors,
    notifications: NotificationSurface,
}

impl<A: Allocation> AllocationController<A> {
    pub fn new(api: ApiClient, policy: SubmitPolicy) -> Self {
        Self {
            api,
            policy,
            scope: ActivationScope::new(),
            rows: Vec::new(),
            left_options: Vec::new(),
            right_options: Vec::new(),
            draft: A::default(),
            errors: FieldErrors::new(),
            notifications: NotificationSurface::new(),
        }
    }

    pub fn rows(&self) -> &[ResolvedAllocation<A>] {
        &self.rows
    }

    pub fn left_options(&self) -> &[A::Left] {
        &self.left_options
    }

    pub fn right_options(&self) -> &[A::Right] {
        &self.right_options
    }

    pub fn draft(&self) -> &A {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn notifications(&self) -> &NotificationSurface {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationSurface {
        &mut self.notifications
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.scope.handle()
    }

    /// Start a fresh activation: dropdown options, then the allocation list.
    pub async fn activate(&mut self) -> Result<(), ClientError> {
        self.scope.cancel();
        self.scope = ActivationScope::new();
        self.load_options().await?;
        self.load().await
    }

    pub fn deactivate(&self) {
        self.scope.cancel();
    }

    /// Fetch both dropdown lists. A failed list is logged and left as it was.
    pub async fn load_options(&mut self) -> Result<(), ClientError> {
        let (left, right) = tokio::join!(
            self.scope.guard(self.api.list::<A::Left>()),
            self.scope.guard(self.api.list::<A::Right>()),
        );

        match left {
            Ok(options) => self.left_options = options,
            Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
            Err(e) => {
                let path = <A::Left as Resource>::PATH;
                tracing::error!("Error fetching {}: {}", path, e);
            }
        }
        match right {
            Ok(options) => self.right_options = options,
            Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
            Err(e) => {
                let path = <A::Right as Resource>::PATH;
                tracing::error!("Error fetching {}: {}", path, e);
            }
        }
        Ok(())
    }

    /// Fetch allocations and resolve them; publish only a complete batch.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let api = &self.api;
        let fetch = async {
            let allocations = api.list::<A>().await?;
            resolve_allocations(api, &allocations).await
        };

        match self.scope.guard(fetch).await {
            Ok(rows) => {
                tracing::info!("Resolved {} {} rows", rows.len(), A::PATH);
                self.rows = rows;
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                tracing::error!("Error fetching allocations from {}: {}", A::PATH, e);
                self.notifications.error(A::failure_message(Action::Load));
                Err(e)
            }
        }
    }

    pub fn update_draft_field(&mut self, name: &str, value: &str) -> Result<(), ClientError> {
        self.draft.set_field(name, value)?;
        self.errors.remove(name);
        Ok(())
    }

    pub fn validate(&self) -> FieldErrors {
        validate(&self.draft)
    }

    /// Post the allocation draft and reload on success.
    pub async fn submit(&mut self) -> Result<(), ClientError> {
        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors.clone();
            match self.policy {
                SubmitPolicy::Blocking => {
                    self.notifications.error(A::failure_message(Action::Create));
                    return Err(ClientError::Validation(errors));
                }
                SubmitPolicy::Advisory => {
                    tracing::warn!("Submitting {} draft with {} field errors", A::PATH, errors.len());
                }
            }
        }

        match self.scope.guard(self.api.create(&self.draft)).await {
            Ok(_) => {
                tracing::info!("Created {} allocation", A::PATH);
                self.draft = A::default();
                self.errors.clear();
                self.notifications.success(A::success_message(Action::Create));
                self.reload().await;
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                tracing::error!("Error submitting {}: {}", A::LABEL, e);
                self.notifications.error(A::failure_message(Action::Create));
                Err(e)
            }
        }
    }

    /// Delete by allocation id, then reload the full list (and its lookups).
    pub async fn deallocate(&mut self, allocation_id: i64) -> Result<(), ClientError> {
        match self.scope.guard(self.api.delete::<A>(allocation_id)).await {
            Ok(()) => {
                tracing::info!("Deallocated {} {}", A::LABEL, allocation_id);
                self.notifications.success(A::success_message(Action::Delete));
                self.reload().await;
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                tracing::error!("Error during deallocation of {}: {}", allocation_id, e);
                self.notifications.error(A::failure_message(Action::Delete));
                Err(e)
            }
        }
    }

    async fn reload(&mut self) {
        if let Err(e) = self.load().await {
            tracing::warn!("Reload of {} after mutation failed: {}", A::PATH, e);
        }
    }
}
