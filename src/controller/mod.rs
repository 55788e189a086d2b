//! Generic CRUD-resource controller.
//!
//! One controller instance backs one active screen. It owns the list last
//! fetched, a single draft, the id being edited and the draft's field errors,
//! and drives the remote API with a fetch, edit, submit, refetch cycle.
//! The server list is always authoritative: every successful mutation is
//! followed by a full reload, never a local merge.

mod scope;

pub use scope::{ActivationScope, CancelHandle};

use chrono::{Local, NaiveDate};

use crate::api::ApiClient;
use crate::config::SubmitPolicy;
use crate::errors::ClientError;
use crate::models::Resource;
use crate::notify::{Action, NotificationSurface};
use crate::validation::{validate, FieldErrors};

/// Source of "today" for derived fields.
pub type Clock = fn() -> NaiveDate;

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Local view state of one screen.
#[derive(Debug, Clone, Default)]
pub struct ScreenState<R> {
    pub records: Vec<R>,
    pub draft: R,
    pub editing: Option<i64>,
    pub errors: FieldErrors,
}

pub struct CrudController<R: Resource> {
    api: ApiClient,
    policy: SubmitPolicy,
    clock: Clock,
    scope: ActivationScope,
    state: ScreenState<R>,
    notifications: NotificationSurface,
}

impl<R: Resource> CrudController<R> {
    pub fn new(api: ApiClient, policy: SubmitPolicy) -> Self {
        Self {
            api,
            policy,
            clock: local_today,
            scope: ActivationScope::new(),
            state: ScreenState::default(),
            notifications: NotificationSurface::new(),
        }
    }

    /// Replace the clock used for derived fields.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn records(&self) -> &[R] {
        &self.state.records
    }

    pub fn draft(&self) -> &R {
        &self.state.draft
    }

    pub fn editing(&self) -> Option<i64> {
        self.state.editing
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.state.errors
    }

    pub fn state(&self) -> &ScreenState<R> {
        &self.state
    }

    pub fn notifications(&self) -> &NotificationSurface {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationSurface {
        &mut self.notifications
    }

    /// Handle that cancels requests of the current activation.
    pub fn cancel_handle(&self) -> CancelHandle {
        self.scope.handle()
    }

    /// Start a fresh activation and load the list.
    pub async fn activate(&mut self) -> Result<(), ClientError> {
        self.renew_scope();
        self.load().await
    }

    /// Cancel the previous activation and open a new scope.
    pub(crate) fn renew_scope(&mut self) {
        self.scope.cancel();
        self.scope = ActivationScope::new();
    }

    /// Scope of the current activation, for screens that issue side requests.
    pub(crate) fn scope(&self) -> &ActivationScope {
        &self.scope
    }

    /// Cancel in-flight requests; called when the screen is left.
    pub fn deactivate(&self) {
        self.scope.cancel();
    }

    /// Fetch the full list and replace local state with it.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        match self.scope.guard(self.api.list::<R>()).await {
            Ok(records) => {
                tracing::info!("Loaded {} {} records", records.len(), R::PATH);
                self.state.records = records;
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                tracing::error!("Error fetching {}: {}", R::PATH, e);
                self.notifications.error(R::failure_message(Action::Load));
                Err(e)
            }
        }
    }

    /// Reset the draft for a new record.
    pub fn begin_create(&mut self) {
        self.state.draft = R::default();
        self.state.editing = None;
        self.state.errors.clear();
    }

    /// Copy a listed record into the draft and mark it as being edited.
    pub fn begin_edit(&mut self, id: i64) -> Result<(), ClientError> {
        let record = self
            .state
            .records
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or(ClientError::UnknownRecord(id))?;

        self.state.draft = record;
        self.state.editing = Some(id);
        self.state.errors.clear();
        Ok(())
    }

    /// Set one draft field from form input. Clears the stale error of that
    /// field and of every field derived from it.
    pub fn update_draft_field(&mut self, name: &str, value: &str) -> Result<(), ClientError> {
        self.state.draft.set_field(name, value)?;
        self.state.errors.remove(name);
        for derived in self.state.draft.derive_fields(name, (self.clock)()) {
            self.state.errors.remove(derived);
        }
        Ok(())
    }

    pub fn validate(&self) -> FieldErrors {
        validate(&self.state.draft)
    }

    /// Create or update the draft depending on whether a record is being edited.
    pub async fn submit(&mut self) -> Result<(), ClientError> {
        let action = match self.state.editing {
            Some(_) => Action::Update,
            None => Action::Create,
        };

        let errors = self.validate();
        if !errors.is_empty() {
            self.state.errors = errors.clone();
            match self.policy {
                SubmitPolicy::Blocking => {
                    tracing::info!("Rejected {} draft with {} field errors", R::PATH, errors.len());
                    self.notifications.error(R::failure_message(action));
                    return Err(ClientError::Validation(errors));
                }
                SubmitPolicy::Advisory => {
                    tracing::warn!(
                        "Submitting {} draft with {} field errors",
                        R::PATH,
                        errors.len()
                    );
                }
            }
        }

        let result = match self.state.editing {
            Some(id) => {
                self.scope
                    .guard(self.api.update(id, &self.state.draft))
                    .await
            }
            None => self.scope.guard(self.api.create(&self.state.draft)).await,
        };

        match result {
            Ok(_) => {
                tracing::info!("Submitted {} draft ({:?})", R::PATH, action);
                self.begin_create();
                self.notifications.success(R::success_message(action));
                self.reload().await;
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                tracing::error!("Error {} {}: {}", action.gerund(), R::LABEL, e);
                self.notifications.error(R::failure_message(action));
                Err(e)
            }
        }
    }

    /// Delete a record immediately.
    pub async fn remove(&mut self, id: i64) -> Result<(), ClientError> {
        match self.scope.guard(self.api.delete::<R>(id)).await {
            Ok(()) => {
                tracing::info!("Deleted {} {}", R::LABEL, id);
                self.notifications.success(R::success_message(Action::Delete));
                self.reload().await;
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                tracing::error!("Error deleting {} {}: {}", R::LABEL, id, e);
                self.notifications.error(R::failure_message(Action::Delete));
                Err(e)
            }
        }
    }

    /// Resynchronize after a mutation; the mutation already succeeded, so a
    /// failed reload is only reported.
    async fn reload(&mut self) {
        if let Err(e) = self.load().await {
            tracing::warn!("Reload of {} after mutation failed: {}", R::PATH, e);
        }
    }
}
