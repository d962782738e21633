// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The draft/publish lifecycle of one wizard page.
//!
//! A [`FormController`] owns the form state, the snapshot of the persisted
//! record and the active step for a single page instance. All operations
//! take `&self`; at most one mutating request is in flight at a time, and
//! a second save or publish while one is running fails with
//! [`LifecycleError::Busy`].
//!
//! The snapshot keeps both the raw record (as the backend returned it) and
//! its projection through the form schema. Change-sets are computed against
//! the projection so that form defaults for fields the backend omitted are
//! not reported as edits.

use crate::error::LifecycleError;
use crate::mount::{BusyGuard, MountHandle};
use crate::navigation::{Location, Navigator};
use crate::sequencer::StepSequencer;
use crate::view::{Notice, ViewState};
use cmp_forms_client::{ClientError, Method, RequestOptions, ResourceClient};
use cmp_forms_domain::{
    DomainError, Endpoint, Endpoints, FieldIssue, FieldName, FormData, PayloadStrategy, RecordId,
    RecordKind, RecordStatus, SaveMode, StepIssue, StepPlan, WriteMethod, apply_patch,
    apply_patch_to_record, compact, diff, extract_id, project, resolve_path, to_form_data,
};
use serde_json::Value;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Notice shown when a draft save finds nothing to send.
pub const NO_CHANGES: &str = "No changes detected";

/// Notice shown when required fields block an action.
pub const FILL_REQUIRED: &str = "Please fill in all required fields";

/// What a successful persist did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new record was created.
    Created { id: String },
    /// The listed fields were sent as a partial update.
    Updated { id: String, fields: Vec<String> },
    /// Nothing differed from the snapshot; no request was made.
    Unchanged { id: String },
}

impl SaveOutcome {
    /// Identifier of the persisted record.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Created { id } | Self::Updated { id, .. } | Self::Unchanged { id } => id,
        }
    }
}

/// What a successful publish did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    pub saved: SaveOutcome,
    /// False for kinds without a publish transition.
    pub transitioned: bool,
}

/// The persisted record as last seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// The record as returned by the backend, with later patches applied.
    pub record: Value,
    /// The record projected through the form schema.
    pub baseline: FormData,
}

struct FormState<K: RecordKind> {
    form: K::Form,
    record_id: RecordId,
    snapshot: Option<Snapshot>,
    loaded: bool,
    sequencer: StepSequencer,
    location: Location,
}

/// Controller for one wizard page editing a record of kind `K`.
pub struct FormController<K: RecordKind> {
    client: ResourceClient,
    navigator: Arc<dyn Navigator>,
    endpoints: Endpoints,
    plan: StepPlan<K::Field>,
    state: Mutex<FormState<K>>,
    busy: AtomicBool,
    mount: MountHandle,
    view: watch::Sender<ViewState>,
}

impl<K: RecordKind> std::fmt::Debug for FormController<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("kind", &K::NAME)
            .field("view", &*self.view.borrow())
            .finish_non_exhaustive()
    }
}

impl<K: RecordKind> FormController<K> {
    /// Creates a controller for the page at `location`.
    ///
    /// The active step is restored from the location's query string. The
    /// form is not usable until [`Self::load`] succeeds.
    #[must_use]
    pub fn new(client: ResourceClient, navigator: Arc<dyn Navigator>, location: Location) -> Self {
        let plan: StepPlan<K::Field> = K::step_plan();
        let sequencer: StepSequencer = StepSequencer::restore(&location.query, plan.len());
        let (view, _) = watch::channel(ViewState {
            active_step: sequencer.active(),
            step_count: sequencer.len(),
            ..ViewState::default()
        });
        Self {
            client,
            navigator,
            endpoints: K::endpoints(),
            plan,
            state: Mutex::new(FormState {
                form: K::Form::default(),
                record_id: RecordId::Create,
                snapshot: None,
                loaded: false,
                sequencer,
                location,
            }),
            busy: AtomicBool::new(false),
            mount: MountHandle::new(),
            view,
        }
    }

    /// Creates a controller for the route `{list_route}/{segment}`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyRecordId` if `segment` is blank.
    pub fn for_route(
        client: ResourceClient,
        navigator: Arc<dyn Navigator>,
        segment: &str,
        query: &str,
    ) -> Result<(Self, RecordId), LifecycleError> {
        let id: RecordId = RecordId::parse(segment, K::CREATE_SENTINEL)?;
        let path: String = format!("{}/{}", K::endpoints().list_route, segment.trim());
        Ok((Self::new(client, navigator, Location::new(&path, query)), id))
    }

    // ------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------

    /// Subscribes to view updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.subscribe()
    }

    #[must_use]
    pub fn view(&self) -> ViewState {
        self.view.borrow().clone()
    }

    /// Handle used to unmount the page.
    #[must_use]
    pub fn mount_handle(&self) -> MountHandle {
        self.mount.clone()
    }

    /// Discards every response that arrives from now on.
    pub fn unmount(&self) {
        self.mount.unmount();
    }

    #[must_use]
    pub const fn plan(&self) -> &StepPlan<K::Field> {
        &self.plan
    }

    /// A copy of the current form state.
    #[must_use]
    pub fn form(&self) -> K::Form {
        self.lock().form.clone()
    }

    /// The current form state as field data.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::FormNotAnObject` if the form does not serialize
    /// to an object.
    pub fn form_data(&self) -> Result<FormData, LifecycleError> {
        Ok(to_form_data::<K>(&self.lock().form)?)
    }

    #[must_use]
    pub fn record_id(&self) -> RecordId {
        self.lock().record_id.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.lock().snapshot.clone()
    }

    /// Status of the persisted record, if known.
    #[must_use]
    pub fn status(&self) -> Option<RecordStatus> {
        self.view.borrow().status
    }

    #[must_use]
    pub fn active_step(&self) -> usize {
        self.lock().sequencer.active()
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.lock().location.clone()
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Edits the typed form in place.
    pub fn update_form(&self, edit: impl FnOnce(&mut K::Form)) {
        if !self.mount.is_mounted() {
            return;
        }
        edit(&mut self.lock().form);
    }

    /// Replaces the whole form.
    pub fn set_form(&self, form: K::Form) {
        self.update_form(|current| *current = form);
    }

    /// Sets a single field from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ProjectionFailed` if the value has the wrong
    /// type for the field; the form is left unchanged.
    pub fn set_field(&self, field: K::Field, value: Value) -> Result<(), LifecycleError> {
        self.mount.ensure_mounted()?;
        let mut state = self.lock();
        let mut data: FormData = to_form_data::<K>(&state.form)?;
        data.insert(field.key().to_string(), value);
        state.form = serde_json::from_value(Value::Object(data)).map_err(|e| {
            DomainError::ProjectionFailed {
                kind: K::NAME,
                error: e.to_string(),
            }
        })?;
        drop(state);

        self.view.send_modify(|view| {
            view.missing.retain(|key| key != field.key());
            view.invalid.retain(|issue| issue.field != field.key());
        });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Steps
    // ------------------------------------------------------------------

    /// Advances one step if the active step's required fields are filled.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::Validation` and highlights the offending
    /// fields; the active step does not change.
    pub fn go_next(&self) -> Result<usize, LifecycleError> {
        self.mount.ensure_mounted()?;
        let mut state = self.lock();
        let data: FormData = to_form_data::<K>(&state.form)?;
        let result: Result<usize, LifecycleError> = state.sequencer.go_next(&self.plan, &data);
        match result {
            Ok(step) => {
                let location: Location = Self::step_location(&mut state);
                drop(state);
                self.after_step_change(step, location);
                Ok(step)
            }
            Err(err) => {
                drop(state);
                if let LifecycleError::Validation { missing, invalid } = &err {
                    self.view.send_modify(|view| {
                        view.missing.clone_from(missing);
                        view.invalid.clone_from(invalid);
                    });
                }
                Err(err)
            }
        }
    }

    /// Goes back one step. Never validates.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::Unmounted` after unmount.
    pub fn go_back(&self) -> Result<usize, LifecycleError> {
        self.mount.ensure_mounted()?;
        let mut state = self.lock();
        let step: usize = state.sequencer.go_back();
        let location: Location = Self::step_location(&mut state);
        drop(state);
        self.after_step_change(step, location);
        Ok(step)
    }

    /// Jumps to `step` without validating the steps in between.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StepOutOfRange` for a step outside the plan.
    pub fn go_to_step(&self, step: usize) -> Result<usize, LifecycleError> {
        self.mount.ensure_mounted()?;
        let mut state = self.lock();
        let step: usize = state.sequencer.go_to(step)?;
        let location: Location = Self::step_location(&mut state);
        drop(state);
        self.after_step_change(step, location);
        Ok(step)
    }

    fn step_location(state: &mut FormState<K>) -> Location {
        let query: String = state.sequencer.to_query(&state.location.query);
        state.location.query = query;
        state.location.clone()
    }

    fn after_step_change(&self, step: usize, location: Location) {
        debug!(kind = K::NAME, step = step, "active step changed");
        self.view.send_modify(|view| {
            view.active_step = step;
            view.missing.clear();
            view.invalid.clear();
        });
        self.navigator.navigate(location);
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Loads the record the page edits.
    ///
    /// The create flow starts from schema defaults with no snapshot. An
    /// existing record is fetched and projected into the form.
    ///
    /// # Errors
    ///
    /// - `LifecycleError::Client` if the fetch fails; the form stays unusable
    /// - `LifecycleError::Domain` if the record does not fit the form
    /// - `LifecycleError::Unmounted` if the page went away meanwhile
    /// - `LifecycleError::Busy` if another operation is in flight
    pub async fn load(&self, id: RecordId) -> Result<(), LifecycleError> {
        let _busy = BusyGuard::acquire(&self.busy, &self.view, &self.mount)?;

        let Some(existing) = id.as_existing().map(str::to_string) else {
            {
                let mut state = self.lock();
                state.form = K::Form::default();
                state.record_id = RecordId::Create;
                state.snapshot = None;
                state.loaded = true;
            }
            debug!(kind = K::NAME, "starting create flow");
            self.view.send_modify(|view| {
                view.loaded = true;
                view.record_id = None;
                view.status = None;
                view.clear_issues();
                view.notice = None;
            });
            return Ok(());
        };

        let path: String = resolve_path(self.endpoints.get, &existing);
        let fetched: Result<Value, ClientError> = self.client.get(&path).await;
        self.mount.ensure_mounted()?;

        let record: Value = match fetched {
            Ok(record) => record,
            Err(err) => {
                warn!(kind = K::NAME, id = %existing, error = %err, "failed to load record");
                self.lock().loaded = false;
                self.view.send_modify(|view| {
                    view.loaded = false;
                    view.notice = Some(Notice::error(err.user_message()));
                });
                return Err(err.into());
            }
        };

        let form: K::Form = match project::<K>(&record) {
            Ok(form) => form,
            Err(err) => {
                self.lock().loaded = false;
                self.view.send_modify(|view| {
                    view.loaded = false;
                    view.notice = Some(Notice::error(err.to_string()));
                });
                return Err(err.into());
            }
        };
        let baseline: FormData = to_form_data::<K>(&form)?;
        let status: Option<RecordStatus> = read_status::<K>(&record);

        {
            let mut state = self.lock();
            state.form = form;
            state.record_id = RecordId::Existing(existing.clone());
            state.snapshot = Some(Snapshot { record, baseline });
            state.loaded = true;
        }
        info!(kind = K::NAME, id = %existing, "record loaded");
        self.view.send_modify(|view| {
            view.loaded = true;
            view.record_id = Some(existing);
            view.status = status;
            view.clear_issues();
            view.notice = None;
        });
        Ok(())
    }

    /// Saves the form as a draft.
    ///
    /// Only the active step is validated. On success the snapshot matches the
    /// persisted state and the page navigates to the list view, unless nothing
    /// changed.
    ///
    /// # Errors
    ///
    /// - `LifecycleError::Validation` if the active step is incomplete
    /// - `LifecycleError::Client` if the backend call fails; input is kept
    /// - `LifecycleError::UpdateUnsupported` for kinds that cannot be edited
    /// - `LifecycleError::NotLoaded`, `Busy` or `Unmounted`
    pub async fn save_draft(&self) -> Result<SaveOutcome, LifecycleError> {
        let _busy = BusyGuard::acquire(&self.busy, &self.view, &self.mount)?;
        let (data, active): (FormData, usize) = self.loaded_data()?;

        let issue: StepIssue = self.plan.validate_step(active, &data)?;
        if !issue.is_clean() {
            debug!(kind = K::NAME, step = active, missing = ?issue.missing, "draft blocked by validation");
            self.report_validation(&issue.missing, &issue.invalid, Vec::new());
            return Err(LifecycleError::Validation {
                missing: issue.missing,
                invalid: issue.invalid,
            });
        }

        let outcome: SaveOutcome = self.persist(data, SaveMode::Draft).await?;

        if let SaveOutcome::Unchanged { id } = &outcome {
            debug!(kind = K::NAME, id = %id, "draft save skipped, nothing changed");
            self.view.send_modify(|view| {
                view.clear_issues();
                view.notice = Some(Notice::info(NO_CHANGES));
            });
            return Ok(outcome);
        }

        info!(kind = K::NAME, id = %outcome.id(), "saved as draft");
        let message: String = format!("{} saved as draft", capitalize(K::NAME));
        self.view.send_modify(|view| {
            view.clear_issues();
            view.notice = Some(Notice::success(message));
        });
        self.navigate_to_list();
        Ok(outcome)
    }

    /// Saves the form and runs the publish transition.
    ///
    /// Every step is validated, whichever step is active. The data is
    /// persisted exactly as [`Self::save_draft`] would, then the transition
    /// endpoint is called.
    ///
    /// # Errors
    ///
    /// - `LifecycleError::Incomplete` naming every step that needs attention
    /// - `LifecycleError::Client` if saving fails; nothing was persisted
    /// - `LifecycleError::PublishTransitionFailed` if saving succeeded but the
    ///   transition failed; a draft stays a draft and a published record
    ///   stays published
    /// - `LifecycleError::UpdateUnsupported`, `NotLoaded`, `Busy` or `Unmounted`
    pub async fn publish(&self) -> Result<PublishOutcome, LifecycleError> {
        let _busy = BusyGuard::acquire(&self.busy, &self.view, &self.mount)?;
        let (data, _): (FormData, usize) = self.loaded_data()?;

        let issues: Vec<StepIssue> = self.completeness_issues(&data);
        if !issues.is_empty() {
            let steps: Vec<usize> = issues.iter().map(|issue| issue.step).collect();
            debug!(kind = K::NAME, steps = ?steps, "publish blocked by incomplete steps");
            let missing: Vec<String> = issues
                .iter()
                .flat_map(|issue| issue.missing.iter().cloned())
                .collect();
            let invalid = issues
                .iter()
                .flat_map(|issue| issue.invalid.iter().cloned())
                .collect::<Vec<_>>();
            self.report_validation(&missing, &invalid, steps);
            return Err(LifecycleError::Incomplete { steps: issues });
        }

        let saved: SaveOutcome = self.persist(data, SaveMode::Publish).await?;
        let id: String = saved.id().to_string();

        let Some(transition) = self.endpoints.publish else {
            info!(kind = K::NAME, id = %id, "submitted");
            let message: String = format!("{} submitted", capitalize(K::NAME));
            self.view.send_modify(|view| {
                view.clear_issues();
                view.notice = Some(Notice::success(message));
            });
            self.navigate_to_list();
            return Ok(PublishOutcome {
                saved,
                transitioned: false,
            });
        };

        let options: RequestOptions = RequestOptions {
            method: method_of(transition),
            ..RequestOptions::get()
        };
        let result: Result<Value, ClientError> =
            self.client.request(&transition.resolve(&id), options).await;
        self.mount.ensure_mounted()?;

        if let Err(source) = result {
            let was_published: bool = self.status() == Some(RecordStatus::Published);
            let kept: RecordStatus = if was_published {
                RecordStatus::Published
            } else {
                RecordStatus::Draft
            };
            warn!(kind = K::NAME, id = %id, status = kept.as_str(), error = %source, "publish transition failed");
            let saved_as: &str = if was_published { "saved" } else { "saved as draft" };
            let message: String = format!(
                "{} {saved_as}, but publishing failed: {}",
                capitalize(K::NAME),
                source.user_message()
            );
            self.view.send_modify(|view| {
                view.clear_issues();
                view.status = Some(kept);
                view.notice = Some(Notice::error(message));
            });
            return Err(LifecycleError::PublishTransitionFailed { id, source });
        }

        {
            let mut state = self.lock();
            if let Some(snapshot) = state.snapshot.as_mut() {
                let mut patch: FormData = FormData::new();
                patch.insert(
                    K::STATUS_KEY.to_string(),
                    Value::String(RecordStatus::Published.as_str().to_string()),
                );
                snapshot.record = apply_patch_to_record(&snapshot.record, &patch);
            }
        }
        info!(kind = K::NAME, id = %id, "published");
        let message: String = format!("{} published", capitalize(K::NAME));
        self.view.send_modify(|view| {
            view.clear_issues();
            view.status = Some(RecordStatus::Published);
            view.notice = Some(Notice::success(message));
        });
        self.navigate_to_list();
        Ok(PublishOutcome {
            saved,
            transitioned: true,
        })
    }

    /// Archives the loaded record.
    ///
    /// The backend removes drafts and keeps published records as archived.
    /// On success the page navigates to the list view.
    ///
    /// # Errors
    ///
    /// - `LifecycleError::NotPersisted` in the create flow
    /// - `LifecycleError::ArchiveUnsupported` for kinds that cannot be archived
    /// - `LifecycleError::Client` if the backend call fails; the status is kept
    /// - `LifecycleError::NotLoaded`, `Busy` or `Unmounted`
    pub async fn archive(&self) -> Result<String, LifecycleError> {
        let _busy = BusyGuard::acquire(&self.busy, &self.view, &self.mount)?;
        let (loaded, record_id): (bool, RecordId) = {
            let state = self.lock();
            (state.loaded, state.record_id.clone())
        };
        if !loaded {
            return Err(LifecycleError::NotLoaded);
        }
        let Some(id) = record_id.as_existing().map(str::to_string) else {
            return Err(LifecycleError::NotPersisted);
        };
        let Some(archive) = self.endpoints.archive else {
            self.view.send_modify(|view| {
                view.notice = Some(Notice::error(LifecycleError::ArchiveUnsupported.to_string()));
            });
            return Err(LifecycleError::ArchiveUnsupported);
        };

        debug!(kind = K::NAME, id = %id, "archiving record");
        let options: RequestOptions = RequestOptions {
            method: method_of(archive),
            ..RequestOptions::get()
        };
        let result: Result<Value, ClientError> =
            self.client.request(&archive.resolve(&id), options).await;
        self.mount.ensure_mounted()?;
        result.map_err(|err| self.report_client_error(err))?;

        {
            let mut state = self.lock();
            if let Some(snapshot) = state.snapshot.as_mut() {
                let mut patch: FormData = FormData::new();
                patch.insert(
                    K::STATUS_KEY.to_string(),
                    Value::String(RecordStatus::Archived.as_str().to_string()),
                );
                snapshot.record = apply_patch_to_record(&snapshot.record, &patch);
            }
        }
        info!(kind = K::NAME, id = %id, "archived");
        let message: String = format!("{} archived", capitalize(K::NAME));
        self.view.send_modify(|view| {
            view.clear_issues();
            view.status = Some(RecordStatus::Archived);
            view.notice = Some(Notice::success(message));
        });
        self.navigate_to_list();
        Ok(id)
    }

    /// Every step's issues plus the kind's publish-only requirements.
    fn completeness_issues(&self, data: &FormData) -> Vec<StepIssue> {
        let mut issues: Vec<StepIssue> = self.plan.validate_all(data);
        for (step, field) in K::publish_requirements(data) {
            if let Some(issue) = issues.iter_mut().find(|issue| issue.step == step) {
                if !issue.missing.contains(&field) {
                    issue.missing.push(field);
                }
                continue;
            }
            let step_id: &'static str = self.plan.step(step).map_or("", |s| s.id);
            issues.push(StepIssue {
                step,
                step_id,
                missing: vec![field],
                invalid: Vec::new(),
            });
        }
        issues.sort_by_key(|issue| issue.step);
        issues
    }

    /// Sends the create or update call and refreshes the snapshot.
    async fn persist(&self, data: FormData, mode: SaveMode) -> Result<SaveOutcome, LifecycleError> {
        let (record_id, snapshot): (RecordId, Option<Snapshot>) = {
            let state = self.lock();
            (state.record_id.clone(), state.snapshot.clone())
        };

        match record_id {
            RecordId::Create => self.create(data, mode).await,
            RecordId::Existing(id) => {
                let snapshot: Snapshot = snapshot.ok_or(LifecycleError::NotLoaded)?;
                self.update(id, snapshot, data, mode).await
            }
        }
    }

    async fn create(&self, data: FormData, mode: SaveMode) -> Result<SaveOutcome, LifecycleError> {
        let create: Endpoint = self.endpoints.create;
        let mut payload: FormData = match K::PAYLOAD {
            PayloadStrategy::Diff => compact(&data),
            PayloadStrategy::Full => data.clone(),
        };
        K::normalize_payload(&mut payload, mode, true);

        debug!(kind = K::NAME, fields = payload.len(), "creating record");
        let options: RequestOptions =
            RequestOptions::with_body(method_of(create), Value::Object(payload.clone()));
        let result: Result<Value, ClientError> = self.client.request(create.path, options).await;
        self.mount.ensure_mounted()?;
        let response: Value = result.map_err(|err| self.report_client_error(err))?;

        let Some(id) = extract_id(&response, K::ID_KEYS) else {
            let err: ClientError = ClientError::MissingId {
                path: create.path.to_string(),
            };
            return Err(self.report_client_error(err));
        };

        let mut record: Value = Value::Object(payload);
        if let Value::Object(fields) = &response {
            record = apply_patch_to_record(&record, fields);
        }
        let status: Option<RecordStatus> = read_status::<K>(&record);

        {
            let mut state = self.lock();
            state.record_id = RecordId::Existing(id.clone());
            state.snapshot = Some(Snapshot {
                record,
                baseline: data,
            });
        }
        let view_id: String = id.clone();
        self.view.send_modify(|view| {
            view.record_id = Some(view_id);
            view.status = status.or(Some(RecordStatus::Draft));
        });
        info!(kind = K::NAME, id = %id, "record created");
        Ok(SaveOutcome::Created { id })
    }

    async fn update(
        &self,
        id: String,
        snapshot: Snapshot,
        data: FormData,
        mode: SaveMode,
    ) -> Result<SaveOutcome, LifecycleError> {
        let Some(update) = self.endpoints.update else {
            self.view.send_modify(|view| {
                view.notice = Some(Notice::error(LifecycleError::UpdateUnsupported.to_string()));
            });
            return Err(LifecycleError::UpdateUnsupported);
        };

        let changes: FormData = diff(Some(&snapshot.baseline), &data, None);
        if changes.is_empty() {
            return Ok(SaveOutcome::Unchanged { id });
        }
        let fields: Vec<String> = changes.keys().cloned().collect();
        let mut patch: FormData = match K::PAYLOAD {
            PayloadStrategy::Diff => changes.clone(),
            PayloadStrategy::Full => data,
        };
        K::normalize_payload(&mut patch, mode, false);

        debug!(kind = K::NAME, id = %id, fields = ?fields, "updating record");
        let options: RequestOptions =
            RequestOptions::with_body(method_of(update), Value::Object(patch.clone()));
        let result: Result<Value, ClientError> =
            self.client.request(&update.resolve(&id), options).await;
        self.mount.ensure_mounted()?;
        result.map_err(|err| self.report_client_error(err))?;

        let record: Value = apply_patch_to_record(&snapshot.record, &patch);
        let baseline: FormData = apply_patch(&snapshot.baseline, &changes);
        let status: Option<RecordStatus> = read_status::<K>(&record);
        self.lock().snapshot = Some(Snapshot { record, baseline });
        self.view.send_modify(|view| view.status = status.or(view.status));
        Ok(SaveOutcome::Updated { id, fields })
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn lock(&self) -> MutexGuard<'_, FormState<K>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn loaded_data(&self) -> Result<(FormData, usize), LifecycleError> {
        let state = self.lock();
        if !state.loaded {
            return Err(LifecycleError::NotLoaded);
        }
        Ok((to_form_data::<K>(&state.form)?, state.sequencer.active()))
    }

    fn report_validation(
        &self,
        missing: &[String],
        invalid: &[FieldIssue],
        steps: Vec<usize>,
    ) {
        self.view.send_modify(|view| {
            view.missing = missing.to_vec();
            view.invalid = invalid.to_vec();
            view.incomplete_steps = steps;
            view.notice = Some(Notice::error(FILL_REQUIRED));
        });
    }

    fn report_client_error(&self, err: ClientError) -> LifecycleError {
        warn!(kind = K::NAME, error = %err, "request failed");
        let message: String = err.user_message();
        self.view
            .send_modify(|view| view.notice = Some(Notice::error(message)));
        LifecycleError::Client(err)
    }

    fn navigate_to_list(&self) {
        self.navigator
            .navigate(Location::new(self.endpoints.list_route, ""));
    }
}

fn method_of(endpoint: Endpoint) -> Method {
    match endpoint.method {
        WriteMethod::Post => Method::Post,
        WriteMethod::Patch => Method::Patch,
        WriteMethod::Put => Method::Put,
        WriteMethod::Delete => Method::Delete,
    }
}

fn read_status<K: RecordKind>(record: &Value) -> Option<RecordStatus> {
    match RecordStatus::from_record(record, K::STATUS_KEY) {
        Ok(status) => status,
        Err(err) => {
            warn!(kind = K::NAME, error = %err, "ignoring unrecognized record status");
            None
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
