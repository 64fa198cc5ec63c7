//! Document store: CRUD, settings and bulk operations over one persisted blob.
//!
//! # Responsibility
//! - Be the only reader and writer of the study document in key-value storage.
//! - Assign entity ids and apply shallow-merge updates.
//! - Import, export and reset the whole document.
//!
//! # Invariants
//! - Every mutation is read-full-document, mutate copy, write-full-document,
//!   run under `&mut self`.
//! - Writes validate records first; a rejected write leaves storage untouched.
//! - Update, delete and toggle on a missing id persist nothing and return
//!   `Ok(false)`.
//! - A malformed import returns `Ok(false)` and leaves storage untouched.

use crate::model::document::Document;
use crate::model::entity::{Entity, EntityId, Patch};
use crate::model::schedule::{NewSchedule, Schedule, SchedulePatch};
use crate::model::settings::{Settings, SettingsPatch, Theme};
use crate::model::subject::{NewSubject, Subject, SubjectPatch};
use crate::model::task::{NewTask, Task, TaskPatch};
use crate::model::validation::ValidationError;
use crate::repo::id_gen::{ClockIdGenerator, IdGenerator};
use crate::repo::kv_repo::{KvStorage, StorageError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized document.
pub const STORAGE_KEY: &str = "studybuddy_data";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure of a store operation.
#[derive(Debug)]
pub enum StoreError {
    Storage(StorageError),
    Validation(ValidationError),
    /// Persisted blob no longer parses as a document.
    InvalidData(String),
    /// No unused id is left in the collection.
    IdsExhausted { collection: &'static str },
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted document: {message}"),
            Self::IdsExhausted { collection } => write!(f, "no free id left in {collection}"),
            Self::Serialize(err) => write!(f, "failed to serialize document: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidData(_) | Self::IdsExhausted { .. } => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Sole authority over the persisted study document.
pub struct DocumentStore<S: KvStorage, G: IdGenerator = ClockIdGenerator> {
    storage: S,
    ids: G,
}

impl<S: KvStorage> DocumentStore<S, ClockIdGenerator> {
    /// Opens the store with timestamp-shaped ids, creating the default
    /// document when storage holds none.
    pub fn open(storage: S) -> StoreResult<Self> {
        Self::open_with_ids(storage, ClockIdGenerator::new())
    }

    /// Wraps storage without reading it, so a corrupt blob can still be
    /// replaced through [`DocumentStore::import_snapshot`] or
    /// [`DocumentStore::reset`].
    pub fn attach(storage: S) -> Self {
        Self::attach_with_ids(storage, ClockIdGenerator::new())
    }
}

impl<S: KvStorage, G: IdGenerator> DocumentStore<S, G> {
    /// Opens the store with a caller-provided id generator.
    pub fn open_with_ids(storage: S, ids: G) -> StoreResult<Self> {
        let store = Self::attach_with_ids(storage, ids);
        store.load()?;
        Ok(store)
    }

    /// Like [`DocumentStore::attach`] with a caller-provided id generator.
    pub fn attach_with_ids(storage: S, ids: G) -> Self {
        Self { storage, ids }
    }

    /// Backing storage handle.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns a copy of the whole document.
    pub fn snapshot(&self) -> StoreResult<Document> {
        self.load()
    }

    pub fn subjects(&self) -> StoreResult<Vec<Subject>> {
        Ok(self.load()?.subjects)
    }

    pub fn schedules(&self) -> StoreResult<Vec<Schedule>> {
        Ok(self.load()?.schedules)
    }

    pub fn tasks(&self) -> StoreResult<Vec<Task>> {
        Ok(self.load()?.tasks)
    }

    pub fn settings(&self) -> StoreResult<Settings> {
        Ok(self.load()?.settings)
    }

    /// Appends a subject and returns its assigned id.
    pub fn add_subject(&mut self, subject: NewSubject) -> StoreResult<EntityId> {
        self.transact("add_subject", |doc, ids| {
            let id = push_entity(&mut doc.subjects, ids, |id| subject.into_subject(id))?;
            Ok((id, true))
        })
    }

    /// Merges `patch` over the subject with `id`. Returns `false` when absent.
    pub fn update_subject(&mut self, id: EntityId, patch: &SubjectPatch) -> StoreResult<bool> {
        self.transact("update_subject", |doc, _| {
            merge_entity(&mut doc.subjects, id, patch)
        })
    }

    /// Removes the subject with `id`. Schedules and tasks referencing it stay.
    pub fn delete_subject(&mut self, id: EntityId) -> StoreResult<bool> {
        self.transact("delete_subject", |doc, _| {
            let removed = remove_entity(&mut doc.subjects, id);
            Ok((removed, removed))
        })
    }

    pub fn add_schedule(&mut self, schedule: NewSchedule) -> StoreResult<EntityId> {
        self.transact("add_schedule", |doc, ids| {
            let id = push_entity(&mut doc.schedules, ids, |id| schedule.into_schedule(id))?;
            Ok((id, true))
        })
    }

    pub fn update_schedule(&mut self, id: EntityId, patch: &SchedulePatch) -> StoreResult<bool> {
        self.transact("update_schedule", |doc, _| {
            merge_entity(&mut doc.schedules, id, patch)
        })
    }

    pub fn delete_schedule(&mut self, id: EntityId) -> StoreResult<bool> {
        self.transact("delete_schedule", |doc, _| {
            let removed = remove_entity(&mut doc.schedules, id);
            Ok((removed, removed))
        })
    }

    /// Appends a task. New tasks always start incomplete.
    pub fn add_task(&mut self, task: NewTask) -> StoreResult<EntityId> {
        self.transact("add_task", |doc, ids| {
            let id = push_entity(&mut doc.tasks, ids, |id| task.into_task(id))?;
            Ok((id, true))
        })
    }

    pub fn update_task(&mut self, id: EntityId, patch: &TaskPatch) -> StoreResult<bool> {
        self.transact("update_task", |doc, _| merge_entity(&mut doc.tasks, id, patch))
    }

    pub fn delete_task(&mut self, id: EntityId) -> StoreResult<bool> {
        self.transact("delete_task", |doc, _| {
            let removed = remove_entity(&mut doc.tasks, id);
            Ok((removed, removed))
        })
    }

    /// Flips `completed` on the task with `id`. Returns `false` when absent.
    pub fn toggle_task_completion(&mut self, id: EntityId) -> StoreResult<bool> {
        self.transact("toggle_task", |doc, _| {
            match doc.tasks.iter_mut().find(|task| task.id == id) {
                Some(task) => {
                    task.completed = !task.completed;
                    Ok((true, true))
                }
                None => Ok((false, false)),
            }
        })
    }

    /// Shallow-merges `patch` over the current settings.
    pub fn update_settings(&mut self, patch: &SettingsPatch) -> StoreResult<Settings> {
        self.transact("update_settings", |doc, _| {
            patch.apply_to(&mut doc.settings);
            Ok((doc.settings.clone(), true))
        })
    }

    /// Switches between light and dark theme and returns the new theme.
    pub fn toggle_theme(&mut self) -> StoreResult<Theme> {
        let theme = self.settings()?.theme.toggled();
        self.update_settings(&SettingsPatch {
            theme: Some(theme),
            ..SettingsPatch::default()
        })?;
        Ok(theme)
    }

    /// Serializes the whole document as pretty-printed JSON.
    pub fn export_snapshot(&self) -> StoreResult<String> {
        let text = self.load()?.to_pretty_json()?;
        info!(
            "event=store_export module=store status=ok bytes={}",
            text.len()
        );
        Ok(text)
    }

    /// Replaces the whole document with `text` when it parses and validates.
    ///
    /// Returns `Ok(false)` for malformed input; storage is left untouched.
    /// Storage failures while writing still surface as errors.
    pub fn import_snapshot(&mut self, text: &str) -> StoreResult<bool> {
        let document = match Document::parse(text) {
            Ok(document) => document,
            Err(err) => {
                warn!(
                    "event=store_import module=store status=rejected bytes={} error={}",
                    text.len(),
                    err
                );
                return Ok(false);
            }
        };

        self.save(&document)?;
        info!(
            "event=store_import module=store status=ok subjects={} schedules={} tasks={}",
            document.subjects.len(),
            document.schedules.len(),
            document.tasks.len()
        );
        Ok(true)
    }

    /// Erases persisted state and writes the default empty document.
    pub fn reset(&mut self) -> StoreResult<()> {
        self.storage.remove_item(STORAGE_KEY)?;
        self.save(&Document::default())?;
        info!("event=store_reset module=store status=ok");
        Ok(())
    }

    fn load(&self) -> StoreResult<Document> {
        match self.storage.get_item(STORAGE_KEY)? {
            Some(text) => {
                Document::parse(&text).map_err(|err| StoreError::InvalidData(err.to_string()))
            }
            None => {
                let document = Document::default();
                self.save(&document)?;
                info!("event=store_init module=store status=ok key={STORAGE_KEY}");
                Ok(document)
            }
        }
    }

    fn save(&self, document: &Document) -> StoreResult<()> {
        let text = document.to_json()?;
        self.storage.set_item(STORAGE_KEY, &text)?;
        Ok(())
    }

    /// Read-modify-write boundary for every mutation.
    ///
    /// `apply` returns the operation result and whether the document changed;
    /// unchanged documents are not written back.
    fn transact<T>(
        &mut self,
        op: &'static str,
        apply: impl FnOnce(&mut Document, &mut G) -> StoreResult<(T, bool)>,
    ) -> StoreResult<T> {
        let mut document = self.load()?;
        let (value, changed) = match apply(&mut document, &mut self.ids) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("event=store_write module=store status=rejected op={op} error={err}");
                return Err(err);
            }
        };

        if changed {
            self.save(&document)?;
            info!("event=store_write module=store status=ok op={op}");
        } else {
            info!("event=store_write module=store status=noop op={op}");
        }
        Ok(value)
    }
}

fn push_entity<T: Entity, G: IdGenerator>(
    items: &mut Vec<T>,
    ids: &mut G,
    build: impl FnOnce(EntityId) -> T,
) -> StoreResult<EntityId> {
    let exhausted = || StoreError::IdsExhausted {
        collection: T::COLLECTION,
    };
    let floor = match items.iter().map(Entity::id).max() {
        Some(max) => max.checked_add(1).ok_or_else(exhausted)?,
        None => 0,
    };
    let id = ids.next_id(floor).ok_or_else(exhausted)?;
    if items.iter().any(|item| item.id() == id) {
        return Err(exhausted());
    }

    let entity = build(id);
    entity.validate_write()?;
    items.push(entity);
    Ok(id)
}

fn merge_entity<T: Entity, P: Patch<T>>(
    items: &mut [T],
    id: EntityId,
    patch: &P,
) -> StoreResult<(bool, bool)> {
    let Some(slot) = items.iter_mut().find(|item| item.id() == id) else {
        return Ok((false, false));
    };
    if patch.is_empty() {
        return Ok((true, false));
    }

    let mut merged = slot.clone();
    patch.apply_to(&mut merged);
    merged.validate_write()?;
    *slot = merged;
    Ok((true, true))
}

fn remove_entity<T: Entity>(items: &mut Vec<T>, id: EntityId) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}
