//! Trello entities: boards, lists, cards and labels.
//!
//! Every entity carries a remote id, the client it was loaded with and a pair
//! of field snapshots: what the caller edited locally and what Trello last
//! confirmed. `update` pushes the difference, `pull` overwrites both with the
//! remote record, `delete` removes the entity remotely and retires the local
//! value.

pub mod board;
pub mod card;
pub mod label;
pub mod list;

pub use board::Board;
pub use card::Card;
pub use label::Label;
pub use list::List;

use crate::client::{QueryParams, TrelloClient};
use crate::error::TrelloError;

use std::future::Future;

use log::debug;
use serde::de::DeserializeOwned;

/// Capabilities shared by every Trello entity.
pub trait Entity {
    /// Immutable Trello id.
    fn remote_id(&self) -> &str;

    /// Client the entity was loaded with.
    fn client(&self) -> &TrelloClient;

    fn name(&self) -> &str;

    fn set_name(&mut self, name: impl Into<String>);

    /// True until the entity is deleted.
    fn is_loaded(&self) -> bool;

    /// Local fields differ from what Trello last confirmed.
    fn is_dirty(&self) -> bool;

    /// Push metadata changes to Trello (not sub-entities).
    ///
    /// Returns `Ok(false)` without a request when nothing changed, unless
    /// `force` is set, in which case every field is sent.
    fn update(&mut self, force: bool) -> impl Future<Output = Result<bool, TrelloError>> + Send;

    /// Replace local fields with the remote record.
    fn pull(&mut self) -> impl Future<Output = Result<(), TrelloError>> + Send;

    /// Delete the entity (and sub-entities) from Trello.
    fn delete(&mut self) -> impl Future<Output = Result<(), TrelloError>> + Send;
}

/// A set of editable fields that knows how to describe itself as request parameters.
pub(crate) trait FieldSet: Clone + PartialEq + Send + Sync {
    /// Parameters for every field that differs from `baseline`, or all of
    /// them when there is no baseline.
    fn update_params(&self, baseline: Option<&Self>) -> QueryParams;

    fn validate(&self) -> Result<(), TrelloError> {
        Ok(())
    }
}

/// Local edits alongside the last state Trello confirmed.
#[derive(Debug, Clone)]
pub(crate) struct Tracked<T> {
    current: T,
    synced: T,
}

impl<T: Clone + PartialEq> Tracked<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            current: value.clone(),
            synced: value,
        }
    }

    pub(crate) fn current(&self) -> &T {
        &self.current
    }

    pub(crate) fn current_mut(&mut self) -> &mut T {
        &mut self.current
    }

    pub(crate) fn synced(&self) -> &T {
        &self.synced
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.current != self.synced
    }

    pub(crate) fn mark_synced(&mut self, value: T) {
        self.current = value.clone();
        self.synced = value;
    }
}

/// State every entity shares.
#[derive(Debug, Clone)]
pub(crate) struct EntityCore {
    pub(crate) kind: &'static str,
    pub(crate) client: TrelloClient,
    pub(crate) remote_id: String,
    pub(crate) deleted: bool,
}

impl EntityCore {
    pub(crate) fn new(kind: &'static str, client: TrelloClient, remote_id: String) -> Self {
        Self {
            kind,
            client,
            remote_id,
            deleted: false,
        }
    }

    /// Endpoint for this entity, e.g. `boards/<id>`.
    pub(crate) fn resource(&self) -> String {
        format!("{}s/{}", self.kind, self.remote_id)
    }

    #[track_caller]
    pub(crate) fn ensure_live(&self) -> Result<(), TrelloError> {
        if self.deleted {
            return Err(TrelloError::entity_deleted(self.kind, self.remote_id.clone()));
        }
        Ok(())
    }

    pub(crate) async fn fetch<D: DeserializeOwned>(&self) -> Result<D, TrelloError> {
        self.ensure_live()?;
        self.client.get(&self.resource(), QueryParams::new()).await
    }

    /// PUT the changed fields; `None` when there was nothing to send.
    pub(crate) async fn push<F, D>(
        &self,
        fields: &Tracked<F>,
        force: bool,
    ) -> Result<Option<D>, TrelloError>
    where
        F: FieldSet,
        D: DeserializeOwned,
    {
        self.ensure_live()?;

        if !force && !fields.is_dirty() {
            debug!("{} {} unchanged, skipping update", self.kind, self.remote_id);
            return Ok(None);
        }

        fields.current().validate()?;
        let baseline = if force { None } else { Some(fields.synced()) };
        let params = fields.current().update_params(baseline);

        let data = self.client.put(&self.resource(), params).await?;
        Ok(Some(data))
    }

    pub(crate) async fn remove(&mut self) -> Result<(), TrelloError> {
        self.ensure_live()?;
        self.client.delete(&self.resource()).await?;
        self.deleted = true;
        Ok(())
    }
}

/// Push `name` into `params` when it changed against `baseline`.
pub(crate) fn push_changed<T, V>(
    params: &mut QueryParams,
    name: &str,
    current: &T,
    baseline: Option<&T>,
    value: impl FnOnce(&T) -> V,
) where
    T: PartialEq,
    V: Into<crate::client::QueryValue>,
{
    if baseline.is_none_or(|previous| previous != current) {
        params.push(name, value(current));
    }
}
