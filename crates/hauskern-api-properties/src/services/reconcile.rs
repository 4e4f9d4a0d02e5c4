//! Snapshot reconciliation for one parent's owned children.
//!
//! One generic routine synchronizes a persisted child collection against an
//! incoming snapshot inside an already-open transaction. It is applied twice
//! per write — property→buildings and building→units — instead of keeping two
//! hand-copied code paths.
//!
//! Rules:
//! - a persisted child whose id is absent from the snapshot is deleted, in
//!   one bulk statement;
//! - a snapshot element carrying an id updates that row, overwriting its
//!   parent foreign key (a client-supplied parent reference is never trusted);
//! - a snapshot element without an id is inserted under the parent;
//! - a snapshot id that is not among the parent's persisted children is a
//!   `NotFound` error, not an insert — otherwise clients could mint rows with
//!   ids of their choosing.

use crate::error::ApiPropertiesError;
use crate::models::requests::{BuildingInput, UnitInput};
use hauskern_db::{Building, Unit};
use sqlx::PgConnection;
use std::collections::HashSet;
use uuid::Uuid;

/// One nesting level of the hierarchy, as seen by the reconciliation engine.
pub(crate) trait ReconcileChild: Sized {
    /// The snapshot element type for this level.
    type Input;

    /// Canonical id of a persisted row.
    fn row_id(&self) -> Uuid;

    /// Id carried by a snapshot element, if any.
    fn input_id(input: &Self::Input) -> Option<Uuid>;

    /// Insert a new row under `parent_id`, returning it with its
    /// store-assigned id.
    async fn insert(
        conn: &mut PgConnection,
        parent_id: Uuid,
        input: &Self::Input,
    ) -> Result<Self, ApiPropertiesError>;

    /// Update the row `id`, overwriting its parent foreign key with
    /// `parent_id`.
    async fn update(
        conn: &mut PgConnection,
        id: Uuid,
        parent_id: Uuid,
        input: &Self::Input,
    ) -> Result<Self, ApiPropertiesError>;

    /// Delete rows by id in one bulk statement.
    async fn delete_many(conn: &mut PgConnection, ids: &[Uuid]) -> Result<u64, ApiPropertiesError>;
}

/// Compute the ids to delete: persisted children absent from the snapshot.
///
/// Order of `persisted` is preserved in the result. Returns `Err` with the
/// offending id when the snapshot references an id that is not persisted
/// under this parent.
pub(crate) fn diff_child_ids(
    persisted: &[Uuid],
    incoming: &[Option<Uuid>],
) -> Result<Vec<Uuid>, Uuid> {
    let persisted_set: HashSet<Uuid> = persisted.iter().copied().collect();
    for id in incoming.iter().flatten() {
        if !persisted_set.contains(id) {
            return Err(*id);
        }
    }

    let incoming_set: HashSet<Uuid> = incoming.iter().flatten().copied().collect();
    Ok(persisted
        .iter()
        .copied()
        .filter(|id| !incoming_set.contains(id))
        .collect())
}

/// Synchronize one parent's owned children against an incoming snapshot.
///
/// Returns the persisted (post-write) rows with canonical ids, in snapshot
/// order, for use by the next nesting level.
pub(crate) async fn reconcile_children<C: ReconcileChild>(
    conn: &mut PgConnection,
    parent_id: Uuid,
    persisted: &[C],
    incoming: &[C::Input],
) -> Result<Vec<C>, ApiPropertiesError> {
    let persisted_ids: Vec<Uuid> = persisted.iter().map(C::row_id).collect();
    let incoming_ids: Vec<Option<Uuid>> = incoming.iter().map(C::input_id).collect();

    let to_delete = diff_child_ids(&persisted_ids, &incoming_ids).map_err(|id| {
        tracing::warn!(parent_id = %parent_id, child_id = %id, "Snapshot references unknown child id");
        ApiPropertiesError::NotFound
    })?;

    if !to_delete.is_empty() {
        let deleted = C::delete_many(conn, &to_delete).await?;
        tracing::debug!(parent_id = %parent_id, deleted, "Deleted children absent from snapshot");
    }

    let mut result = Vec::with_capacity(incoming.len());
    for input in incoming {
        let row = match C::input_id(input) {
            Some(id) => C::update(conn, id, parent_id, input).await?,
            None => C::insert(conn, parent_id, input).await?,
        };
        result.push(row);
    }
    Ok(result)
}

impl ReconcileChild for Building {
    type Input = BuildingInput;

    fn row_id(&self) -> Uuid {
        self.id
    }

    fn input_id(input: &Self::Input) -> Option<Uuid> {
        input.id.map(Into::into)
    }

    async fn insert(
        conn: &mut PgConnection,
        parent_id: Uuid,
        input: &Self::Input,
    ) -> Result<Self, ApiPropertiesError> {
        Ok(Building::insert(&mut *conn, parent_id, &input.into()).await?)
    }

    async fn update(
        conn: &mut PgConnection,
        id: Uuid,
        parent_id: Uuid,
        input: &Self::Input,
    ) -> Result<Self, ApiPropertiesError> {
        Building::update_by_id(&mut *conn, id, parent_id, &input.into())
            .await?
            .ok_or(ApiPropertiesError::NotFound)
    }

    async fn delete_many(conn: &mut PgConnection, ids: &[Uuid]) -> Result<u64, ApiPropertiesError> {
        Ok(Building::delete_by_ids(&mut *conn, ids).await?)
    }
}

impl ReconcileChild for Unit {
    type Input = UnitInput;

    fn row_id(&self) -> Uuid {
        self.id
    }

    fn input_id(input: &Self::Input) -> Option<Uuid> {
        input.id.map(Into::into)
    }

    async fn insert(
        conn: &mut PgConnection,
        parent_id: Uuid,
        input: &Self::Input,
    ) -> Result<Self, ApiPropertiesError> {
        let data = input.normalized()?;
        Ok(Unit::insert(&mut *conn, parent_id, &data).await?)
    }

    async fn update(
        conn: &mut PgConnection,
        id: Uuid,
        parent_id: Uuid,
        input: &Self::Input,
    ) -> Result<Self, ApiPropertiesError> {
        let data = input.normalized()?;
        Unit::update_by_id(&mut *conn, id, parent_id, &data)
            .await?
            .ok_or(ApiPropertiesError::NotFound)
    }

    async fn delete_many(conn: &mut PgConnection, ids: &[Uuid]) -> Result<u64, ApiPropertiesError> {
        Ok(Unit::delete_by_ids(&mut *conn, ids).await?)
    }
}
