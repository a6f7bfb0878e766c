//! Transactional store adapter over SeaORM.
//!
//! Every table is a collection addressed through its SeaORM entity. All
//! reads and writes go through a [`StoreTransaction`]; nothing written is
//! visible to others until [`StoreTransaction::commit`], and dropping an
//! uncommitted transaction rolls it back.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Store (one pooled SQLite connection, schema kept current)     │
//! ├──────────────────────────────────────────────────────────────┤
//! │ begin() ──► StoreTransaction                                  │
//! │   create / read / read_all / read_all_by_index                │
//! │   update (upsert) / delete / savepoint / commit / rollback    │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod error;
mod index;

pub use error::StoreError;
pub use index::{KeyRange, SecondaryIndex};

use std::time::Duration;

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectOptions, Database, DatabaseConnection,
    DatabaseTransaction, EntityTrait, IdenStatic, IntoActiveModel, Iterable,
    PrimaryKeyToColumn, PrimaryKeyTrait, QueryFilter, QueryOrder, Select, TransactionTrait,
};
use tally_shared::DatabaseConfig;
use tracing::{debug, info};

use crate::schema::{self, SCHEMA_VERSION};

/// Handle to an open, up-to-date store.
#[derive(Debug, Clone)]
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    /// Connects and upgrades the schema to [`SCHEMA_VERSION`].
    ///
    /// # Errors
    ///
    /// `Open` if the database cannot be reached, `Upgrade` if a migration fails.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections.max(1))
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .sqlx_logging(config.sqlx_logging);

        let db = Database::connect(options).await.map_err(StoreError::Open)?;
        let upgrade = schema::upgrade(&db, SCHEMA_VERSION).await?;
        info!(from = upgrade.from, to = upgrade.to, "Store opened");

        Ok(Self { db })
    }

    /// Starts a transaction.
    ///
    /// Waits while another transaction holds the connection.
    pub async fn begin(&self) -> Result<StoreTransaction, StoreError> {
        let txn = self.db.begin().await?;
        Ok(StoreTransaction { txn })
    }

    /// Returns the underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Closes the connection pool.
    pub async fn close(self) -> Result<(), StoreError> {
        self.db.close().await?;
        debug!("Store closed");
        Ok(())
    }
}

/// An open transaction over the store.
pub struct StoreTransaction {
    txn: DatabaseTransaction,
}

/// Primary key type of entity `E`.
pub type KeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

impl StoreTransaction {
    /// Inserts a new record and returns it as stored.
    ///
    /// Auto-increment keys left unset are assigned by the store.
    ///
    /// # Errors
    ///
    /// `DuplicateKey` if an explicit key is already taken.
    pub async fn create<A>(&self, record: A) -> Result<<A::Entity as EntityTrait>::Model, StoreError>
    where
        A: ActiveModelTrait + ActiveModelBehavior + Send,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    {
        record
            .insert(&self.txn)
            .await
            .map_err(|err| StoreError::from_write(&collection::<A::Entity>(), err))
    }

    /// Reads one record by primary key.
    pub async fn read<E: EntityTrait>(&self, key: KeyOf<E>) -> Result<Option<E::Model>, StoreError> {
        Ok(E::find_by_id(key).one(&self.txn).await?)
    }

    /// Reads every record of a collection, in primary key order.
    pub async fn read_all<E: EntityTrait>(&self) -> Result<Vec<E::Model>, StoreError> {
        Ok(by_primary_key(E::find()).all(&self.txn).await?)
    }

    /// Reads the records whose index key falls in `range`.
    ///
    /// Results are ordered by index key, then primary key.
    ///
    /// # Errors
    ///
    /// `InvalidKey` if the range does not fit the index.
    pub async fn read_all_by_index<E: EntityTrait>(
        &self,
        index: &SecondaryIndex<E>,
        range: &KeyRange,
    ) -> Result<Vec<E::Model>, StoreError> {
        let condition = range.condition(index.columns)?;
        let mut select = E::find().filter(condition);
        for column in index.columns {
            select = select.order_by_asc(*column);
        }
        Ok(by_primary_key(select).all(&self.txn).await?)
    }

    /// Writes a record, replacing any record with the same primary key.
    pub async fn update<A>(&self, record: A) -> Result<(), StoreError>
    where
        A: ActiveModelTrait + Send,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    {
        let keys: Vec<<A::Entity as EntityTrait>::Column> =
            <A::Entity as EntityTrait>::PrimaryKey::iter()
                .map(PrimaryKeyToColumn::into_column)
                .collect();
        let key_names: Vec<&str> = keys.iter().map(IdenStatic::as_str).collect();
        let values: Vec<<A::Entity as EntityTrait>::Column> =
            <A::Entity as EntityTrait>::Column::iter()
                .filter(|column| !key_names.contains(&column.as_str()))
                .collect();

        let mut on_conflict = OnConflict::columns(keys);
        if values.is_empty() {
            on_conflict.do_nothing();
        } else {
            on_conflict.update_columns(values);
        }

        A::Entity::insert(record)
            .on_conflict(on_conflict)
            .exec_without_returning(&self.txn)
            .await
            .map_err(|err| StoreError::from_write(&collection::<A::Entity>(), err))?;
        Ok(())
    }

    /// Deletes one record by primary key; returns the number removed.
    pub async fn delete<E: EntityTrait>(&self, key: KeyOf<E>) -> Result<u64, StoreError> {
        let result = E::delete_by_id(key)
            .exec(&self.txn)
            .await
            .map_err(|err| StoreError::from_write(&collection::<E>(), err))?;
        Ok(result.rows_affected)
    }

    /// Opens a nested scope that can be rolled back on its own.
    pub async fn savepoint(&self) -> Result<Self, StoreError> {
        let txn = self.txn.begin().await?;
        Ok(Self { txn })
    }

    /// Makes every write of this transaction durable and visible.
    pub async fn commit(self) -> Result<(), StoreError> {
        self.txn.commit().await?;
        Ok(())
    }

    /// Discards every write of this transaction.
    pub async fn rollback(self) -> Result<(), StoreError> {
        self.txn.rollback().await?;
        Ok(())
    }

    /// Returns the transaction as a connection, for aggregate queries.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseTransaction {
        &self.txn
    }
}

fn by_primary_key<E: EntityTrait>(mut select: Select<E>) -> Select<E> {
    for key in E::PrimaryKey::iter() {
        select = select.order_by_asc(key.into_column());
    }
    select
}

fn collection<E: EntityTrait>() -> String {
    E::default().table_name().to_string()
}
