// Storage client for the device inventory.

use std::time::Duration;

use fleetreport_entity::device;
use fleetreport_entity::prelude::{Device, ProductType};
use fleetreport_migration::{Migrator, MigratorTrait};
use sea_orm::{
    ColumnTrait, ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::synth::DeviceRecord;

// Keeps each INSERT well under SQLite's bound parameter limit.
const INSERT_CHUNK: usize = 50;

// An in-memory database lives exactly as long as its one connection.
const MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(u32::MAX as u64);

/// Pool options for `database_url`.
///
/// Every pooled connection to an in-memory database would see its own empty
/// database, so those get a single connection that is never reaped or recycled.
pub(crate) fn connect_options(database_url: &str) -> ConnectOptions {
    let mut options = ConnectOptions::new(database_url.to_string());
    options.sqlx_logging(false);
    if database_url.contains(":memory:") {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(MEMORY_CONNECTION_LIFETIME)
            .max_lifetime(MEMORY_CONNECTION_LIFETIME);
    }
    options
}

/// Explicitly owned handle to the inventory database.
#[derive(Clone)]
pub struct Storage {
    db: DatabaseConnection,
}

impl Storage {
    pub async fn connect(database_url: &str) -> Result<Self, DbErr> {
        let db = Database::connect(connect_options(database_url)).await?;
        log::debug!("connected to {}", database_url);
        Ok(Storage { db })
    }

    pub async fn close(self) -> Result<(), DbErr> {
        self.db.close().await
    }

    /// Create the devices table and its indexes if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), DbErr> {
        Migrator::up(&self.db, None).await
    }

    /// Replace every stored device with `devices`, all inside one transaction.
    ///
    /// Returns the number of rows deleted. On any error the transaction is
    /// rolled back and the previous rows are left untouched.
    pub async fn replace_devices(&self, devices: Vec<DeviceRecord>) -> Result<u64, DbErr> {
        let txn = self.db.begin().await?;

        let deleted = match Device::delete_many().exec(&txn).await {
            Ok(result) => result.rows_affected,
            Err(e) => {
                log::error!("device delete failed, rolling back: {}", e);
                rollback(txn).await;
                return Err(e);
            }
        };

        let mut rows: Vec<device::ActiveModel> = devices.into_iter().map(Into::into).collect();
        while !rows.is_empty() {
            let rest = rows.split_off(rows.len().min(INSERT_CHUNK));
            if let Err(e) = Device::insert_many(rows).exec(&txn).await {
                log::error!("device insert failed, rolling back: {}", e);
                rollback(txn).await;
                return Err(e);
            }
            rows = rest;
        }

        txn.commit().await?;
        Ok(deleted)
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        Device::find().count(&self.db).await
    }

    /// Count devices of one product type, optionally only those on `firmware`.
    pub async fn count_devices(
        &self,
        product_type: ProductType,
        firmware: Option<&str>,
    ) -> Result<u64, DbErr> {
        let mut query = Device::find().filter(device::Column::ProductType.eq(product_type));
        if let Some(firmware) = firmware {
            query = query.filter(device::Column::Firmware.eq(firmware));
        }
        query.count(&self.db).await
    }

    /// Distinct customer names, in ascending order.
    pub async fn customers(&self) -> Result<Vec<String>, DbErr> {
        Device::find()
            .select_only()
            .column(device::Column::Customer)
            .distinct()
            .order_by_asc(device::Column::Customer)
            .into_tuple::<String>()
            .all(&self.db)
            .await
    }

    pub async fn devices_per_customer(&self) -> Result<Vec<(String, i64)>, DbErr> {
        Device::find()
            .select_only()
            .column(device::Column::Customer)
            .column_as(device::Column::Id.count(), "devices")
            .group_by(device::Column::Customer)
            .order_by_asc(device::Column::Customer)
            .into_tuple::<(String, i64)>()
            .all(&self.db)
            .await
    }

    pub async fn all_devices(&self) -> Result<Vec<device::Model>, DbErr> {
        Device::find()
            .order_by_asc(device::Column::Id)
            .all(&self.db)
            .await
    }
}

// The caller is already returning the error that caused the rollback.
async fn rollback(txn: DatabaseTransaction) {
    if let Err(e) = txn.rollback().await {
        log::error!("rollback failed: {}", e);
    }
}

#[cfg(test)]
pub(crate) async fn memory_storage() -> Storage {
    let storage = Storage::connect("sqlite::memory:").await.unwrap();
    storage.ensure_schema().await.unwrap();
    storage
}
