use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Devices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Devices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Devices::Customer).string().not_null())
                    .col(ColumnDef::new(Devices::Address).text())
                    .col(ColumnDef::new(Devices::ConfigUpdated).string().not_null())
                    .col(ColumnDef::new(Devices::Details).text())
                    .col(ColumnDef::new(Devices::Firmware).string().not_null())
                    .col(ColumnDef::new(Devices::LanIp).string())
                    .col(ColumnDef::new(Devices::Latitude).double().not_null())
                    .col(ColumnDef::new(Devices::Longitude).double().not_null())
                    .col(ColumnDef::new(Devices::Mac).string().not_null())
                    .col(ColumnDef::new(Devices::Model).string().not_null())
                    .col(ColumnDef::new(Devices::Name).string().not_null())
                    .col(ColumnDef::new(Devices::NetworkId).string().not_null())
                    .col(ColumnDef::new(Devices::Notes).text())
                    .col(ColumnDef::new(Devices::ProductType).string().not_null())
                    .col(ColumnDef::new(Devices::Serial).string().not_null())
                    .col(ColumnDef::new(Devices::Tags).text())
                    .col(ColumnDef::new(Devices::Url).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Hardware identifiers must never repeat.
        for (name, column) in [
            ("idx-devices-mac", Devices::Mac),
            ("idx-devices-serial", Devices::Serial),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .unique()
                        .table(Devices::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        // Reporting lookups.
        for (name, column) in [
            ("idx-devices-customer", Devices::Customer),
            ("idx-devices-firmware", Devices::Firmware),
            ("idx-devices-model", Devices::Model),
            ("idx-devices-product-type", Devices::ProductType),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(Devices::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Devices::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(DeriveIden)]
enum Devices {
    Table,
    Id,
    Customer,
    Address,
    ConfigUpdated,
    Details,
    Firmware,
    LanIp,
    Latitude,
    Longitude,
    Mac,
    Model,
    Name,
    NetworkId,
    Notes,
    ProductType,
    Serial,
    Tags,
    Url,
}
