use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .col(string(Users::Email))
                    .col(string_null(Users::DisplayName))
                    .col(string(Users::PasswordHash))
                    .col(boolean(Users::IsStaff).default(false))
                    .col(timestamp_with_time_zone(Users::DateJoined))
                    .to_owned(),
            )
            .await?;

        // Create profiles table (one-to-one with users)
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(pk_auto(Profiles::Id))
                    .col(integer(Profiles::UserId).unique_key())
                    .col(string(Profiles::Avatar).default("iconA"))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profile_user")
                            .from(Profiles::Table, Profiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create bookings table
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(pk_auto(Bookings::Id))
                    .col(integer(Bookings::UserId))
                    .col(string(Bookings::ServiceType))
                    .col(timestamp_with_time_zone(Bookings::SessionDatetime))
                    .col(string(Bookings::Status).default("pending"))
                    .col(text_null(Bookings::Notes))
                    .col(boolean(Bookings::Notified).default(false))
                    .col(timestamp_with_time_zone(Bookings::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_user")
                            .from(Bookings::Table, Bookings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create deleted_users audit table. Plain strings, no foreign
        // keys: the rows must survive the account they describe.
        manager
            .create_table(
                Table::create()
                    .table(DeletedUsers::Table)
                    .if_not_exists()
                    .col(pk_auto(DeletedUsers::Id))
                    .col(string(DeletedUsers::Username))
                    .col(string(DeletedUsers::DeletedBy))
                    .col(timestamp_with_time_zone(DeletedUsers::Timestamp))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(DeletedUsers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    DisplayName,
    PasswordHash,
    IsStaff,
    DateJoined,
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    UserId,
    Avatar,
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
    UserId,
    ServiceType,
    SessionDatetime,
    Status,
    Notes,
    Notified,
    CreatedAt,
}

#[derive(DeriveIden)]
enum DeletedUsers {
    Table,
    Id,
    Username,
    DeletedBy,
    Timestamp,
}
