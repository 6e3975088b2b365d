use sea_orm::entity::prelude::*;

/// Append-only audit record of account deletions. Usernames are captured
/// as plain strings so the entry survives the deletion it documents; rows
/// are never updated or removed.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "deleted_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Username of the account that was removed.
    pub username: String,
    /// Username of the staff member who performed the deletion.
    pub deleted_by: String,
    pub timestamp: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
