use sea_orm::entity::prelude::*;

/// A registered account. Staff accounts hold administrative rights over
/// every user and booking in the system.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Unique among active accounts. Deleted accounts free the name.
    #[sea_orm(unique)]
    pub username: String,
    pub email: String,
    /// Optional friendly name shown instead of the username.
    pub display_name: Option<String>,
    /// Bcrypt hash. The cleartext never reaches the database.
    pub password_hash: String,
    #[sea_orm(default_value = "false")]
    pub is_staff: bool,
    pub date_joined: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Every user has exactly one profile, created alongside the account.
    #[sea_orm(has_one = "super::profile::Entity")]
    Profile,
    /// A user can own multiple bookings.
    #[sea_orm(has_many = "super::booking::Entity")]
    Booking,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
