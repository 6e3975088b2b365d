use sea_orm::entity::prelude::*;

/// The photography services that can be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ServiceType {
    #[sea_orm(string_value = "portrait")]
    Portrait,
    #[sea_orm(string_value = "wedding")]
    Wedding,
    #[sea_orm(string_value = "product")]
    Product,
    #[sea_orm(string_value = "event")]
    Event,
}

impl ServiceType {
    /// Human-readable label used in notification and activity messages.
    pub fn display(&self) -> &'static str {
        match self {
            ServiceType::Portrait => "Portrait Session",
            ServiceType::Wedding => "Wedding Photoshoot",
            ServiceType::Product => "Product Photography",
            ServiceType::Event => "Event Coverage",
        }
    }
}

/// Lifecycle state of a booking. Every booking starts as `Pending`;
/// `Cancelled` is terminal by convention (no operation moves out of it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(12))")]
pub enum BookingStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "disapproved")]
    Disapproved,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// A scheduled service request owned by exactly one user. Ownership never
/// transfers; deleting the owner cascades to their bookings.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub service_type: ServiceType,
    pub session_datetime: DateTimeUtc,
    pub status: BookingStatus,
    pub notes: Option<String>,
    /// Guards against surfacing the same status-change notification to
    /// the owner more than once.
    #[sea_orm(default_value = "false")]
    pub notified: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A booking belongs to one owner.
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
