use sea_orm::entity::prelude::*;

/// Avatar selection. The set is fixed; the frontend ships exactly these
/// three icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum Avatar {
    #[sea_orm(string_value = "iconA")]
    IconA,
    #[sea_orm(string_value = "iconB")]
    IconB,
    #[sea_orm(string_value = "iconC")]
    IconC,
}

impl Default for Avatar {
    fn default() -> Self {
        Avatar::IconA
    }
}

/// Per-account display preferences. One-to-one with `user`; created when
/// the account is created and removed with it via FK cascade.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_id: i32,
    pub avatar: Avatar,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
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
