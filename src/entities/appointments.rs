use sea_orm::entity::prelude::*;

/// No uniqueness on (`date`, `time`): a slot can be booked twice.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(indexed)]
    pub email: String,
    pub phone: String,
    #[sea_orm(indexed)]
    pub date: Date,
    pub time: Time,
    pub persons: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
