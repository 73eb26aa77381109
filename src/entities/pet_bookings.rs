use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pet_bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub pet_name: String,
    #[sea_orm(indexed)]
    pub email: String,
    pub pet_type: String,
    pub breed: String,
    pub payment_method: String,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    /// Weak reference to `accounts.id`; not enforced.
    pub user_id: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
