use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub created_at: DateTimeUtc,
    pub total_price: f64,
    pub paid: bool,
    pub payment_method: String,
    /// `pending`, `cancelled` or `delivered`
    pub status: String,
    /// Weak reference to `accounts.id`; not enforced.
    pub user_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_items::Entity")]
    Items,
}

impl Related<super::order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
