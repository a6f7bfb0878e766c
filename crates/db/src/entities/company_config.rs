//! `SeaORM` Entity for the company_config collection (singleton row).

use sea_orm::entity::prelude::*;

/// Key of the only company profile row.
pub const COMPANY_KEY: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "company_config")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub tax_id: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub logo: Option<String>,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
