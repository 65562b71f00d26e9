//! Supplier entity
//!
//! Table: suppliers

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseTransaction, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::gateway::{Reference, Resource};
use crate::validate::{self, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub supplier_id: i32,

    #[sea_orm(column_type = "String(Some(100))")]
    pub supplier_name: String,

    #[sea_orm(column_type = "String(Some(100))")]
    pub contact_info: String,

    #[sea_orm(column_type = "String(Some(100))")]
    pub country: String,

    #[sea_orm(column_type = "String(Some(100))")]
    pub phone_number: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Create supplier request
#[derive(Clone, Debug, Deserialize)]
pub struct NewSupplier {
    pub supplier_name: String,
    pub contact_info: String,
    pub country: String,
    pub phone_number: String,
}

#[async_trait]
impl Resource for NewSupplier {
    type Record = Model;

    const NAME: &'static str = "suppliers";

    fn validate(&self) -> Result<(), ValidationError> {
        validate::text("supplier_name", &self.supplier_name)?;
        validate::text("contact_info", &self.contact_info)?;
        validate::text("country", &self.country)?;
        validate::text("phone_number", &self.phone_number)
    }

    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    async fn insert(self, txn: &DatabaseTransaction) -> Result<Model, DbErr> {
        ActiveModel {
            supplier_name: Set(self.supplier_name),
            contact_info: Set(self.contact_info),
            country: Set(self.country),
            phone_number: Set(self.phone_number),
            ..Default::default()
        }
        .insert(txn)
        .await
    }

    async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::SupplierId)
            .all(db)
            .await
    }
}
