//! Product entity
//!
//! Table: products

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseTransaction, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::gateway::{Reference, Resource, Target};
use crate::validate::{self, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub product_id: i32,

    #[sea_orm(column_type = "String(Some(100))")]
    pub product_name: String,

    pub supplier_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Create product request
#[derive(Clone, Debug, Deserialize)]
pub struct NewProduct {
    pub product_name: String,
    pub supplier_id: i32,
}

#[async_trait]
impl Resource for NewProduct {
    type Record = Model;

    const NAME: &'static str = "products";

    fn validate(&self) -> Result<(), ValidationError> {
        validate::text("product_name", &self.product_name)?;
        validate::id("supplier_id", self.supplier_id)
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new("supplier_id", Target::Supplier, self.supplier_id)]
    }

    async fn insert(self, txn: &DatabaseTransaction) -> Result<Model, DbErr> {
        ActiveModel {
            product_name: Set(self.product_name),
            supplier_id: Set(self.supplier_id),
            ..Default::default()
        }
        .insert(txn)
        .await
    }

    async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::ProductId)
            .all(db)
            .await
    }
}
