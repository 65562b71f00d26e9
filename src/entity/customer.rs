//! Customer entity
//!
//! Table: customers

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseTransaction, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::gateway::{Reference, Resource};
use crate::validate::{self, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub customer_id: i32,

    #[sea_orm(column_type = "String(Some(100))")]
    pub customer_name: String,

    #[sea_orm(column_type = "String(Some(100))")]
    pub country: String,

    #[sea_orm(column_type = "String(Some(100))")]
    pub phone_number: String,

    #[sea_orm(column_type = "String(Some(100))")]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Create customer request
#[derive(Clone, Debug, Deserialize)]
pub struct NewCustomer {
    pub customer_name: String,
    pub country: String,
    pub phone_number: String,
    pub email: String,
}

#[async_trait]
impl Resource for NewCustomer {
    type Record = Model;

    const NAME: &'static str = "customers";

    fn validate(&self) -> Result<(), ValidationError> {
        validate::text("customer_name", &self.customer_name)?;
        validate::text("country", &self.country)?;
        validate::text("phone_number", &self.phone_number)?;
        validate::email("email", &self.email)
    }

    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    async fn insert(self, txn: &DatabaseTransaction) -> Result<Model, DbErr> {
        ActiveModel {
            customer_name: Set(self.customer_name),
            country: Set(self.country),
            phone_number: Set(self.phone_number),
            email: Set(self.email),
            ..Default::default()
        }
        .insert(txn)
        .await
    }

    async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::CustomerId)
            .all(db)
            .await
    }
}
