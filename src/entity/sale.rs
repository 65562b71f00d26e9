//! Sale entity
//!
//! Table: sales

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseTransaction, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::gateway::{Reference, Resource, Target};
use crate::validate::{self, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub sale_id: i32,

    pub sale_date: Date,

    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,

    pub product_id: i32,

    pub customer_id: i32,

    pub supplier_id: i32,

    /// Selling employee
    pub employee_id: i32,

    pub project_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Create sale request
#[derive(Clone, Debug, Deserialize)]
pub struct NewSale {
    pub sale_date: Date,
    pub amount: Decimal,
    pub product_id: i32,
    pub customer_id: i32,
    pub supplier_id: i32,
    pub employee_id: i32,
    #[serde(default)]
    pub project_id: Option<i32>,
}

#[async_trait]
impl Resource for NewSale {
    type Record = Model;

    const NAME: &'static str = "sales";

    fn validate(&self) -> Result<(), ValidationError> {
        validate::non_negative("amount", self.amount)?;
        validate::decimal("amount", self.amount, 12, 2)?;
        validate::id("product_id", self.product_id)?;
        validate::id("customer_id", self.customer_id)?;
        validate::id("supplier_id", self.supplier_id)?;
        validate::id("employee_id", self.employee_id)?;
        validate::optional_id("project_id", self.project_id)
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![
            Reference::new("product_id", Target::Product, self.product_id),
            Reference::new("customer_id", Target::Customer, self.customer_id),
            Reference::new("supplier_id", Target::Supplier, self.supplier_id),
            Reference::new("employee_id", Target::Employee, self.employee_id),
        ];
        refs.extend(Reference::optional("project_id", Target::Project, self.project_id));
        refs
    }

    async fn insert(self, txn: &DatabaseTransaction) -> Result<Model, DbErr> {
        ActiveModel {
            sale_date: Set(self.sale_date),
            amount: Set(self.amount),
            product_id: Set(self.product_id),
            customer_id: Set(self.customer_id),
            supplier_id: Set(self.supplier_id),
            employee_id: Set(self.employee_id),
            project_id: Set(self.project_id),
            ..Default::default()
        }
        .insert(txn)
        .await
    }

    async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::SaleId)
            .all(db)
            .await
    }
}
