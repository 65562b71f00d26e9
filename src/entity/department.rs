//! Department entity
//!
//! Table: departments

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseTransaction, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::gateway::{Reference, Resource};
use crate::validate::{self, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub department_id: i32,

    #[sea_orm(column_type = "String(Some(100))")]
    pub department_name: String,

    #[sea_orm(column_type = "String(Some(100))")]
    pub place: String,

    /// Employee heading the department. Not checked: departments exist
    /// before the employees that belong to them.
    pub department_head: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Create department request
#[derive(Clone, Debug, Deserialize)]
pub struct NewDepartment {
    #[serde(alias = "name")]
    pub department_name: String,
    pub place: String,
    #[serde(alias = "head")]
    pub department_head: i32,
}

#[async_trait]
impl Resource for NewDepartment {
    type Record = Model;

    const NAME: &'static str = "departments";

    fn validate(&self) -> Result<(), ValidationError> {
        validate::text("department_name", &self.department_name)?;
        validate::text("place", &self.place)?;
        validate::id("department_head", self.department_head)
    }

    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    async fn insert(self, txn: &DatabaseTransaction) -> Result<Model, DbErr> {
        ActiveModel {
            department_name: Set(self.department_name),
            place: Set(self.place),
            department_head: Set(self.department_head),
            ..Default::default()
        }
        .insert(txn)
        .await
    }

    async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::DepartmentId)
            .all(db)
            .await
    }
}
