//! Employee entity
//!
//! Table: employees

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseTransaction, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::gateway::{Reference, Resource, Target};
use crate::validate::{self, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub employee_id: i32,

    #[sea_orm(column_type = "String(Some(100))")]
    pub first_name: String,

    #[sea_orm(column_type = "String(Some(100))")]
    pub last_name: String,

    #[sea_orm(column_type = "String(Some(100))")]
    pub email: String,

    pub department_id: i32,

    pub hire_date: Date,

    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub salary: Decimal,

    #[sea_orm(column_type = "String(Some(100))")]
    pub position: String,

    /// Direct manager, another employee
    pub manager_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

// Relations are checked by the gateway before insert

impl ActiveModelBehavior for ActiveModel {}

/// Create employee request
#[derive(Clone, Debug, Deserialize)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department_id: i32,
    pub hire_date: Date,
    pub salary: Decimal,
    pub position: String,
    #[serde(default)]
    pub manager_id: Option<i32>,
}

#[async_trait]
impl Resource for NewEmployee {
    type Record = Model;

    const NAME: &'static str = "employees";

    fn validate(&self) -> Result<(), ValidationError> {
        validate::text("first_name", &self.first_name)?;
        validate::text("last_name", &self.last_name)?;
        validate::email("email", &self.email)?;
        validate::id("department_id", self.department_id)?;
        validate::non_negative("salary", self.salary)?;
        validate::decimal("salary", self.salary, 12, 2)?;
        validate::text("position", &self.position)?;
        validate::optional_id("manager_id", self.manager_id)
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![Reference::new("department_id", Target::Department, self.department_id)];
        refs.extend(Reference::optional("manager_id", Target::Employee, self.manager_id));
        refs
    }

    async fn insert(self, txn: &DatabaseTransaction) -> Result<Model, DbErr> {
        ActiveModel {
            first_name: Set(self.first_name),
            last_name: Set(self.last_name),
            email: Set(self.email),
            department_id: Set(self.department_id),
            hire_date: Set(self.hire_date),
            salary: Set(self.salary),
            position: Set(self.position),
            manager_id: Set(self.manager_id),
            ..Default::default()
        }
        .insert(txn)
        .await
    }

    async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::EmployeeId)
            .all(db)
            .await
    }
}
