//! Project entity
//!
//! Table: projects

use async_trait::async_trait;
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseTransaction, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::gateway::{Reference, Resource, Target};
use crate::validate::{self, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub project_id: i32,

    #[sea_orm(column_type = "String(Some(100))")]
    pub project_name: String,

    pub start_date: Date,

    pub end_date: Date,

    /// Owning department
    pub department_id: i32,

    /// Lead employee
    pub employee_id: i32,

    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub budget: Decimal,

    /// Managing employee
    pub project_manager: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Create project request
#[derive(Clone, Debug, Deserialize)]
pub struct NewProject {
    pub project_name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub department_id: i32,
    pub employee_id: i32,
    pub budget: Decimal,
    pub project_manager: i32,
}

#[async_trait]
impl Resource for NewProject {
    type Record = Model;

    const NAME: &'static str = "projects";

    fn validate(&self) -> Result<(), ValidationError> {
        validate::text("project_name", &self.project_name)?;
        validate::date_order(("start_date", self.start_date), ("end_date", self.end_date))?;
        validate::id("department_id", self.department_id)?;
        validate::id("employee_id", self.employee_id)?;
        validate::non_negative("budget", self.budget)?;
        validate::decimal("budget", self.budget, 14, 2)?;
        validate::id("project_manager", self.project_manager)
    }

    fn references(&self) -> Vec<Reference> {
        vec![
            Reference::new("department_id", Target::Department, self.department_id),
            Reference::new("employee_id", Target::Employee, self.employee_id),
            Reference::new("project_manager", Target::Employee, self.project_manager),
        ]
    }

    async fn insert(self, txn: &DatabaseTransaction) -> Result<Model, DbErr> {
        ActiveModel {
            project_name: Set(self.project_name),
            start_date: Set(self.start_date),
            end_date: Set(self.end_date),
            department_id: Set(self.department_id),
            employee_id: Set(self.employee_id),
            budget: Set(self.budget),
            project_manager: Set(self.project_manager),
            ..Default::default()
        }
        .insert(txn)
        .await
    }

    async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .order_by_asc(Column::ProjectId)
            .all(db)
            .await
    }
}
