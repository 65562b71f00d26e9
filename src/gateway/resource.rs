//! Create-one, create-many and list-all over any record type
//!
//! Writes run inside a `DatabaseTransaction`. Dropping an uncommitted
//! transaction rolls it back and returns its connection to the pool, so an
//! early `?` leaves neither a partial write nor a held connection.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use serde::{de::DeserializeOwned, Serialize};

use super::integrity::{self, Reference};
use crate::error::{AppError, AppResult};
use crate::validate::ValidationError;

/// A creation payload and the table it writes to
#[async_trait]
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Stored row, as returned to callers
    type Record: Serialize + Send + 'static;

    /// Table name, also the route segment
    const NAME: &'static str;

    /// Field rules beyond what deserialization enforces
    fn validate(&self) -> Result<(), ValidationError>;

    /// Foreign keys that must resolve before insert
    fn references(&self) -> Vec<Reference>;

    /// Insert one row, returning it with the identifier the store assigned
    async fn insert(self, txn: &DatabaseTransaction) -> Result<Self::Record, DbErr>;

    async fn list(db: &DatabaseConnection) -> Result<Vec<Self::Record>, DbErr>;
}

pub async fn create_one<R: Resource>(db: &DatabaseConnection, payload: R) -> AppResult<R::Record> {
    payload.validate()?;

    let txn = db.begin().await?;

    let refs = payload.references().into_iter().map(|r| (0, r)).collect();
    let missing = integrity::find_missing(&txn, refs).await?;
    if !missing.is_empty() {
        txn.rollback().await?;
        return Err(AppError::Integrity(integrity::describe(&missing, false)));
    }

    let record = payload.insert(&txn).await?;
    txn.commit().await?;

    tracing::debug!("Created one row in {}", R::NAME);
    Ok(record)
}

pub async fn list_all<R: Resource>(db: &DatabaseConnection) -> AppResult<Vec<R::Record>> {
    Ok(R::list(db).await?)
}

/// Insert a batch all-or-nothing.
///
/// Every payload is validated and every reference resolved before the first
/// insert; any failure rejects the whole batch. Each row's identifier comes
/// back from its own insert, never from an offset against the first one.
pub async fn create_many<R: Resource>(
    db: &DatabaseConnection,
    payloads: Vec<R>,
) -> AppResult<Vec<R::Record>> {
    for (item, payload) in payloads.iter().enumerate() {
        payload
            .validate()
            .map_err(|e| AppError::Validation(format!("item {}: {}", item, e)))?;
    }

    if payloads.is_empty() {
        return Ok(Vec::new());
    }

    let txn = db.begin().await?;

    let refs = payloads
        .iter()
        .enumerate()
        .flat_map(|(item, p)| p.references().into_iter().map(move |r| (item, r)))
        .collect();
    let missing = integrity::find_missing(&txn, refs).await?;
    if !missing.is_empty() {
        txn.rollback().await?;
        tracing::warn!(
            "Rejected batch of {} for {}: {} unresolved reference(s)",
            payloads.len(),
            R::NAME,
            missing.len()
        );
        return Err(AppError::Integrity(integrity::describe(&missing, true)));
    }

    let mut records = Vec::with_capacity(payloads.len());
    for payload in payloads {
        records.push(payload.insert(&txn).await?);
    }
    txn.commit().await?;

    tracing::info!("Created {} rows in {}", records.len(), R::NAME);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use sea_orm::{ConnectionTrait, Statement};
    use std::str::FromStr;

    use crate::db::testing::memory_db;
    use crate::entity::{
        NewCustomer, NewDepartment, NewEmployee, NewProduct, NewProject, NewSale, NewSupplier,
    };

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn engineering() -> NewDepartment {
        NewDepartment {
            department_name: "Engineering".to_string(),
            place: "HQ".to_string(),
            department_head: 1,
        }
    }

    fn employee_in(department_id: i32, first_name: &str) -> NewEmployee {
        NewEmployee {
            first_name: first_name.to_string(),
            last_name: "Ruiz".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            department_id,
            hire_date: date("2023-02-01"),
            salary: dec("52000.50"),
            position: "Engineer".to_string(),
            manager_id: None,
        }
    }

    fn customer_named(name: &str) -> NewCustomer {
        NewCustomer {
            customer_name: name.to_string(),
            country: "Peru".to_string(),
            phone_number: "555-0100".to_string(),
            email: "buyer@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_one_then_list_all() {
        let db = memory_db().await;

        let created = create_one(&db, engineering()).await.unwrap();
        assert_eq!(created.department_id, 1);
        assert_eq!(created.department_name, "Engineering");

        let listed = list_all::<NewDepartment>(&db).await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_create_one_assigns_unused_ids() {
        let db = memory_db().await;
        let first = create_one(&db, customer_named("Andes SA")).await.unwrap();
        let second = create_one(&db, customer_named("Lima Corp")).await.unwrap();
        assert_ne!(first.customer_id, second.customer_id);

        let listed = list_all::<NewCustomer>(&db).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].customer_name, "Lima Corp");
        assert_eq!(listed[1].customer_id, second.customer_id);
    }

    #[tokio::test]
    async fn test_employee_requires_department() {
        let db = memory_db().await;
        let dept = create_one(&db, engineering()).await.unwrap();

        let ok = create_one(&db, employee_in(dept.department_id, "Ana")).await.unwrap();
        assert_eq!(ok.department_id, dept.department_id);
        assert_eq!(ok.salary, dec("52000.5"));

        let err = create_one(&db, employee_in(999, "Luis")).await.unwrap_err();
        assert!(matches!(err, AppError::Integrity(ref m) if m.contains("department_id 999")));

        assert_eq!(list_all::<NewEmployee>(&db).await.unwrap().len(), 1);
        assert_eq!(list_all::<NewDepartment>(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_manager_is_rejected() {
        let db = memory_db().await;
        let dept = create_one(&db, engineering()).await.unwrap();
        let mut emp = employee_in(dept.department_id, "Ana");
        emp.manager_id = Some(77);

        let err = create_one(&db, emp).await.unwrap_err();
        assert!(matches!(err, AppError::Integrity(ref m) if m.contains("manager_id 77")));
        assert!(list_all::<NewEmployee>(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_project_checks_every_reference() {
        let db = memory_db().await;
        let dept = create_one(&db, engineering()).await.unwrap();
        let lead = create_one(&db, employee_in(dept.department_id, "Ana")).await.unwrap();

        let project = NewProject {
            project_name: "Migration".to_string(),
            start_date: date("2024-01-01"),
            end_date: date("2024-06-30"),
            department_id: dept.department_id,
            employee_id: lead.employee_id,
            budget: dec("10000"),
            project_manager: 55,
        };
        let err = create_one(&db, project.clone()).await.unwrap_err();
        assert!(matches!(err, AppError::Integrity(ref m) if m.contains("project_manager 55")));

        let created = create_one(
            &db,
            NewProject {
                project_manager: lead.employee_id,
                ..project
            },
        )
        .await
        .unwrap();
        assert_eq!(created.project_manager, lead.employee_id);
    }

    #[tokio::test]
    async fn test_product_requires_supplier() {
        let db = memory_db().await;
        let err = create_one(
            &db,
            NewProduct {
                product_name: "Widget".to_string(),
                supplier_id: 3,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Integrity(_)));
        assert!(list_all::<NewProduct>(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sale_reports_every_missing_reference() {
        let db = memory_db().await;
        let sale = NewSale {
            sale_date: date("2024-03-10"),
            amount: dec("120.25"),
            product_id: 1,
            customer_id: 2,
            supplier_id: 3,
            employee_id: 4,
            project_id: Some(5),
        };
        let err = create_one(&db, sale).await.unwrap_err();
        let AppError::Integrity(message) = err else {
            panic!("expected integrity error");
        };
        for field in ["product_id 1", "customer_id 2", "supplier_id 3", "employee_id 4", "project_id 5"] {
            assert!(message.contains(field), "{} missing from {}", field, message);
        }
        assert!(list_all::<NewSale>(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_validation_runs_before_store() {
        let db = memory_db().await;
        let mut emp = employee_in(1, "Ana");
        emp.salary = dec("-1");
        let err = create_one(&db, emp).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "salary must not be negative"));
    }

    #[tokio::test]
    async fn test_create_many_returns_each_row() {
        let db = memory_db().await;
        let rows = create_many(
            &db,
            vec![customer_named("A"), customer_named("B"), customer_named("C")],
        )
        .await
        .unwrap();

        let ids: Vec<i32> = rows.iter().map(|r| r.customer_id).collect();
        let listed: Vec<i32> = list_all::<NewCustomer>(&db)
            .await
            .unwrap()
            .iter()
            .map(|r| r.customer_id)
            .collect();
        assert_eq!(ids, listed);
    }

    #[tokio::test]
    async fn test_create_many_empty_batch() {
        let db = memory_db().await;
        let rows = create_many::<NewSupplier>(&db, Vec::new()).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_create_many_is_all_or_nothing() {
        let db = memory_db().await;
        let dept = create_one(&db, engineering()).await.unwrap();

        let batch = vec![
            employee_in(dept.department_id, "Ana"),
            employee_in(999, "Luis"),
            employee_in(dept.department_id, "Marta"),
        ];
        let err = create_many(&db, batch).await.unwrap_err();
        assert!(
            matches!(err, AppError::Integrity(ref m) if m == "item 1: department_id 999 does not exist in departments")
        );
        assert!(list_all::<NewEmployee>(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_many_invalid_item_writes_nothing() {
        let db = memory_db().await;
        let mut bad = customer_named("B");
        bad.email = "not-an-address".to_string();

        let err = create_many(&db, vec![customer_named("A"), bad]).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.starts_with("item 1: email")));
        assert!(list_all::<NewCustomer>(&db).await.unwrap().is_empty());
    }

    /// A trigger inserts an extra customer as soon as the first batch row
    /// lands, standing in for a concurrent writer. Identifiers derived as
    /// `first_id + i` would hand the second batch row the intruder's id.
    #[tokio::test]
    async fn test_create_many_ids_survive_interleaved_writer() {
        let db = memory_db().await;
        db.execute(Statement::from_string(
            db.get_database_backend(),
            "CREATE TRIGGER interleaved_writer AFTER INSERT ON customers \
             WHEN NEW.customer_name = 'First' \
             BEGIN \
               INSERT INTO customers (customer_name, country, phone_number, email) \
               VALUES ('Intruder', 'Chile', '555-0199', 'x@example.com'); \
             END"
                .to_string(),
        ))
        .await
        .unwrap();

        let rows = create_many(&db, vec![customer_named("First"), customer_named("Second")])
            .await
            .unwrap();
        let first_id = rows[0].customer_id;
        let second_id = rows[1].customer_id;
        assert_ne!(second_id, first_id + 1, "offset arithmetic would collide here");

        let stored = list_all::<NewCustomer>(&db).await.unwrap();
        assert_eq!(stored.len(), 3);
        let by_id = |id: i32| stored.iter().find(|c| c.customer_id == id).unwrap();
        assert_eq!(by_id(first_id).customer_name, "First");
        assert_eq!(by_id(second_id).customer_name, "Second");
        assert_eq!(by_id(first_id + 1).customer_name, "Intruder");
    }

    #[tokio::test]
    async fn test_create_many_resolves_references_once() {
        let db = memory_db().await;
        let supplier = create_one(
            &db,
            NewSupplier {
                supplier_name: "Norte".to_string(),
                contact_info: "ventas@norte.example".to_string(),
                country: "Peru".to_string(),
                phone_number: "555-0111".to_string(),
            },
        )
        .await
        .unwrap();
        let products: Vec<NewProduct> = (0..5)
            .map(|i| NewProduct {
                product_name: format!("Part {}", i),
                supplier_id: supplier.supplier_id,
            })
            .collect();
        let rows = create_many(&db, products).await.unwrap();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|p| p.supplier_id == supplier.supplier_id));
    }
}
