//! Foreign-key existence checks
//!
//! Every reference a payload carries is looked up before the write, inside
//! the write's transaction.

use std::collections::HashMap;
use std::fmt;

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PaginatorTrait};

use crate::entity::{customer, department, employee, product, project, supplier};

/// Table a reference points into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Department,
    Employee,
    Project,
    Customer,
    Supplier,
    Product,
}

impl Target {
    pub fn table(self) -> &'static str {
        match self {
            Target::Department => "departments",
            Target::Employee => "employees",
            Target::Project => "projects",
            Target::Customer => "customers",
            Target::Supplier => "suppliers",
            Target::Product => "products",
        }
    }

    async fn exists<C: ConnectionTrait>(self, conn: &C, id: i32) -> Result<bool, DbErr> {
        let count = match self {
            Target::Department => department::Entity::find_by_id(id).count(conn).await?,
            Target::Employee => employee::Entity::find_by_id(id).count(conn).await?,
            Target::Project => project::Entity::find_by_id(id).count(conn).await?,
            Target::Customer => customer::Entity::find_by_id(id).count(conn).await?,
            Target::Supplier => supplier::Entity::find_by_id(id).count(conn).await?,
            Target::Product => product::Entity::find_by_id(id).count(conn).await?,
        };
        Ok(count > 0)
    }
}

/// One foreign key value carried by a payload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reference {
    pub field: &'static str,
    pub target: Target,
    pub id: i32,
}

impl Reference {
    pub fn new(field: &'static str, target: Target, id: i32) -> Self {
        Self { field, target, id }
    }

    /// Reference for a nullable column; `None` carries nothing to check
    pub fn optional(field: &'static str, target: Target, id: Option<i32>) -> Option<Self> {
        id.map(|id| Self::new(field, target, id))
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} does not exist in {}", self.field, self.id, self.target.table())
    }
}

/// A reference that failed its lookup, with the batch position it came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Missing {
    pub item: usize,
    pub reference: Reference,
}

/// Look up every reference, returning the ones with no target row.
///
/// Each distinct (table, id) pair is queried once.
pub async fn find_missing<C: ConnectionTrait>(
    conn: &C,
    refs: Vec<(usize, Reference)>,
) -> Result<Vec<Missing>, DbErr> {
    let mut known: HashMap<(Target, i32), bool> = HashMap::new();
    let mut missing = Vec::new();

    for (item, reference) in refs {
        let key = (reference.target, reference.id);
        let exists = match known.get(&key) {
            Some(exists) => *exists,
            None => {
                let exists = reference.target.exists(conn, reference.id).await?;
                known.insert(key, exists);
                exists
            }
        };
        if !exists {
            missing.push(Missing { item, reference });
        }
    }

    Ok(missing)
}

/// Human-readable summary; batch mode prefixes each entry with its item index
pub fn describe(missing: &[Missing], batch: bool) -> String {
    missing
        .iter()
        .map(|m| {
            if batch {
                format!("item {}: {}", m.item, m.reference)
            } else {
                m.reference.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::memory_db;
    use crate::entity::NewDepartment;
    use crate::gateway::create_one;

    #[test]
    fn test_reference_display() {
        let r = Reference::new("supplier_id", Target::Supplier, 42);
        assert_eq!(r.to_string(), "supplier_id 42 does not exist in suppliers");
        assert!(Reference::optional("manager_id", Target::Employee, None).is_none());
    }

    #[test]
    fn test_describe_batch_prefixes_items() {
        let missing = vec![
            Missing {
                item: 0,
                reference: Reference::new("department_id", Target::Department, 9),
            },
            Missing {
                item: 3,
                reference: Reference::new("manager_id", Target::Employee, 12),
            },
        ];
        assert_eq!(
            describe(&missing, true),
            "item 0: department_id 9 does not exist in departments; \
             item 3: manager_id 12 does not exist in employees"
        );
        assert_eq!(
            describe(&missing[..1], false),
            "department_id 9 does not exist in departments"
        );
    }

    #[tokio::test]
    async fn test_find_missing_against_store() {
        let db = memory_db().await;
        let dept = create_one(
            &db,
            NewDepartment {
                department_name: "Engineering".to_string(),
                place: "HQ".to_string(),
                department_head: 1,
            },
        )
        .await
        .unwrap();

        let refs = vec![
            (0, Reference::new("department_id", Target::Department, dept.department_id)),
            (1, Reference::new("department_id", Target::Department, 999)),
            (2, Reference::new("department_id", Target::Department, 999)),
            (2, Reference::new("supplier_id", Target::Supplier, 1)),
        ];
        let missing = find_missing(&db, refs).await.unwrap();
        let items: Vec<usize> = missing.iter().map(|m| m.item).collect();
        assert_eq!(items, vec![1, 2, 2]);
        assert_eq!(missing[2].reference.target, Target::Supplier);
    }
}
