//! Entity module - SeaORM entity definitions
//!
//! One table per business record type, each with its creation payload.

pub mod customer;
pub mod department;
pub mod employee;
pub mod product;
pub mod project;
pub mod sale;
pub mod supplier;

pub use customer::NewCustomer;
pub use department::NewDepartment;
pub use employee::NewEmployee;
pub use product::NewProduct;
pub use project::NewProject;
pub use sale::NewSale;
pub use supplier::NewSupplier;
