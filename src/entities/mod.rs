//! Entity module - the single authoritative schema for every table.
//!
//! Maintenance routines, core logic and API handlers all import these
//! definitions; no schema is declared anywhere else. Each entity has a Model
//! struct for data and an Entity struct for operations.

pub mod bill;
pub mod employee;
pub mod monthly_summary;
pub mod order;
pub mod password_reset;
pub mod recipe;
pub mod session;
pub mod shopping_bill;
pub mod shopping_item;
pub mod shopping_review;
pub mod user;

pub use bill::{Column as BillColumn, Entity as Bill, Model as BillModel};
pub use employee::{Column as EmployeeColumn, Entity as Employee, Model as EmployeeModel};
pub use monthly_summary::{
    Column as MonthlySummaryColumn, Entity as MonthlySummary, Model as MonthlySummaryModel,
};
pub use order::{Column as OrderColumn, Entity as Order, Model as OrderModel, OrderStatus};
pub use password_reset::{
    Column as PasswordResetColumn, Entity as PasswordReset, Model as PasswordResetModel,
};
pub use recipe::{Column as RecipeColumn, Entity as Recipe, Model as RecipeModel};
pub use session::{Column as SessionColumn, Entity as Session, Model as SessionModel};
pub use shopping_bill::{
    BillStatus, Column as ShoppingBillColumn, Entity as ShoppingBill, Model as ShoppingBillModel,
};
pub use shopping_item::{
    Column as ShoppingItemColumn, Entity as ShoppingItem, ItemStatus, Model as ShoppingItemModel,
};
pub use shopping_review::{
    Column as ShoppingReviewColumn, Entity as ShoppingReview, Model as ShoppingReviewModel,
    ReviewStatus,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel, Role};
