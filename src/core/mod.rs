pub mod allocate;
pub mod balance;
pub mod dates;
pub mod document;
pub mod error;
pub mod house;
pub mod residency;

// Flat public surface for domain types and functions.
pub use allocate::Dues;
pub use balance::{compute, SplitReport};
pub use document::{sort_by_date, Document};
pub use error::SplitError;
#[allow(unused_imports)]
pub use dates::DateRange;
#[allow(unused_imports)]
pub use house::{Expense, House, Payment, Person};
