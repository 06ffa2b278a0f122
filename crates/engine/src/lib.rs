//! Settlement engine for shared-expense events.
//!
//! An [`Event`] owns members, expenses and donations. From a [`Snapshot`] of
//! those collections the engine derives:
//!
//! - the event [`Totals`] (see [`totals`]),
//! - each member's signed balance against the treasury and the
//!   [`SettlementPlan`] (see [`settlement`]).
//!
//! Every derived value is a pure function of the snapshot. Mutations go through
//! the validated methods on [`Event`] (see [`validate`] for the rules).
//!
//! ```rust
//! use engine::{Event, MemberType, Money, NewExpense, settlement};
//!
//! let mut event = Event::new("Trip").unwrap();
//! event.add_member("Alice", MemberType::Contributing).unwrap();
//! event.add_member("Bob", MemberType::Contributing).unwrap();
//! event
//!     .add_expense(NewExpense::new("Dinner", Money::from_cents(100_00), "Alice"))
//!     .unwrap();
//!
//! let snapshot = event.snapshot();
//! assert_eq!(settlement::balance_of(snapshot, "Alice"), Money::from_cents(50_00));
//! assert_eq!(settlement::balance_of(snapshot, "Bob"), Money::from_cents(-50_00));
//! ```

pub use commands::NewExpense;
pub use currency::Currency;
pub use donations::Donation;
pub use error::EngineError;
pub use event::{Event, Snapshot};
pub use expenses::{Contributor, Expense};
pub use members::{Member, MemberType};
pub use money::Money;
pub use report::Report;
pub use settlement::{MemberBalance, SettlementLine, SettlementPlan};
pub use totals::Totals;

mod commands;
mod currency;
mod donations;
mod error;
mod event;
mod expenses;
mod members;
mod money;
mod ops;
pub mod report;
pub mod settlement;
pub mod totals;
pub mod validate;

type ResultEngine<T> = Result<T, EngineError>;
