//! Generic filtered list building blocks shared by every list page.

pub mod controller;
pub mod debounce;
pub mod filters;
pub mod pagination;
pub mod query;
pub mod table;

pub use controller::{ListController, ListStatus, NotificationKind, Notifier, PageSource};
pub use filters::{FilterField, FilterKind, FilterMap, FilterValue};
pub use query::{PageEnvelope, PageQuery, SortDirection, SortSpec};
