// Search inputs and outputs: optional-field conditions, sorting and paging

pub mod condition;
pub mod page;
pub mod sort;

pub use condition::{MemberPredicate, MemberSearchCondition};
pub use page::{Page, PageParams, PageRequest, PageSettings};
pub use sort::{Direction, Sort, SortOrder, SortProperty};
