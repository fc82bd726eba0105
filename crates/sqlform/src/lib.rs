//! # sqlform
//!
//! Compose SQL statement text from form-style input.
//!
//! There is no database connection here: a [`QueryRequest`] (table, field
//! list, aliases, filter rows or a raw condition, values, sort options) is
//! validated and joined into a single SQL string.
//!
//! ## Features
//!
//! - **SELECT / INSERT / UPDATE / DELETE** selected by a case-insensitive token
//! - **Positional aliases**: `id,name` + `user_id,` gives `id AS user_id, name`
//! - **Typed field lists**: `name TEXT, age INT` selects `name, age`
//! - **Literal detection**: numeric filter values are unquoted, others quoted
//! - **Fail fast**: missing input is a [`ComposeError`], never partial SQL
//!
//! ```
//! use sqlform::{QueryRequest, compose};
//!
//! let sql = compose(&QueryRequest::delete("sessions").conditions("expired = 1")).unwrap();
//! assert_eq!(sql, "DELETE FROM sessions WHERE expired = 1");
//! ```

pub mod composer;
pub mod error;
pub mod field;
pub mod filter;
pub mod kind;
pub mod request;

pub use composer::compose;
pub use error::{ComposeError, ComposeResult};
pub use field::{FieldSpec, FieldSyntax, parse_aliased_fields, parse_fields, select_list};
pub use filter::{CompareOp, Filter, FilterClause, Literal, filter_rows, is_numeric};
pub use kind::QueryKind;
pub use request::{QueryRequest, SortDirection};
