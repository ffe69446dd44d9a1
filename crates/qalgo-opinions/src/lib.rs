//! Visitor opinions about the algorithm demos.
//!
//! A submission arrives as an [`OpinionForm`], is checked by
//! [`OpinionForm::validate`] into a [`NewOpinion`], and is stored through an
//! [`OpinionStore`]. Opinion texts are unique; a second submission with the
//! same text is rejected and leaves the table untouched.
//!
//! ```rust
//! use qalgo_opinions::{MemoryOpinionStore, OpinionForm, OpinionStore};
//!
//! # tokio_test_block(async {
//! let store = MemoryOpinionStore::new();
//! let form = OpinionForm {
//!     title: "Grover".into(),
//!     text: "Quadratic, not exponential.".into(),
//!     source: None,
//! };
//! let stored = store.insert(form.validate().unwrap()).await.unwrap();
//! assert_eq!(store.get(stored.id).await.unwrap(), Some(stored));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod error;
pub mod model;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use model::{
    FieldError, NewOpinion, Opinion, OpinionForm, SOURCE_MAX, TITLE_MAX, ValidationErrors,
};
pub use store::{MemoryOpinionStore, OpinionStore, SqliteOpinionStore};
