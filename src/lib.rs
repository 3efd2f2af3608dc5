//! Presenters: curated, renamed views over domain objects.
//!
//! A [`PresenterClass`] declares the subject roles it accepts and the
//! attributes it exposes; a [`Presenter`] binds concrete subjects and
//! forwards each exposed call to the right one, falling back to a nested
//! accessor on the default subject for roles that were never declared.

pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::PresenterConfig;

pub use crate::core::{class::PresenterClass, presenter::Presenter, registry::PresenterRegistry};
pub use domain::model::{AttrValue, ExposeOptions, ExposureSpec, Record, SubjectRole};
pub use domain::ports::{Block, Helpers, Subject, SubjectRef};
pub use utils::error::{PresenterError, Result};
