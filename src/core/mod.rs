pub mod batch;
pub mod class;
pub mod presenter;
pub mod registry;

pub use crate::domain::model::{AttrValue, ExposeOptions, ExposureSpec, Record, SubjectRole};
pub use crate::domain::ports::{Block, Helpers, Subject, SubjectRef};
pub use crate::utils::error::Result;
