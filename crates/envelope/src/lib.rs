#![doc = include_str!("../README.md")]

pub mod error;
pub mod payload;
pub mod page;
pub mod resource;
pub mod collection;
pub mod dropdown;
pub mod error_bag;
pub mod response;

mod normalize;

pub use crate::collection::Collection;
pub use crate::dropdown::{DropdownOptions, DropdownSource, Prepend, dropdown};
pub use crate::error::{Error, Result};
pub use crate::error_bag::ErrorBag;
pub use crate::page::{Page, Paginated};
pub use crate::payload::Payload;
pub use crate::resource::{Entity, Host, Resource, Transformer};
pub use crate::response::ApiResponse;
