//! Member descriptions shared by reflection and constant-pool lookups.

#![forbid(unsafe_code)]

mod entry;
mod error;
mod member;
mod reflect;
mod registry;

pub use crate::entry::{FieldEntry, MethodEntry};
pub use crate::error::{Error, Result};
pub use crate::member::{FieldInfo, MethodInfo};
pub use crate::reflect::{ReflectedField, ReflectedMethod, RuntimeField, RuntimeMethod};
pub use crate::registry::{MemberId, MemberRegistry};
