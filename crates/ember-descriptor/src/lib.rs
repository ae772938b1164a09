//! Type and method-signature model for offloaded kernels.
//!
//! Decodes JVM type descriptors (`[I`, `Ljava/lang/String;`, `(IJ)V`) into
//! [`TypeModel`] / [`ArgsAndReturnType`] values, and renders them back as
//! declarations, canonical dotted names, or mangled linkage names.

#![forbid(unsafe_code)]

pub mod grammar;
pub mod names;

mod error;
mod method;
mod reflect;
mod render;
mod type_model;

pub use crate::error::{Error, Result};
pub use crate::grammar::{classify, name_of, AnnotationTag, PrimitiveKind, Tag};
pub use crate::method::{Arg, ArgsAndReturnType};
pub use crate::reflect::{ReflectedType, RuntimeType};
pub use crate::render::{convert, convert_with, RenderOptions};
pub use crate::type_model::{StoreKind, TypeKind, TypeModel, TypeSource};
