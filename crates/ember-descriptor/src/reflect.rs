//! Reflected type handles supplied by the host runtime.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::grammar::{PrimitiveKind, ARRAY_DIM, CLASS_END, CLASS_START};

/// A type handle obtained through the host runtime's introspection.
///
/// Arrays are described by their component type, not by re-parsing a name.
pub trait ReflectedType {
    /// Runtime name, e.g. `int`, `java.lang.String` or `[I`.
    fn name(&self) -> Cow<'_, str>;

    /// `Some` when this handle is one of the primitive (or `void`) handles.
    fn primitive(&self) -> Option<PrimitiveKind>;

    /// Component type when this handle is an array.
    fn component_type(&self) -> Option<&dyn ReflectedType>;

    fn is_array(&self) -> bool {
        self.component_type().is_some()
    }
}

/// Host-independent reflected type value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuntimeType {
    Primitive(PrimitiveKind),
    /// Dotted binary name, e.g. `java.util.Map$Entry`.
    Class(String),
    Array(Box<RuntimeType>),
}

impl RuntimeType {
    pub fn class(name: impl Into<String>) -> Self {
        RuntimeType::Class(name.into())
    }

    pub fn array_of(element: RuntimeType, rank: usize) -> Self {
        (0..rank).fold(element, |ty, _| RuntimeType::Array(Box::new(ty)))
    }

    fn push_array_name(&self, out: &mut String) {
        match self {
            RuntimeType::Primitive(kind) => out.push(kind.tag()),
            RuntimeType::Class(name) => {
                out.push(CLASS_START);
                out.push_str(name);
                out.push(CLASS_END);
            }
            RuntimeType::Array(component) => {
                out.push(ARRAY_DIM);
                component.push_array_name(out);
            }
        }
    }
}

impl From<PrimitiveKind> for RuntimeType {
    fn from(kind: PrimitiveKind) -> Self {
        RuntimeType::Primitive(kind)
    }
}

impl ReflectedType for RuntimeType {
    fn name(&self) -> Cow<'_, str> {
        match self {
            RuntimeType::Primitive(kind) => Cow::Borrowed(kind.keyword()),
            RuntimeType::Class(name) => Cow::Borrowed(name),
            RuntimeType::Array(_) => {
                let mut out = String::new();
                self.push_array_name(&mut out);
                Cow::Owned(out)
            }
        }
    }

    fn primitive(&self) -> Option<PrimitiveKind> {
        match self {
            RuntimeType::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    fn component_type(&self) -> Option<&dyn ReflectedType> {
        match self {
            RuntimeType::Array(component) => Some(component.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_names_follow_runtime_convention() {
        let ints = RuntimeType::array_of(PrimitiveKind::Int.into(), 2);
        assert_eq!(ints.name(), "[[I");

        let strings = RuntimeType::array_of(RuntimeType::class("java.lang.String"), 1);
        assert_eq!(strings.name(), "[Ljava.lang.String;");
        assert!(strings.is_array());
    }

    #[test]
    fn scalar_names() {
        assert_eq!(RuntimeType::from(PrimitiveKind::Boolean).name(), "boolean");
        assert_eq!(RuntimeType::class("java.lang.Object").name(), "java.lang.Object");
        assert!(!RuntimeType::class("java.lang.Object").is_array());
    }
}
