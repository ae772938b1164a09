//! Reflected member handles supplied by the host runtime.

use ember_descriptor::{ReflectedType, RuntimeType};
use serde::{Deserialize, Serialize};

pub trait ReflectedMethod {
    fn declaring_class(&self) -> &dyn ReflectedType;
    fn name(&self) -> &str;
    fn parameter_types(&self) -> Vec<&dyn ReflectedType>;
    fn return_type(&self) -> &dyn ReflectedType;
}

pub trait ReflectedField {
    fn declaring_class(&self) -> &dyn ReflectedType;
    fn name(&self) -> &str;
    fn field_type(&self) -> &dyn ReflectedType;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeMethod {
    pub declaring_class: RuntimeType,
    pub name: String,
    pub parameter_types: Vec<RuntimeType>,
    pub return_type: RuntimeType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeField {
    pub declaring_class: RuntimeType,
    pub name: String,
    pub field_type: RuntimeType,
}

impl ReflectedMethod for RuntimeMethod {
    fn declaring_class(&self) -> &dyn ReflectedType {
        &self.declaring_class
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parameter_types(&self) -> Vec<&dyn ReflectedType> {
        self.parameter_types
            .iter()
            .map(|ty| ty as &dyn ReflectedType)
            .collect()
    }

    fn return_type(&self) -> &dyn ReflectedType {
        &self.return_type
    }
}

impl ReflectedField for RuntimeField {
    fn declaring_class(&self) -> &dyn ReflectedType {
        &self.declaring_class
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn field_type(&self) -> &dyn ReflectedType {
        &self.field_type
    }
}
