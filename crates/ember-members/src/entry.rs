use ember_descriptor::{names, ArgsAndReturnType, TypeModel};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A field reference as it appears in a class's constant pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    /// Internal name of the owning class, e.g. `java/lang/System`.
    pub class_name: String,
    pub name: String,
    /// Field descriptor, e.g. `I` or `Ljava/io/PrintStream;`.
    pub descriptor: String,
}

/// A method reference as it appears in a class's constant pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodEntry {
    /// Internal name of the owning class. Array classes use their descriptor (`[I`).
    pub class_name: String,
    pub name: String,
    /// Method descriptor, e.g. `(Ljava/lang/String;)V`.
    pub descriptor: String,
}

impl FieldEntry {
    pub fn new(
        class_name: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    pub fn containing_class(&self) -> Result<TypeModel> {
        class_entry_type(&self.class_name)
    }

    pub fn field_type(&self) -> Result<TypeModel> {
        Ok(TypeModel::parse(&self.descriptor)?)
    }
}

impl MethodEntry {
    pub fn new(
        class_name: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    pub fn containing_class(&self) -> Result<TypeModel> {
        class_entry_type(&self.class_name)
    }

    pub fn args_and_return_type(&self) -> Result<ArgsAndReturnType> {
        Ok(ArgsAndReturnType::parse(&self.descriptor)?)
    }

    /// Dotted owner name, e.g. `java.lang.Math`.
    pub fn binary_class_name(&self) -> String {
        names::slash_to_dot(&self.class_name)
    }
}

/// Class entries hold internal names, except for array classes which hold a
/// field descriptor.
fn class_entry_type(class_name: &str) -> Result<TypeModel> {
    if class_name.starts_with(ember_descriptor::grammar::ARRAY_DIM) {
        return Ok(TypeModel::parse(class_name)?);
    }
    Ok(TypeModel::object(class_name))
}
