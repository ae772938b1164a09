use std::fmt;

use ember_descriptor::{ArgsAndReturnType, TypeModel};
use serde::{Deserialize, Serialize};

use crate::entry::{FieldEntry, MethodEntry};
use crate::error::{Error, Result};
use crate::reflect::{ReflectedField, ReflectedMethod};

/// A method identified by owner, name and signature.
///
/// Equality is structural, so a method discovered through reflection compares
/// equal to the same method referenced from a constant pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodInfo {
    owner: TypeModel,
    name: String,
    signature: ArgsAndReturnType,
}

/// A field identified by owner, name and type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldInfo {
    owner: TypeModel,
    name: String,
    ty: TypeModel,
}

fn check_owner(owner: TypeModel) -> Result<TypeModel> {
    if owner.is_object() || owner.is_array() {
        Ok(owner)
    } else {
        Err(Error::OwnerNotAClass(owner.to_string()))
    }
}

impl MethodInfo {
    pub fn new(
        owner: TypeModel,
        name: impl Into<String>,
        signature: ArgsAndReturnType,
    ) -> Result<Self> {
        Ok(Self {
            owner: check_owner(owner)?,
            name: name.into(),
            signature,
        })
    }

    pub fn from_reflected(method: &dyn ReflectedMethod) -> Result<Self> {
        let signature =
            ArgsAndReturnType::from_reflected(method.parameter_types(), method.return_type());
        Self::new(
            TypeModel::from_reflected(method.declaring_class()),
            method.name(),
            signature,
        )
    }

    pub fn from_entry(entry: &MethodEntry) -> Result<Self> {
        Self::new(
            entry.containing_class()?,
            entry.name.as_str(),
            entry.args_and_return_type()?,
        )
    }

    pub fn owner(&self) -> &TypeModel {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &ArgsAndReturnType {
        &self.signature
    }

    /// Whether a reflected method has this method's return type.
    pub fn matches(&self, method: &dyn ReflectedMethod) -> bool {
        self.signature.matches_return(method.return_type())
    }
}

impl FieldInfo {
    pub fn new(owner: TypeModel, name: impl Into<String>, ty: TypeModel) -> Result<Self> {
        Ok(Self {
            owner: check_owner(owner)?,
            name: name.into(),
            ty,
        })
    }

    pub fn from_reflected(field: &dyn ReflectedField) -> Result<Self> {
        Self::new(
            TypeModel::from_reflected(field.declaring_class()),
            field.name(),
            TypeModel::from_reflected(field.field_type()),
        )
    }

    pub fn from_entry(entry: &FieldEntry) -> Result<Self> {
        Self::new(
            entry.containing_class()?,
            entry.name.as_str(),
            entry.field_type()?,
        )
    }

    pub fn owner(&self) -> &TypeModel {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeModel {
        &self.ty
    }
}

impl fmt::Display for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{}(", self.signature.return_type(), self.owner, self.name)?;
        for (idx, arg) in self.signature.args().iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg.ty())?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}.{}", self.ty, self.owner, self.name)
    }
}
