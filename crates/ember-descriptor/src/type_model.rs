use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grammar::{PrimitiveKind, ARRAY_DIM, CLASS_END, CLASS_START};
use crate::names::{dot_to_slash, slash_to_dot, slash_to_mangled};
use crate::reflect::ReflectedType;

const ARRAY_SUFFIX: &str = "[]";
const UNKNOWN_NAME: &str = "?";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Void,
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
    /// Internal (slash-separated) class name, e.g. `java/lang/String`.
    Object(String),
    /// Object reference whose class is not known.
    AnyObject,
}

impl TypeKind {
    pub fn primitive(&self) -> Option<PrimitiveKind> {
        let kind = match self {
            TypeKind::Void => PrimitiveKind::Void,
            TypeKind::Boolean => PrimitiveKind::Boolean,
            TypeKind::Byte => PrimitiveKind::Byte,
            TypeKind::Char => PrimitiveKind::Char,
            TypeKind::Short => PrimitiveKind::Short,
            TypeKind::Int => PrimitiveKind::Int,
            TypeKind::Long => PrimitiveKind::Long,
            TypeKind::Float => PrimitiveKind::Float,
            TypeKind::Double => PrimitiveKind::Double,
            TypeKind::Object(_) | TypeKind::AnyObject => return None,
        };
        Some(kind)
    }
}

impl From<PrimitiveKind> for TypeKind {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Void => TypeKind::Void,
            PrimitiveKind::Boolean => TypeKind::Boolean,
            PrimitiveKind::Byte => TypeKind::Byte,
            PrimitiveKind::Char => TypeKind::Char,
            PrimitiveKind::Short => TypeKind::Short,
            PrimitiveKind::Int => TypeKind::Int,
            PrimitiveKind::Long => TypeKind::Long,
            PrimitiveKind::Float => TypeKind::Float,
            PrimitiveKind::Double => TypeKind::Double,
        }
    }
}

/// How an operand is stored, as seen by bytecode operand typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreKind {
    Int,
    Long,
    Float,
    Double,
    Byte,
    Char,
    Short,
    Boolean,
    /// Array store; element type is unknown.
    Array,
    Object,
}

/// Where a [`TypeModel`] is being built from.
#[derive(Clone, Copy)]
pub enum TypeSource<'a> {
    Descriptor(&'a str),
    Reflected(&'a dyn ReflectedType),
    Store(StoreKind),
}

impl fmt::Debug for TypeSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSource::Descriptor(desc) => f.debug_tuple("Descriptor").field(desc).finish(),
            TypeSource::Reflected(ty) => f.debug_tuple("Reflected").field(&ty.name()).finish(),
            TypeSource::Store(kind) => f.debug_tuple("Store").field(kind).finish(),
        }
    }
}

/// Structured type: an element kind wrapped in `array_rank` array dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeModel {
    kind: TypeKind,
    array_rank: usize,
}

impl TypeModel {
    pub fn new(kind: TypeKind, array_rank: usize) -> Self {
        Self { kind, array_rank }
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(kind.into(), 0)
    }

    /// Object type from an internal name (`java/lang/String`).
    pub fn object(internal_name: impl Into<String>) -> Self {
        Self::new(TypeKind::Object(internal_name.into()), 0)
    }

    pub fn from_source(source: TypeSource<'_>) -> Result<Self> {
        match source {
            TypeSource::Descriptor(desc) => Self::parse(desc),
            TypeSource::Reflected(ty) => Ok(Self::from_reflected(ty)),
            TypeSource::Store(kind) => Ok(Self::from_store_kind(kind)),
        }
    }

    /// Decode a complete field descriptor such as `[[I` or `Ljava/lang/String;`.
    pub fn parse(desc: &str) -> Result<Self> {
        let (ty, rest) = Self::parse_prefix(desc)?;
        if !rest.is_empty() {
            return Err(Error::malformed(desc, "trailing characters after field type"));
        }
        Ok(ty)
    }

    /// Decode one field descriptor from the front of `desc`, returning the remainder.
    pub fn parse_prefix(desc: &str) -> Result<(Self, &str)> {
        let element = desc.trim_start_matches(ARRAY_DIM);
        let array_rank = desc.len() - element.len();

        let mut chars = element.chars();
        let Some(tag) = chars.next() else {
            return Err(Error::malformed(desc, "missing element type"));
        };

        if tag == CLASS_START {
            let body = chars.as_str();
            let Some(end) = body.find(CLASS_END) else {
                return Err(Error::malformed(desc, "unterminated class reference"));
            };
            if end == 0 {
                return Err(Error::malformed(desc, "empty class name"));
            }
            let ty = Self::new(TypeKind::Object(body[..end].to_string()), array_rank);
            return Ok((ty, &body[end + CLASS_END.len_utf8()..]));
        }

        match PrimitiveKind::from_tag(tag) {
            Some(kind) => Ok((Self::new(kind.into(), array_rank), chars.as_str())),
            None => Err(Error::malformed(desc, "unrecognized type tag")),
        }
    }

    /// Build from a runtime type handle, using its array introspection.
    pub fn from_reflected(ty: &dyn ReflectedType) -> Self {
        let mut array_rank = 0;
        let mut element = ty;
        while let Some(component) = element.component_type() {
            array_rank += 1;
            element = component;
        }

        let kind = match element.primitive() {
            Some(kind) => kind.into(),
            None => TypeKind::Object(dot_to_slash(&element.name())),
        };
        Self::new(kind, array_rank)
    }

    /// Coarse type for a store kind. [`StoreKind::Array`] becomes a rank-1
    /// array of [`TypeKind::AnyObject`]; its element type is not known.
    pub fn from_store_kind(kind: StoreKind) -> Self {
        match kind {
            StoreKind::Int => Self::primitive(PrimitiveKind::Int),
            StoreKind::Long => Self::primitive(PrimitiveKind::Long),
            StoreKind::Float => Self::primitive(PrimitiveKind::Float),
            StoreKind::Double => Self::primitive(PrimitiveKind::Double),
            StoreKind::Byte => Self::primitive(PrimitiveKind::Byte),
            StoreKind::Char => Self::primitive(PrimitiveKind::Char),
            StoreKind::Short => Self::primitive(PrimitiveKind::Short),
            StoreKind::Boolean => Self::primitive(PrimitiveKind::Boolean),
            StoreKind::Array => Self::new(TypeKind::AnyObject, 1),
            StoreKind::Object => Self::new(TypeKind::AnyObject, 0),
        }
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn array_rank(&self) -> usize {
        self.array_rank
    }

    pub fn is_array(&self) -> bool {
        self.array_rank > 0
    }

    pub fn is_void(&self) -> bool {
        self.kind == TypeKind::Void
    }

    pub fn is_boolean(&self) -> bool {
        self.kind == TypeKind::Boolean
    }

    pub fn is_byte(&self) -> bool {
        self.kind == TypeKind::Byte
    }

    pub fn is_char(&self) -> bool {
        self.kind == TypeKind::Char
    }

    pub fn is_short(&self) -> bool {
        self.kind == TypeKind::Short
    }

    pub fn is_int(&self) -> bool {
        self.kind == TypeKind::Int
    }

    pub fn is_long(&self) -> bool {
        self.kind == TypeKind::Long
    }

    pub fn is_float(&self) -> bool {
        self.kind == TypeKind::Float
    }

    pub fn is_double(&self) -> bool {
        self.kind == TypeKind::Double
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, TypeKind::Object(_) | TypeKind::AnyObject)
    }

    /// Any value-carrying primitive kind; `void` is not primitive.
    pub fn is_primitive(&self) -> bool {
        matches!(self.kind.primitive(), Some(kind) if kind != PrimitiveKind::Void)
    }

    /// Rank-`rank` array whose element kind is `kind`.
    pub fn is_array_of(&self, kind: PrimitiveKind, rank: usize) -> bool {
        self.is_array() && self.array_rank == rank && self.kind.primitive() == Some(kind)
    }

    pub fn is_array_of_objects(&self, rank: usize) -> bool {
        self.is_array() && self.array_rank == rank && self.is_object()
    }

    /// Internal class name (`java/lang/String`) of an object type.
    pub fn internal_name(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Object(name) => Some(name),
            _ => None,
        }
    }

    /// Canonical dotted class name (`java.lang.String`).
    pub fn object_class_name(&self) -> Result<String> {
        match &self.kind {
            TypeKind::Object(name) => Ok(slash_to_dot(name)),
            TypeKind::AnyObject => Err(Error::UnresolvedObjectClass),
            _ => Err(Error::ObjectNameOnNonObject(self.to_string())),
        }
    }

    /// Linkage-safe class name (`java_lang_String`).
    pub fn mangled_class_name(&self) -> Result<String> {
        match &self.kind {
            TypeKind::Object(name) => Ok(slash_to_mangled(name)),
            TypeKind::AnyObject => Err(Error::UnresolvedObjectClass),
            _ => Err(Error::MangledNameOnNonObject(self.to_string())),
        }
    }

    /// Element declaration name without array brackets: `int`, `java.lang.String`.
    pub fn java_name(&self) -> String {
        match &self.kind {
            TypeKind::Object(name) => slash_to_dot(name),
            TypeKind::AnyObject => UNKNOWN_NAME.to_string(),
            kind => kind
                .primitive()
                .map(|kind| kind.keyword().to_string())
                .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
        }
    }

    /// Declaration with array brackets: `int[][]`.
    pub fn declaration(&self) -> String {
        self.to_string()
    }

    /// Field descriptor for this type: `[[I`, `Ljava/lang/String;`.
    pub fn descriptor(&self) -> String {
        let mut out = String::new();
        for _ in 0..self.array_rank {
            out.push(ARRAY_DIM);
        }
        match &self.kind {
            TypeKind::Object(name) => {
                out.push(CLASS_START);
                out.push_str(name);
                out.push(CLASS_END);
            }
            TypeKind::AnyObject => out.push_str(UNKNOWN_NAME),
            kind => {
                if let Some(kind) = kind.primitive() {
                    out.push(kind.tag());
                }
            }
        }
        out
    }

    /// Whether a runtime type handle denotes this type.
    pub fn matches(&self, ty: &dyn ReflectedType) -> bool {
        Self::from_reflected(ty) == *self
    }
}

impl fmt::Display for TypeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.java_name())?;
        for _ in 0..self.array_rank {
            f.write_str(ARRAY_SUFFIX)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::reflect::RuntimeType;

    #[test]
    fn parse_primitives_and_arrays() {
        let int = TypeModel::parse("I").unwrap();
        assert_eq!(int, TypeModel::new(TypeKind::Int, 0));
        assert_eq!(int.declaration(), "int");

        let grid = TypeModel::parse("[[I").unwrap();
        assert_eq!(grid.kind(), &TypeKind::Int);
        assert_eq!(grid.array_rank(), 2);
        assert_eq!(grid.declaration(), "int[][]");
        assert!(grid.is_array_of(PrimitiveKind::Int, 2));
        assert!(!grid.is_array_of(PrimitiveKind::Int, 1));
        assert!(!grid.is_array_of(PrimitiveKind::Float, 2));
    }

    #[test]
    fn parse_class_reference() {
        let string = TypeModel::parse("Ljava/lang/String;").unwrap();
        assert_eq!(string.internal_name(), Some("java/lang/String"));
        assert_eq!(string.object_class_name().unwrap(), "java.lang.String");
        assert_eq!(string.mangled_class_name().unwrap(), "java_lang_String");
        assert_eq!(string.declaration(), "java.lang.String");
        assert!(string.is_object());
        assert!(!string.is_primitive());
    }

    #[test]
    fn unterminated_class_reference_is_malformed() {
        let err = TypeModel::parse("Ljava/lang/String").unwrap_err();
        assert_eq!(
            err,
            Error::MalformedDescriptor {
                descriptor: "Ljava/lang/String".to_string(),
                reason: "unterminated class reference",
            }
        );
    }

    #[test]
    fn empty_and_dangling_arrays_are_malformed() {
        assert!(matches!(
            TypeModel::parse(""),
            Err(Error::MalformedDescriptor { .. })
        ));
        assert!(matches!(
            TypeModel::parse("[["),
            Err(Error::MalformedDescriptor { .. })
        ));
        assert!(matches!(
            TypeModel::parse("Q"),
            Err(Error::MalformedDescriptor { .. })
        ));
        assert!(matches!(
            TypeModel::parse("II"),
            Err(Error::MalformedDescriptor { .. })
        ));
    }

    #[test]
    fn empty_class_name_is_malformed() {
        for desc in ["L;", "[L;", "[[L;I"] {
            assert_eq!(
                TypeModel::parse_prefix(desc).unwrap_err(),
                Error::MalformedDescriptor {
                    descriptor: desc.to_string(),
                    reason: "empty class name",
                }
            );
        }
    }

    #[test]
    fn parse_prefix_returns_remainder() {
        let (ty, rest) = TypeModel::parse_prefix("[Ljava/lang/Object;IJ").unwrap();
        assert!(ty.is_array_of_objects(1));
        assert_eq!(rest, "IJ");
    }

    #[test]
    fn primitive_predicates() {
        assert!(TypeModel::parse("Z").unwrap().is_primitive());
        assert!(TypeModel::parse("J").unwrap().is_long());
        assert!(!TypeModel::parse("V").unwrap().is_primitive());
        assert!(TypeModel::parse("V").unwrap().is_void());
    }

    #[test]
    fn non_object_names_are_precondition_errors() {
        let int = TypeModel::parse("[I").unwrap();
        assert_eq!(
            int.object_class_name(),
            Err(Error::ObjectNameOnNonObject("int[]".to_string()))
        );
        assert_eq!(
            int.mangled_class_name(),
            Err(Error::MangledNameOnNonObject("int[]".to_string()))
        );
    }

    #[test]
    fn reflected_types_match_descriptor_types() {
        let reflected = RuntimeType::array_of(RuntimeType::class("java.lang.String"), 2);
        let model = TypeModel::from_reflected(&reflected);
        assert_eq!(model, TypeModel::parse("[[Ljava/lang/String;").unwrap());
        assert!(model.matches(&reflected));

        let float = RuntimeType::from(PrimitiveKind::Float);
        assert_eq!(TypeModel::from_reflected(&float), TypeModel::parse("F").unwrap());
    }

    #[test]
    fn store_kinds_map_to_single_kinds() {
        let cases = [
            (StoreKind::Int, TypeModel::primitive(PrimitiveKind::Int)),
            (StoreKind::Long, TypeModel::primitive(PrimitiveKind::Long)),
            (StoreKind::Float, TypeModel::primitive(PrimitiveKind::Float)),
            (StoreKind::Double, TypeModel::primitive(PrimitiveKind::Double)),
            (StoreKind::Byte, TypeModel::primitive(PrimitiveKind::Byte)),
            (StoreKind::Char, TypeModel::primitive(PrimitiveKind::Char)),
            (StoreKind::Short, TypeModel::primitive(PrimitiveKind::Short)),
            (StoreKind::Boolean, TypeModel::primitive(PrimitiveKind::Boolean)),
            (StoreKind::Array, TypeModel::new(TypeKind::AnyObject, 1)),
            (StoreKind::Object, TypeModel::new(TypeKind::AnyObject, 0)),
        ];
        for (kind, expected) in cases {
            assert_eq!(TypeModel::from_store_kind(kind), expected, "{kind:?}");
        }

        let object = TypeModel::from_store_kind(StoreKind::Object);
        assert!(object.is_object());
        assert!(!object.is_array());

        let array = TypeModel::from_store_kind(StoreKind::Array);
        assert!(array.is_array_of_objects(1));
        assert_eq!(array.object_class_name(), Err(Error::UnresolvedObjectClass));
        assert_eq!(array.declaration(), "?[]");
    }

    #[test]
    fn from_source_dispatches_each_origin() {
        let reflected = RuntimeType::from(PrimitiveKind::Char);
        let sources = [
            TypeSource::Descriptor("C"),
            TypeSource::Reflected(&reflected),
            TypeSource::Store(StoreKind::Char),
        ];
        for source in sources {
            assert_eq!(
                TypeModel::from_source(source).unwrap(),
                TypeModel::primitive(PrimitiveKind::Char),
                "{source:?}"
            );
        }
    }

    #[test]
    fn descriptor_reconstructs_input() {
        for desc in ["I", "[[D", "Ljava/lang/String;", "[Lpkg/Outer$Inner;", "V"] {
            assert_eq!(TypeModel::parse(desc).unwrap().descriptor(), desc);
        }
    }
}
