//! Single-character tags of the descriptor grammar.
//!
//! ```text
//! FieldDescriptor   ::= '['* ( PrimitiveTag | 'L' SlashName ';' )
//! MethodDescriptor  ::= '(' FieldDescriptor* ')' FieldDescriptor
//! PrimitiveTag      ::= V Z B C S I J F D
//! ```

use serde::{Deserialize, Serialize};

pub const VOID: char = 'V';
pub const BOOLEAN: char = 'Z';
pub const BYTE: char = 'B';
pub const CHAR: char = 'C';
pub const SHORT: char = 'S';
pub const INT: char = 'I';
pub const LONG: char = 'J';
pub const FLOAT: char = 'F';
pub const DOUBLE: char = 'D';

pub const ARRAY_DIM: char = '[';
pub const CLASS_START: char = 'L';
pub const CLASS_END: char = ';';
pub const ARG_START: char = '(';
pub const ARG_END: char = ')';

pub const SLASH: char = '/';
pub const DOT: char = '.';
pub const UNDERSCORE: char = '_';

/// Tags that only appear in annotation element values.
pub const ANNOTATION_STRING: char = 's';
pub const ANNOTATION_ENUM: char = 'e';
pub const ANNOTATION_CLASS: char = 'c';
pub const ANNOTATION_NESTED: char = '@';
pub const ANNOTATION_ARRAY: char = 'a';

/// A primitive (or `void`) type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Void,
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 9] = [
        PrimitiveKind::Void,
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Char,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            VOID => Some(PrimitiveKind::Void),
            BOOLEAN => Some(PrimitiveKind::Boolean),
            BYTE => Some(PrimitiveKind::Byte),
            CHAR => Some(PrimitiveKind::Char),
            SHORT => Some(PrimitiveKind::Short),
            INT => Some(PrimitiveKind::Int),
            LONG => Some(PrimitiveKind::Long),
            FLOAT => Some(PrimitiveKind::Float),
            DOUBLE => Some(PrimitiveKind::Double),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            PrimitiveKind::Void => VOID,
            PrimitiveKind::Boolean => BOOLEAN,
            PrimitiveKind::Byte => BYTE,
            PrimitiveKind::Char => CHAR,
            PrimitiveKind::Short => SHORT,
            PrimitiveKind::Int => INT,
            PrimitiveKind::Long => LONG,
            PrimitiveKind::Float => FLOAT,
            PrimitiveKind::Double => DOUBLE,
        }
    }

    /// Source-language keyword, e.g. `int`.
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Void => "void",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }
}

/// Kind of an annotation element-value tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationTag {
    String,
    Enum,
    Class,
    Annotation,
    Array,
}

/// Every tag character the grammar knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Primitive(PrimitiveKind),
    ArrayDim,
    ClassStart,
    ClassEnd,
    ArgStart,
    ArgEnd,
    Annotation(AnnotationTag),
}

impl Tag {
    pub fn classify(tag: char) -> Option<Tag> {
        if let Some(kind) = PrimitiveKind::from_tag(tag) {
            return Some(Tag::Primitive(kind));
        }
        let tag = match tag {
            ARRAY_DIM => Tag::ArrayDim,
            CLASS_START => Tag::ClassStart,
            CLASS_END => Tag::ClassEnd,
            ARG_START => Tag::ArgStart,
            ARG_END => Tag::ArgEnd,
            ANNOTATION_STRING => Tag::Annotation(AnnotationTag::String),
            ANNOTATION_ENUM => Tag::Annotation(AnnotationTag::Enum),
            ANNOTATION_CLASS => Tag::Annotation(AnnotationTag::Class),
            ANNOTATION_NESTED => Tag::Annotation(AnnotationTag::Annotation),
            ANNOTATION_ARRAY => Tag::Annotation(AnnotationTag::Array),
            _ => return None,
        };
        Some(tag)
    }
}

/// Classify `tag` as a primitive kind; `None` for every other character.
pub fn classify(tag: char) -> Option<PrimitiveKind> {
    PrimitiveKind::from_tag(tag)
}

/// Map a primitive tag (say `I`) to its type name (`int`).
pub fn name_of(tag: char) -> Option<&'static str> {
    classify(tag).map(PrimitiveKind::keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_tags_map_to_keywords() {
        let expected = [
            ('V', "void"),
            ('Z', "boolean"),
            ('B', "byte"),
            ('C', "char"),
            ('S', "short"),
            ('I', "int"),
            ('J', "long"),
            ('F', "float"),
            ('D', "double"),
        ];
        for (tag, keyword) in expected {
            assert_eq!(name_of(tag), Some(keyword), "tag {tag}");
        }
    }

    #[test]
    fn non_primitive_tags_have_no_name() {
        for tag in ['L', '[', ';', '(', ')', 's', 'e', 'c', '@', 'a', 'Q', 'i', ' '] {
            assert_eq!(name_of(tag), None, "tag {tag:?}");
            assert_eq!(classify(tag), None, "tag {tag:?}");
        }
    }

    #[test]
    fn tag_round_trips_through_primitive_kind() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(PrimitiveKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn structural_and_annotation_tags_classify() {
        assert_eq!(Tag::classify('['), Some(Tag::ArrayDim));
        assert_eq!(Tag::classify('L'), Some(Tag::ClassStart));
        assert_eq!(Tag::classify(';'), Some(Tag::ClassEnd));
        assert_eq!(Tag::classify('('), Some(Tag::ArgStart));
        assert_eq!(Tag::classify(')'), Some(Tag::ArgEnd));
        assert_eq!(
            Tag::classify('@'),
            Some(Tag::Annotation(AnnotationTag::Annotation))
        );
        assert_eq!(Tag::classify('s'), Some(Tag::Annotation(AnnotationTag::String)));
        assert_eq!(Tag::classify('J'), Some(Tag::Primitive(PrimitiveKind::Long)));
        assert_eq!(Tag::classify('x'), None);
    }
}
