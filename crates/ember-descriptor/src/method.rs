use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grammar::Tag;
use crate::reflect::ReflectedType;
use crate::type_model::TypeModel;

/// One argument of a method descriptor and its zero-based position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arg {
    ty: TypeModel,
    position: usize,
}

impl Arg {
    pub fn new(ty: TypeModel, position: usize) -> Self {
        Self { ty, position }
    }

    pub fn ty(&self) -> &TypeModel {
        &self.ty
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

fn push_arg(args: &mut Vec<Arg>, span: &str) -> Result<()> {
    let position = args.len();
    args.push(Arg::new(TypeModel::parse(span)?, position));
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Skipping,
    InArgs,
    InClass,
    InArray,
    Done,
}

/// Ordered argument types and return type of a method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArgsAndReturnType {
    args: Vec<Arg>,
    return_type: TypeModel,
}

impl ArgsAndReturnType {
    /// Parse a full method descriptor such as `(I[Ljava/lang/String;)V`.
    pub fn parse(desc: &str) -> Result<Self> {
        let result = Self::parse_inner(desc);
        match &result {
            Ok(parsed) => tracing::debug!(
                target: "ember.descriptor",
                descriptor = desc,
                arity = parsed.args.len(),
                return_type = %parsed.return_type,
                "parsed method descriptor"
            ),
            Err(err) => tracing::debug!(
                target: "ember.descriptor",
                descriptor = desc,
                error = %err,
                "failed to parse method descriptor"
            ),
        }
        result
    }

    fn parse_inner(desc: &str) -> Result<Self> {
        let mut state = ParseState::Skipping;
        let mut args: Vec<Arg> = Vec::new();
        let mut start = 0;
        let mut return_type = None;

        for (pos, ch) in desc.char_indices() {
            let end = pos + ch.len_utf8();
            let tag = Tag::classify(ch);
            state = match (state, tag) {
                (ParseState::InArgs, Some(Tag::ArgEnd)) => {
                    return_type = Some(TypeModel::parse(&desc[end..]).map_err(|err| match err {
                        Error::MalformedDescriptor { reason, .. } => Error::malformed(desc, reason),
                        other => other,
                    })?);
                    ParseState::Done
                }
                (_, Some(Tag::ArgEnd)) if state != ParseState::Skipping => {
                    return Err(Error::malformed(desc, "argument list closed mid-type"));
                }
                (ParseState::Skipping, Some(Tag::ArgStart)) => ParseState::InArgs,
                (ParseState::Skipping, Some(Tag::ArgEnd)) => {
                    return Err(Error::malformed(desc, "argument list closed before opening"));
                }
                (ParseState::Skipping, _) => ParseState::Skipping,
                (ParseState::InArgs, Some(Tag::ArrayDim)) => {
                    start = pos;
                    ParseState::InArray
                }
                (ParseState::InArray, Some(Tag::ArrayDim)) => ParseState::InArray,
                (ParseState::InArgs, Some(Tag::ClassStart)) => {
                    start = pos;
                    ParseState::InClass
                }
                (ParseState::InArray, Some(Tag::ClassStart)) => ParseState::InClass,
                (ParseState::InClass, Some(Tag::ClassEnd)) => {
                    push_arg(&mut args, &desc[start..end])?;
                    ParseState::InArgs
                }
                (ParseState::InClass, _) => ParseState::InClass,
                (ParseState::InArgs, Some(Tag::Primitive(_))) => {
                    push_arg(&mut args, &desc[pos..end])?;
                    ParseState::InArgs
                }
                (ParseState::InArray, Some(Tag::Primitive(_))) => {
                    push_arg(&mut args, &desc[start..end])?;
                    ParseState::InArgs
                }
                (ParseState::InArgs | ParseState::InArray, _) => {
                    return Err(Error::malformed(desc, "unexpected character in argument list"));
                }
                (ParseState::Done, _) => ParseState::Done,
            };
            if state == ParseState::Done {
                break;
            }
        }

        match return_type {
            Some(return_type) => Ok(Self { args, return_type }),
            None => Err(Error::malformed(desc, "unterminated argument list")),
        }
    }

    /// Build from a reflected method's parameter and return types.
    pub fn from_reflected<'a>(
        parameter_types: impl IntoIterator<Item = &'a dyn ReflectedType>,
        return_type: &dyn ReflectedType,
    ) -> Self {
        let args = parameter_types
            .into_iter()
            .enumerate()
            .map(|(position, ty)| Arg::new(TypeModel::from_reflected(ty), position))
            .collect();
        Self {
            args,
            return_type: TypeModel::from_reflected(return_type),
        }
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn return_type(&self) -> &TypeModel {
        &self.return_type
    }

    /// Whether `return_type` denotes this method's return type.
    pub fn matches_return(&self, return_type: &dyn ReflectedType) -> bool {
        self.return_type.matches(return_type)
    }
}

impl fmt::Display for ArgsAndReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.return_type)?;
        for (idx, arg) in self.args.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, " {}", arg.ty)?;
        }
        f.write_str(" )")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::grammar::PrimitiveKind;
    use crate::reflect::RuntimeType;
    use crate::type_model::TypeKind;

    #[test]
    fn parses_primitive_args_in_order() {
        let parsed = ArgsAndReturnType::parse("(II)V").unwrap();
        assert_eq!(
            parsed.args(),
            &[
                Arg::new(TypeModel::primitive(PrimitiveKind::Int), 0),
                Arg::new(TypeModel::primitive(PrimitiveKind::Int), 1),
            ]
        );
        assert!(parsed.return_type().is_void());
        assert_eq!(parsed.to_string(), "void ( int, int )");
    }

    #[test]
    fn parses_object_arrays() {
        let parsed = ArgsAndReturnType::parse("([Ljava/lang/Object;)I").unwrap();
        assert_eq!(parsed.arity(), 1);
        let arg = &parsed.args()[0];
        assert_eq!(arg.position(), 0);
        assert_eq!(
            arg.ty(),
            &TypeModel::new(TypeKind::Object("java/lang/Object".to_string()), 1)
        );
        assert!(parsed.return_type().is_int());
    }

    #[test]
    fn parses_mixed_args() {
        let parsed =
            ArgsAndReturnType::parse("(J[[DLjava/lang/Integer;ZLcom/Lib;[C)[Ljava/lang/String;")
                .unwrap();
        let decls: Vec<String> = parsed.args().iter().map(|a| a.ty().to_string()).collect();
        assert_eq!(
            decls,
            vec![
                "long",
                "double[][]",
                "java.lang.Integer",
                "boolean",
                "com.Lib",
                "char[]"
            ]
        );
        for (idx, arg) in parsed.args().iter().enumerate() {
            assert_eq!(arg.position(), idx);
        }
        assert_eq!(
            parsed.return_type(),
            &TypeModel::parse("[Ljava/lang/String;").unwrap()
        );
    }

    #[test]
    fn no_args() {
        let parsed = ArgsAndReturnType::parse("()Ljava/lang/String;").unwrap();
        assert!(parsed.args().is_empty());
        assert_eq!(parsed.return_type().internal_name(), Some("java/lang/String"));
    }

    #[test]
    fn unterminated_argument_list_is_fatal() {
        for desc in ["(II", "", "I", "(Ljava/lang/String;"] {
            assert!(
                matches!(
                    ArgsAndReturnType::parse(desc),
                    Err(Error::MalformedDescriptor { .. })
                ),
                "{desc}"
            );
        }
    }

    #[test]
    fn malformed_return_type_is_fatal() {
        assert!(ArgsAndReturnType::parse("(I)").is_err());
        assert!(ArgsAndReturnType::parse("(I)Ljava/lang/String").is_err());
        assert!(ArgsAndReturnType::parse("([)V").is_err());
        assert!(ArgsAndReturnType::parse("(Q)V").is_err());
    }

    #[test]
    fn bad_return_type_reports_whole_descriptor() {
        assert_eq!(
            ArgsAndReturnType::parse("(I)V;junk").unwrap_err(),
            Error::MalformedDescriptor {
                descriptor: "(I)V;junk".to_string(),
                reason: "trailing characters after field type",
            }
        );
        assert_eq!(
            ArgsAndReturnType::parse("(I)Lpkg/Name").unwrap_err(),
            Error::MalformedDescriptor {
                descriptor: "(I)Lpkg/Name".to_string(),
                reason: "unterminated class reference",
            }
        );
    }

    #[test]
    fn reflected_and_parsed_signatures_are_equal() {
        let params = [
            RuntimeType::from(PrimitiveKind::Int),
            RuntimeType::array_of(RuntimeType::class("java.lang.String"), 1),
        ];
        let ret = RuntimeType::from(PrimitiveKind::Void);
        let reflected = ArgsAndReturnType::from_reflected(
            params.iter().map(|p| p as &dyn ReflectedType),
            &ret,
        );
        let parsed = ArgsAndReturnType::parse("(I[Ljava/lang/String;)V").unwrap();
        assert_eq!(reflected, parsed);
        assert!(parsed.matches_return(&ret));
    }
}
