//! Render raw descriptors as declarations.
//!
//! `[I` renders as `int[]`, and `(ILjava/lang/String;)V` with insert `method`
//! renders as `void method( int , String )`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grammar::{Tag, ARRAY_DIM, CLASS_END, DOT};
use crate::names::slash_to_dot;

const CORE_PACKAGE_PREFIX: &str = "java.lang.";
const ARRAY_SUFFIX: &str = "[]";
const ARG_SEPARATOR: &str = " , ";

/// Knobs for [`convert_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Render full dotted class names (minus the `java.lang.` prefix) instead
    /// of just the simple name.
    pub show_full_class_name: bool,
    /// Spliced after a field declaration, or between the return type and the
    /// argument list of a method.
    pub insert: String,
}

impl RenderOptions {
    pub fn with_insert(mut self, insert: impl Into<String>) -> Self {
        self.insert = insert.into();
        self
    }

    pub fn with_full_class_names(mut self, show_full_class_name: bool) -> Self {
        self.show_full_class_name = show_full_class_name;
        self
    }
}

/// One rendered type: the element name plus the array suffix it is still owed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fragment {
    element_name: String,
    pending_array_suffix: String,
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.element_name)?;
        f.write_str(&self.pending_array_suffix)
    }
}

fn join(fragments: &[Fragment], separator: &str) -> String {
    fragments
        .iter()
        .map(Fragment::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

fn display_class_name(internal: &str, show_full_class_name: bool) -> String {
    let dotted = slash_to_dot(internal);
    if show_full_class_name {
        return match dotted.strip_prefix(CORE_PACKAGE_PREFIX) {
            Some(rest) => rest.to_string(),
            None => dotted,
        };
    }
    match dotted.rfind(DOT) {
        Some(last_dot) if last_dot > 0 => dotted[last_dot + 1..].to_string(),
        _ => dotted,
    }
}

pub fn convert(desc: &str) -> Result<String> {
    convert_with(desc, &RenderOptions::default())
}

/// Render a field or method descriptor as a declaration.
///
/// Characters outside the grammar are skipped, so a descriptor with no
/// recognized tags renders as just `options.insert`.
pub fn convert_with(desc: &str, options: &RenderOptions) -> Result<String> {
    let mut fragments: Vec<Fragment> = Vec::new();
    let mut method_args: Option<Vec<Fragment>> = None;
    let mut pending_array_suffix: Option<String> = None;
    let mut in_args = false;

    let mut rest = desc;
    while let Some(ch) = rest.chars().next() {
        let after = &rest[ch.len_utf8()..];
        let element_name = match Tag::classify(ch) {
            Some(Tag::ClassStart) => {
                let Some(end) = after.find(CLASS_END) else {
                    return Err(Error::malformed(desc, "unterminated class reference"));
                };
                rest = &after[end + CLASS_END.len_utf8()..];
                display_class_name(&after[..end], options.show_full_class_name)
            }
            Some(Tag::Primitive(kind)) => {
                rest = after;
                kind.keyword().to_string()
            }
            Some(Tag::ArrayDim) => {
                if pending_array_suffix.is_some() {
                    return Err(Error::malformed(desc, "array marker without element type"));
                }
                let element = rest.trim_start_matches(ARRAY_DIM);
                let rank = rest.len() - element.len();
                pending_array_suffix = Some(ARRAY_SUFFIX.repeat(rank));
                rest = element;
                continue;
            }
            Some(Tag::ArgStart) => {
                if pending_array_suffix.is_some() {
                    return Err(Error::malformed(desc, "array marker without element type"));
                }
                if in_args || method_args.is_some() || !fragments.is_empty() {
                    return Err(Error::malformed(desc, "unexpected argument list"));
                }
                in_args = true;
                rest = after;
                continue;
            }
            Some(Tag::ArgEnd) => {
                if !in_args || pending_array_suffix.is_some() {
                    return Err(Error::malformed(desc, "unbalanced argument list"));
                }
                in_args = false;
                method_args = Some(std::mem::take(&mut fragments));
                rest = after;
                continue;
            }
            Some(Tag::ClassEnd) | Some(Tag::Annotation(_)) | None => {
                rest = after;
                continue;
            }
        };

        fragments.push(Fragment {
            element_name,
            pending_array_suffix: pending_array_suffix.take().unwrap_or_default(),
        });
    }

    if pending_array_suffix.is_some() {
        return Err(Error::malformed(desc, "array marker without element type"));
    }
    if in_args {
        return Err(Error::malformed(desc, "unterminated argument list"));
    }

    let Some(args) = method_args else {
        let declaration = join(&fragments, " ");
        return Ok(match (declaration.is_empty(), options.insert.is_empty()) {
            (true, _) => options.insert.clone(),
            (false, true) => declaration,
            (false, false) => format!("{declaration} {}", options.insert),
        });
    };

    if fragments.is_empty() {
        return Err(Error::malformed(desc, "missing return type"));
    }
    let mut out = join(&fragments, " ");
    out.push(' ');
    out.push_str(&options.insert);
    out.push('(');
    if !args.is_empty() {
        out.push(' ');
        out.push_str(&join(&args, ARG_SEPARATOR));
    }
    out.push_str(" )");
    Ok(out)
}
