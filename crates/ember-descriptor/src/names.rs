//! Conversions between the three class-name notations:
//!
//! - internal: `java/lang/String`
//! - canonical (dotted): `java.lang.String`
//! - mangled: `java_lang_String`
//!
//! Mangling is lossy. `a.b_c` and `a_b.c` both mangle to `a_b_c`; callers
//! that need unique linkage names must disambiguate themselves.

use crate::grammar::{ARRAY_DIM, CLASS_END, CLASS_START, DOT, SLASH, UNDERSCORE};

pub fn dot_to_slash(dotted: &str) -> String {
    dotted.replace(DOT, "/")
}

pub fn slash_to_dot(internal: &str) -> String {
    internal.replace(SLASH, ".")
}

pub fn dot_to_mangled(dotted: &str) -> String {
    dotted.replace(DOT, "_")
}

pub fn slash_to_mangled(internal: &str) -> String {
    internal.replace(SLASH, "_")
}

/// `("pkg.Name", 2)` -> `[[Lpkg/Name;`
pub fn class_descriptor(dotted: &str, rank: usize) -> String {
    let mut out = String::with_capacity(dotted.len() + rank + 2);
    for _ in 0..rank {
        out.push(ARRAY_DIM);
    }
    out.push(CLASS_START);
    out.push_str(&dot_to_slash(dotted));
    out.push(CLASS_END);
    out
}

/// Strip `rank` array markers and the class markers from a class descriptor.
fn descriptor_internal_name(desc: &str, rank: usize) -> Option<&str> {
    let mut rest = desc;
    for _ in 0..rank {
        rest = rest.strip_prefix(ARRAY_DIM)?;
    }
    rest.strip_prefix(CLASS_START)?.strip_suffix(CLASS_END)
}

/// `("[Lpkg/Outer$Name;", 1)` -> `pkg.Outer$Name`
pub fn descriptor_to_dot_name(desc: &str, rank: usize) -> Option<String> {
    descriptor_internal_name(desc, rank).map(slash_to_dot)
}

/// `("Lpkg/Name;", 0)` -> `pkg_Name`
pub fn descriptor_to_mangled_name(desc: &str, rank: usize) -> Option<String> {
    descriptor_internal_name(desc, rank).map(slash_to_mangled)
}

/// Whether mangling `name` loses information (it already contains `_`).
pub fn mangling_is_ambiguous(name: &str) -> bool {
    name.contains(UNDERSCORE)
}
