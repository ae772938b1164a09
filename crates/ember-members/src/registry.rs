use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::member::{FieldInfo, MethodInfo};

/// Ordinal assigned to a member by a [`MemberRegistry`], in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(usize);

impl MemberId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
enum Member {
    Method(MethodInfo),
    Field(FieldInfo),
}

/// Owns the member-identity counter.
///
/// Registering a member that is already known (from either origin) returns
/// the existing id, so reflection and constant-pool lookups resolve to the
/// same member. Ids index `members`.
#[derive(Debug, Default)]
pub struct MemberRegistry {
    method_ids: HashMap<MethodInfo, MemberId>,
    field_ids: HashMap<FieldInfo, MemberId>,
    members: Vec<Member>,
}

impl MemberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_method(&mut self, method: MethodInfo) -> MemberId {
        if let Some(id) = self.method_ids.get(&method) {
            return *id;
        }
        let id = self.next_id();
        tracing::trace!(target: "ember.members", id = id.0, %method, "registered method");
        self.method_ids.insert(method.clone(), id);
        self.members.push(Member::Method(method));
        id
    }

    pub fn register_field(&mut self, field: FieldInfo) -> MemberId {
        if let Some(id) = self.field_ids.get(&field) {
            return *id;
        }
        let id = self.next_id();
        tracing::trace!(target: "ember.members", id = id.0, %field, "registered field");
        self.field_ids.insert(field.clone(), id);
        self.members.push(Member::Field(field));
        id
    }

    fn next_id(&self) -> MemberId {
        MemberId(self.members.len())
    }

    pub fn method_id(&self, method: &MethodInfo) -> Option<MemberId> {
        let id = self.method_ids.get(method).copied();
        if id.is_none() {
            tracing::debug!(target: "ember.members", %method, "method not registered");
        }
        id
    }

    pub fn field_id(&self, field: &FieldInfo) -> Option<MemberId> {
        let id = self.field_ids.get(field).copied();
        if id.is_none() {
            tracing::debug!(target: "ember.members", %field, "field not registered");
        }
        id
    }

    pub fn method(&self, id: MemberId) -> Option<&MethodInfo> {
        match self.members.get(id.0)? {
            Member::Method(method) => Some(method),
            Member::Field(_) => None,
        }
    }

    pub fn field(&self, id: MemberId) -> Option<&FieldInfo> {
        match self.members.get(id.0)? {
            Member::Field(field) => Some(field),
            Member::Method(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
