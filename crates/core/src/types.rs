//! Element type descriptors
//!
//! This module defines:
//! - PrimitiveKind: the closed set of primitive numeric value types
//! - ElementType: opaque, comparable handle describing an array's element type
//! - TypeRegistry: resolves type names into `ElementType` handles
//!
//! ## Hierarchy
//!
//! `object` is the root of every hierarchy. `string`, all primitives and
//! every class defined without an explicit parent derive from `object`.
//! Primitives are value types and cannot be used as a parent.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value::Element;

/// Name of the root reference type
pub const OBJECT_TYPE_NAME: &str = "object";
/// Name of the builtin string type
pub const STRING_TYPE_NAME: &str = "string";

/// Primitive value types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// Boolean
    Bool,
    /// UTF-16 code unit
    Char,
    /// Signed 8-bit integer
    I8,
    /// Unsigned 8-bit integer
    U8,
    /// Signed 16-bit integer
    I16,
    /// Unsigned 16-bit integer
    U16,
    /// Signed 32-bit integer
    I32,
    /// Unsigned 32-bit integer
    U32,
    /// Signed 64-bit integer
    I64,
    /// Unsigned 64-bit integer
    U64,
    /// 32-bit IEEE-754 float
    F32,
    /// 64-bit IEEE-754 float
    F64,
}

impl PrimitiveKind {
    /// All primitive kinds (for iteration)
    pub const ALL: [PrimitiveKind; 12] = [
        PrimitiveKind::Bool,
        PrimitiveKind::Char,
        PrimitiveKind::I8,
        PrimitiveKind::U8,
        PrimitiveKind::I16,
        PrimitiveKind::U16,
        PrimitiveKind::I32,
        PrimitiveKind::U32,
        PrimitiveKind::I64,
        PrimitiveKind::U64,
        PrimitiveKind::F32,
        PrimitiveKind::F64,
    ];

    /// Type name used by the registry
    pub const fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::Char => "char",
            PrimitiveKind::I8 => "i8",
            PrimitiveKind::U8 => "u8",
            PrimitiveKind::I16 => "i16",
            PrimitiveKind::U16 => "u16",
            PrimitiveKind::I32 => "i32",
            PrimitiveKind::U32 => "u32",
            PrimitiveKind::I64 => "i64",
            PrimitiveKind::U64 => "u64",
            PrimitiveKind::F32 => "f32",
            PrimitiveKind::F64 => "f64",
        }
    }

    /// Parse from type name
    pub fn from_name(name: &str) -> Option<Self> {
        PrimitiveKind::ALL.iter().copied().find(|k| k.name() == name)
    }

    /// True for `F32` and `F64`
    pub const fn is_float(&self) -> bool {
        matches!(self, PrimitiveKind::F32 | PrimitiveKind::F64)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a type is a primitive value type or a reference type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Primitive value type stored inline
    Primitive(PrimitiveKind),
    /// Reference type (object, string, user classes)
    Reference,
}

#[derive(Debug)]
struct TypeInfo {
    name: String,
    kind: TypeKind,
    parent: Option<ElementType>,
}

/// Opaque element type handle
///
/// Cloning is cheap (reference counted). Two handles are equal when they
/// agree on name, kind and parent chain, so a class can never alias a
/// primitive or builtin type.
#[derive(Clone)]
pub struct ElementType(Arc<TypeInfo>);

impl ElementType {
    fn build(name: impl Into<String>, kind: TypeKind, parent: Option<ElementType>) -> Self {
        ElementType(Arc::new(TypeInfo {
            name: name.into(),
            kind,
            parent,
        }))
    }

    /// The root reference type
    pub fn object() -> Self {
        Self::build(OBJECT_TYPE_NAME, TypeKind::Reference, None)
    }

    /// The builtin string type
    pub fn string() -> Self {
        Self::build(STRING_TYPE_NAME, TypeKind::Reference, Some(Self::object()))
    }

    /// A primitive value type
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::build(kind.name(), TypeKind::Primitive(kind), Some(Self::object()))
    }

    /// A reference class deriving from `parent`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `name` is a builtin type name or
    /// `parent` is a value type.
    pub fn class(name: impl Into<String>, parent: &ElementType) -> Result<Self> {
        let name = name.into();
        if is_builtin_name(&name) {
            return Err(Error::invalid_argument(format!(
                "'{}' is a builtin type name",
                name
            )));
        }
        if parent.is_value_type() {
            return Err(Error::invalid_argument(format!(
                "value type '{}' cannot be used as a parent class",
                parent.name()
            )));
        }
        Ok(Self::build(name, TypeKind::Reference, Some(parent.clone())))
    }

    /// Type name
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Primitive or reference
    pub fn kind(&self) -> TypeKind {
        self.0.kind
    }

    /// Direct parent, `None` for `object`
    pub fn parent(&self) -> Option<&ElementType> {
        self.0.parent.as_ref()
    }

    /// True for primitive value types
    pub fn is_value_type(&self) -> bool {
        matches!(self.0.kind, TypeKind::Primitive(_))
    }

    /// The primitive kind, if this is a primitive
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self.0.kind {
            TypeKind::Primitive(kind) => Some(kind),
            TypeKind::Reference => None,
        }
    }

    /// Iterate over this type and all of its ancestors, nearest first
    pub fn ancestry(&self) -> impl Iterator<Item = &ElementType> {
        std::iter::successors(Some(self), |t| t.parent())
    }

    /// True if a value of type `src` can be stored in a slot of this type
    /// without conversion (identity, upcast or boxing).
    pub fn is_assignable_from(&self, src: &ElementType) -> bool {
        src.ancestry().any(|t| t == self)
    }

    /// Value a freshly allocated or cleared slot of this type holds
    pub fn default_element(&self) -> Element {
        match self.0.kind {
            TypeKind::Primitive(kind) => Element::zero(kind),
            TypeKind::Reference => Element::Null,
        }
    }
}

fn is_builtin_name(name: &str) -> bool {
    name == OBJECT_TYPE_NAME || name == STRING_TYPE_NAME || PrimitiveKind::from_name(name).is_some()
}

impl PartialEq for ElementType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.name == other.0.name
                && self.0.kind == other.0.kind
                && self.0.parent == other.0.parent)
    }
}

impl Eq for ElementType {}

impl Hash for ElementType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
        self.0.kind.hash(state);
    }
}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementType({})", self.0.name)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

impl From<PrimitiveKind> for ElementType {
    fn from(kind: PrimitiveKind) -> Self {
        ElementType::primitive(kind)
    }
}

/// Resolves type names into element type handles
///
/// Pre-populated with `object`, `string` and every primitive. User classes
/// are added with [`TypeRegistry::define_class`].
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: HashMap<String, ElementType>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Registry containing the builtin types
    pub fn new() -> Self {
        let mut types = HashMap::new();
        let object = ElementType::object();
        types.insert(OBJECT_TYPE_NAME.to_string(), object);
        types.insert(STRING_TYPE_NAME.to_string(), ElementType::string());
        for kind in PrimitiveKind::ALL {
            types.insert(kind.name().to_string(), ElementType::primitive(kind));
        }
        TypeRegistry { types }
    }

    /// Resolve a type name
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedType` if no type with this name is registered.
    pub fn resolve(&self, name: &str) -> Result<ElementType> {
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnresolvedType(name.to_string()))
    }

    /// Register a reference class deriving from `parent`
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the name is already taken or the parent is a value type
    /// - `UnresolvedType` if the parent is unknown
    pub fn define_class(&mut self, name: &str, parent: &str) -> Result<ElementType> {
        if self.types.contains_key(name) {
            return Err(Error::invalid_argument(format!(
                "type '{}' is already defined",
                name
            )));
        }
        let parent = self.resolve(parent)?;
        let class = ElementType::class(name, &parent)?;
        self.types.insert(name.to_string(), class.clone());
        Ok(class)
    }

    /// True if `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always false; the builtins are present from construction
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
