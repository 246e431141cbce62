//! Type identifier token.

use std::any::TypeId;

use derive_more::Display;

/// Opaque, comparable identifier for a concrete Rust type.
///
/// Two tokens are equal iff they denote the same concrete type; there is no
/// subtype or assignability matching anywhere in the engine. The type name is
/// carried alongside the [`TypeId`] purely for diagnostics and derived
/// transformer names.
#[derive(Clone, Copy, Display)]
#[display("{name}")]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
}

impl TypeToken {
    /// Returns the token for a concrete type.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Returns the underlying type id.
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the fully qualified type name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the type name without its module path.
    ///
    /// Generic arguments are kept as-is, so `Vec<alloc::string::String>`
    /// shortens to `Vec<alloc::string::String>`, not `Vec<String>`.
    pub fn short_name(&self) -> &'static str {
        let head = self.name.split('<').next().unwrap_or(self.name);
        match head.rfind("::") {
            Some(pos) => &self.name[pos + 2..],
            None => self.name,
        }
    }
}

impl PartialEq for TypeToken {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeToken {}

impl std::hash::Hash for TypeToken {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Debug for TypeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TypeToken({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker;

    #[test]
    fn test_token_equality_is_exact() {
        assert_eq!(TypeToken::of::<String>(), TypeToken::of::<String>());
        assert_ne!(TypeToken::of::<String>(), TypeToken::of::<&str>());
        assert_ne!(TypeToken::of::<i32>(), TypeToken::of::<i64>());
    }

    #[test]
    fn test_token_display_uses_full_name() {
        let token = TypeToken::of::<String>();
        assert_eq!(token.to_string(), "alloc::string::String");
    }

    #[test]
    fn test_short_name_strips_module_path() {
        assert_eq!(TypeToken::of::<String>().short_name(), "String");
        assert_eq!(TypeToken::of::<i32>().short_name(), "i32");
        assert_eq!(TypeToken::of::<Marker>().short_name(), "Marker");
    }

    #[test]
    fn test_token_usable_as_map_key() {
        let mut map = std::collections::HashMap::new();
        map.insert(TypeToken::of::<u8>(), "u8");
        map.insert(TypeToken::of::<u16>(), "u16");
        assert_eq!(map.get(&TypeToken::of::<u8>()), Some(&"u8"));
    }
}
