//! Member visibility and lookup flags

use bitflags::bitflags;

/// Declared visibility of a registered type or member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Visible everywhere
    Public,
    /// Visible inside the declaring assembly
    Internal,
    /// Visible to the type and its subtypes
    Protected,
    /// Visible to the type only
    Private,
}

impl Visibility {
    /// Check if this is public visibility
    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

bitflags! {
    /// Which members a lookup may see.
    ///
    /// A member is visible to a lookup when both its scope bit (`STATIC` or
    /// `INSTANCE`) and its visibility bit (`PUBLIC` or `NON_PUBLIC`) are set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BindingFlags: u8 {
        /// Public members
        const PUBLIC = 0x01;
        /// Internal, protected and private members
        const NON_PUBLIC = 0x02;
        /// Static members
        const STATIC = 0x04;
        /// Instance members
        const INSTANCE = 0x08;

        /// Every static member regardless of visibility
        const STATIC_MEMBERS = Self::PUBLIC.bits() | Self::NON_PUBLIC.bits() | Self::STATIC.bits();
        /// Every instance member regardless of visibility
        const INSTANCE_MEMBERS = Self::PUBLIC.bits() | Self::NON_PUBLIC.bits() | Self::INSTANCE.bits();
    }
}

impl BindingFlags {
    /// Flags for a static or instance lookup
    pub fn scope(is_static: bool) -> Self {
        if is_static {
            Self::STATIC_MEMBERS
        } else {
            Self::INSTANCE_MEMBERS
        }
    }

    /// Check whether a member with this scope and visibility is visible
    pub fn admits(&self, is_static: bool, visibility: Visibility) -> bool {
        let scope = if is_static { Self::STATIC } else { Self::INSTANCE };
        let access = if visibility.is_public() {
            Self::PUBLIC
        } else {
            Self::NON_PUBLIC
        };
        self.contains(scope | access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_never_mixes() {
        let statics = BindingFlags::scope(true);
        assert!(statics.admits(true, Visibility::Private));
        assert!(statics.admits(true, Visibility::Public));
        assert!(!statics.admits(false, Visibility::Private));

        let instance = BindingFlags::scope(false);
        assert!(instance.admits(false, Visibility::Protected));
        assert!(!instance.admits(true, Visibility::Public));
    }

    #[test]
    fn test_public_only() {
        let flags = BindingFlags::PUBLIC | BindingFlags::INSTANCE;
        assert!(flags.admits(false, Visibility::Public));
        assert!(!flags.admits(false, Visibility::Internal));
    }
}
