//! Default access backend.
//!
//! Ordinary filesystems need no permission handshake, so access is always
//! granted and releasing it does nothing.

use super::StoreAccess;

/// Access backend for stores outside any sandbox.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unrestricted;

impl StoreAccess for Unrestricted {
    fn begin_access(&self) -> bool {
        true
    }

    fn end_access(&self) {}
}
