// ── Menu handle ownership ─────────────────────────────────────────────────────
//
// A `MenuHandle` either owns its native menu (and destroys it exactly once, on
// drop) or fosters a menu owned elsewhere (and never destroys it).  The mode is
// fixed at construction; `into_raw` is the only way out of ownership.

use log::{debug, warn};

use crate::{
    error::Result,
    platform::{MenuApi, RawMenu},
};

/// Who is responsible for destroying the native menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// This wrapper destroys the menu when dropped.
    Owned,
    /// Someone else destroys the menu; this wrapper only refers to it.
    Foster,
}

/// A native menu handle tagged with its ownership.
///
/// Equality compares the handle value only, so an owning wrapper and a foster
/// wrapper around the same menu are equal.
#[derive(Debug)]
pub struct MenuHandle<A: MenuApi> {
    api: A,
    raw: RawMenu,
    ownership: Ownership,
}

impl<A: MenuApi> MenuHandle<A> {
    /// Create a new, empty menu bar and own it.
    pub fn create(api: A) -> Result<Self> {
        let raw = api.create_menu()?;
        debug!("created menu {:#x}", raw.get());
        Ok(Self::adopt(api, raw))
    }

    /// Create a new, empty drop-down/context menu and own it.
    pub fn create_popup(api: A) -> Result<Self> {
        let raw = api.create_popup_menu()?;
        debug!("created popup menu {:#x}", raw.get());
        Ok(Self::adopt(api, raw))
    }

    /// Take ownership of an existing menu.
    ///
    /// The caller must not destroy `raw` afterwards, nor hand ownership of it
    /// to anything else.
    pub fn adopt(api: A, raw: RawMenu) -> Self {
        Self {
            api,
            raw,
            ownership: Ownership::Owned,
        }
    }

    /// Refer to a menu owned elsewhere without taking ownership.
    pub fn foster(api: A, raw: RawMenu) -> Self {
        Self {
            api,
            raw,
            ownership: Ownership::Foster,
        }
    }

    pub fn raw(&self) -> RawMenu {
        self.raw
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Give up ownership without destroying the menu.
    pub fn into_raw(mut self) -> RawMenu {
        if self.ownership == Ownership::Owned {
            debug!("released ownership of menu {:#x}", self.raw.get());
        }
        self.ownership = Ownership::Foster;
        self.raw
    }
}

impl<A: MenuApi> PartialEq for MenuHandle<A> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<A: MenuApi> Eq for MenuHandle<A> {}

impl<A: MenuApi> Drop for MenuHandle<A> {
    fn drop(&mut self) {
        if self.ownership == Ownership::Foster {
            return;
        }
        // Drop cannot report failure; log it and carry on.
        match self.api.destroy_menu(self.raw) {
            Ok(()) => debug!("destroyed menu {:#x}", self.raw.get()),
            Err(e) => warn!("could not destroy menu {:#x}: {e}", self.raw.get()),
        }
    }
}
