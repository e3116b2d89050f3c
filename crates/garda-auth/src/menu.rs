//! Role-gated menu catalogs.
//!
//! A catalog is a static list of entries plus the gating policy its screen
//! renders with. Two policies exist and a screen commits to exactly one
//! for its whole catalog:
//!
//! | Policy | Restricted entry | Role unknown |
//! |--------|------------------|--------------|
//! | [`GatePolicy::Hide`] | dropped from the result | empty result (render as loading) |
//! | [`GatePolicy::Lock`] | kept, flagged locked | restricted entries locked |
//!
//! Catalogs are defined once and never mutated at runtime; the visible or
//! annotated subset is a pure function of (catalog, current role),
//! recomputed on every render.

use crate::role::Role;
use serde::{Deserialize, Serialize};

/// One navigable menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    /// Stable key the UI uses for selection state.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Icon reference for the rendering layer.
    pub icon: String,
    /// Target route.
    pub route: String,
    /// Roles allowed to use this entry. `None` admits every role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_roles: Option<Vec<Role>>,
}

impl MenuEntry {
    /// Builds an entry every role may use.
    #[must_use]
    pub fn open(
        key: impl Into<String>,
        label: impl Into<String>,
        icon: impl Into<String>,
        route: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            icon: icon.into(),
            route: route.into(),
            allowed_roles: None,
        }
    }

    /// Restricts the entry to the given roles.
    #[must_use]
    pub fn allow_only(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.allowed_roles = Some(roles.into_iter().collect());
        self
    }

    /// Returns `true` if the given role may use this entry.
    ///
    /// `None` never passes a restriction: with no role known, a restricted
    /// entry is treated as not allowed.
    #[must_use]
    pub fn allows(&self, role: Option<Role>) -> bool {
        match &self.allowed_roles {
            None => true,
            Some(roles) => role.is_some_and(|role| roles.contains(&role)),
        }
    }
}

/// How a screen treats entries the current role may not use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatePolicy {
    /// Restricted entries disappear from the rendered menu.
    Hide,
    /// Restricted entries stay visible but render non-interactive with a
    /// LOCK badge.
    Lock,
}

/// A menu entry paired with its lock state under [`GatePolicy::Lock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotatedEntry<'a> {
    pub entry: &'a MenuEntry,
    /// Rendered non-interactive when `true`.
    pub locked: bool,
}

/// A static menu catalog bound to the policy its screen renders with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCatalog {
    policy: GatePolicy,
    entries: Vec<MenuEntry>,
}

impl MenuCatalog {
    #[must_use]
    pub fn new(policy: GatePolicy, entries: Vec<MenuEntry>) -> Self {
        Self { policy, entries }
    }

    /// The policy the owning screen renders with.
    #[must_use]
    pub fn policy(&self) -> GatePolicy {
        self.policy
    }

    /// Every entry, unfiltered.
    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hide policy: the subset the role may use.
    ///
    /// With no role known the result is empty. Callers must render that as
    /// a loading state, not as a permanent "no permissions" screen; the
    /// role usually arrives one cookie read later.
    #[must_use]
    pub fn visible(&self, role: Option<Role>) -> Vec<&MenuEntry> {
        if role.is_none() {
            return Vec::new();
        }
        self.entries.iter().filter(|entry| entry.allows(role)).collect()
    }

    /// Lock policy: every entry, restricted ones flagged.
    ///
    /// Conservation: the result always holds exactly as many entries as
    /// the catalog, whatever the role.
    #[must_use]
    pub fn annotated(&self, role: Option<Role>) -> Vec<AnnotatedEntry<'_>> {
        self.entries
            .iter()
            .map(|entry| AnnotatedEntry {
                entry,
                locked: !entry.allows(role),
            })
            .collect()
    }
}

/// The administrative dashboard sidebar (Lock policy).
///
/// "Manage Admin" stays on screen for everyone but only a SuperAdmin can
/// open it; for other roles it renders with the LOCK badge instead of
/// disappearing.
#[must_use]
pub fn dashboard_sidebar() -> MenuCatalog {
    MenuCatalog::new(
        GatePolicy::Lock,
        vec![
            MenuEntry::open("manage-satpam", "Manage Satpam", "IoPersonAdd", "/AdminManageSatpam"),
            MenuEntry::open("manage-admin", "Manage Admin", "IoMdSettings", "/AdminManageAdmin")
                .allow_only([Role::SuperAdmin]),
            MenuEntry::open("manage-pos", "Manage Pos Patroli", "AiFillHome", "/AdminManagePos"),
            MenuEntry::open("manage-pos-utama", "Manage Pos Utama", "MdCoPresent", "/AdminManagePosUtama"),
            MenuEntry::open("manage-shift", "Manage Shift", "GoClockFill", "/AdminManageShift"),
            MenuEntry::open(
                "manage-patroli",
                "Manage Patroli",
                "MdOutlineManageHistory",
                "/AdminManagePosPatroli",
            ),
            MenuEntry::open("manage-radius", "Manage Radius", "LuRadius", "/AdminManageRadius"),
            MenuEntry::open("download-rekap", "Download Rekap", "MdFileDownload", "/AdminDownloadRekap"),
        ],
    )
}

/// The kiosk client menu (Hide policy).
///
/// Guards only ever see what their role can open; administrative entries
/// are absent rather than teasing a locked door on a shared kiosk screen.
#[must_use]
pub fn kiosk_menu() -> MenuCatalog {
    MenuCatalog::new(
        GatePolicy::Hide,
        vec![
            MenuEntry::open("beranda", "Beranda", "AiFillHome", "/"),
            MenuEntry::open("absensi", "Absensi Wajah", "MdCoPresent", "/TakePhoto"),
            MenuEntry::open("verifikasi", "Verifikasi", "MdFaceUnlock", "/Verification"),
            MenuEntry::open("patroli", "Patroli", "MdOutlineManageHistory", "/Patroli"),
            MenuEntry::open("foto-patroli", "Foto Patroli", "IoCamera", "/TakePhotoPatroli"),
            MenuEntry::open("laporan-patroli", "Laporan Patroli", "MdFileDownload", "/ReportPatroli"),
            MenuEntry::open("riwayat", "Riwayat Absensi", "GoClockFill", "/Riwayat"),
            MenuEntry::open("pengaturan", "Pengaturan", "IoMdSettings", "/Pengaturan")
                .allow_only([Role::Admin, Role::SuperAdmin]),
            MenuEntry::open("manajemen-admin", "Manajemen Admin", "IoPersonAdd", "/ManajemenAdmin")
                .allow_only([Role::Admin]),
        ],
    )
}
