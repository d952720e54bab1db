// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18
//
// ─────────────────────────────────────────────────────────────
// bootmenu · Boot subsystem
//
// * `choice`      – the tagged boot target
// * `bootdev`     – persisted one-line choice on the boot partition
// * `kernel_sync` – cached kernel refresh + restart
// * `handoff`     – chroot + exec into the target init
// * `menu`        – the sequential boot flow
// ─────────────────────────────────────────────────────────────

pub mod bootdev;
pub mod choice;
pub mod handoff;
pub mod kernel_sync;
pub mod menu;

pub use bootdev::BootDevFile;
pub use choice::BootChoice;
pub use handoff::{transition_to_root, Handoff, TransitionError};
pub use kernel_sync::{sync_kernel_and_maybe_reboot, synchronize_image, SyncError, SyncOutcome};
pub use menu::{BootError, BootMenu};
