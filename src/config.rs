// CLASSIFICATION: COMMUNITY
// Filename: config.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Boot menu configuration.
//!
//! Everything is compiled in. The kernel passes unknown `key=value` command
//! line parameters to init as environment variables, so `BOOTMENU_*`
//! variables can override the defaults without rebuilding the initramfs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;

use crate::boot::BootChoice;
use crate::display::MenuLayout;
use crate::input::Quadrant;
use crate::storage::{FlashAttach, RetryPolicy};

/// Paths, filesystem types and retry policies for one boot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitConfig {
    pub framebuffer: PathBuf,
    pub touchscreen: PathBuf,
    /// Framebuffer text console used for last-resort messages.
    pub tty: PathBuf,
    /// Console handed to the target init.
    pub console: PathBuf,
    pub layout: MenuLayout,

    pub boot_device: String,
    pub boot_fstype: String,
    pub boot_mount: PathBuf,
    pub boot_retry: RetryPolicy,
    pub bootdev_file: PathBuf,
    pub shell: PathBuf,
    pub scripts: [PathBuf; 2],

    pub root_device: String,
    pub root_fstypes: Vec<String>,
    pub root_mount: PathBuf,
    pub root_retry: RetryPolicy,

    pub flash_volume: String,
    pub flash_fstype: String,
    pub flash_retry: RetryPolicy,
    pub flash: FlashAttach,

    /// Kernel image read by the bootloader.
    pub cached_kernel: PathBuf,
    /// Kernel image inside the target root, relative to it.
    pub kernel_image: PathBuf,
    /// Logo inside the target root, relative to it.
    pub logo: PathBuf,
    pub init: PathBuf,
    pub init_argv: Vec<String>,
    pub restart_grace: Duration,
}

impl Default for InitConfig {
    fn default() -> Self {
        let boot_mount = PathBuf::from("/fat");
        let menu_dir = boot_mount.join("bootmenu");
        Self {
            framebuffer: "/dev/fb0".into(),
            touchscreen: "/dev/input/event0".into(),
            tty: "/dev/tty0".into(),
            console: "/dev/console".into(),
            layout: MenuLayout::portrait(Path::new("/pic")),

            boot_device: "/dev/mmcblk0p1".into(),
            boot_fstype: "vfat".into(),
            boot_retry: RetryPolicy::new(7, Duration::from_secs(1)),
            bootdev_file: menu_dir.join("bootdev"),
            shell: menu_dir.join("busybox"),
            scripts: [menu_dir.join("1.sh"), menu_dir.join("2.sh")],
            boot_mount,

            root_device: "/dev/mmcblk0p2".into(),
            root_fstypes: vec!["ext4".into(), "ext3".into(), "btrfs".into()],
            root_mount: "/real-root".into(),
            root_retry: RetryPolicy::once(),

            flash_volume: "ubi0:rootfs".into(),
            flash_fstype: "ubifs".into(),
            flash_retry: RetryPolicy::new(6, Duration::from_secs(1)),
            flash: FlashAttach {
                sysfs: "/sys".into(),
                helper: "/bin/ubiattach".into(),
                args: vec!["-m".into(), "4".into()],
            },

            cached_kernel: "/fat/uImage".into(),
            kernel_image: "boot/uImage".into(),
            logo: "boot/bootlogo.raw".into(),
            init: "/sbin/init".into(),
            init_argv: vec!["/sbin/init".into()],
            restart_grace: Duration::from_secs(10),
        }
    }
}

impl InitConfig {
    /// Defaults with `BOOTMENU_*` environment overrides applied.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_vars(|key| std::env::var(key).ok());
        cfg
    }

    /// Apply overrides looked up through `var`.
    pub fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| {
            let value = var(key).filter(|v| !v.is_empty());
            if let Some(v) = &value {
                debug!("{key}={v}");
            }
            value
        };
        if let Some(v) = lookup("BOOTMENU_FB") {
            self.framebuffer = v.into();
        }
        if let Some(v) = lookup("BOOTMENU_TOUCH") {
            self.touchscreen = v.into();
        }
        if let Some(v) = lookup("BOOTMENU_TTY") {
            self.tty = v.into();
        }
        if let Some(v) = lookup("BOOTMENU_CONSOLE") {
            self.console = v.into();
        }
        if let Some(v) = lookup("BOOTMENU_PICS") {
            self.layout = MenuLayout::portrait(Path::new(&v));
        }
        if let Some(v) = lookup("BOOTMENU_BOOTDEV") {
            self.boot_device = v;
        }
        if let Some(v) = lookup("BOOTMENU_RETRIES").and_then(|v| v.parse().ok()) {
            self.boot_retry = RetryPolicy::new(v, self.boot_retry.delay);
        }
        if let Some(v) = lookup("BOOTMENU_ROOT") {
            self.root_device = v;
        }
        if let Some(v) = lookup("BOOTMENU_ROOTFS") {
            self.root_fstypes = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Some(v) = lookup("BOOTMENU_FLASH") {
            self.flash_volume = v;
        }
        if let Some(v) = lookup("BOOTMENU_INIT") {
            self.init_argv = vec![v.clone()];
            self.init = v.into();
        }
    }

    /// Boot target behind a menu tile.
    pub fn choice_for(&self, quadrant: Quadrant) -> BootChoice {
        match quadrant {
            Quadrant::TopLeft => BootChoice::BlockDevice(self.root_device.clone(), None),
            Quadrant::TopRight => BootChoice::FlashVolume(self.flash_volume.clone(), None),
            Quadrant::BottomLeft => BootChoice::ShellScript(self.scripts[0].clone()),
            Quadrant::BottomRight => BootChoice::ShellScript(self.scripts[1].clone()),
        }
    }
}
