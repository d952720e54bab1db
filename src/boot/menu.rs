// CLASSIFICATION: COMMUNITY
// Filename: menu.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18
//
// ─────────────────────────────────────────────────────────────
// bootmenu · Boot flow
//
// Strictly sequential:
//
//  1. Draw the menu.
//  2. Mount the boot partition, read (and drop) the persisted choice.
//  3. Without one, wait for a single touch.
//  4. Exec a script, or mount the chosen root (falling back to the
//     flash volume when the block device will not mount).
//  5. Sync the cached kernel (may restart), then hand over to init.
// ─────────────────────────────────────────────────────────────

use std::convert::Infallible;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use thiserror::Error;

use super::bootdev::BootDevFile;
use super::choice::BootChoice;
use super::handoff::{transition_to_root, Handoff, TransitionError};
use super::kernel_sync::{sync_kernel_and_maybe_reboot, SyncOutcome};
use crate::config::InitConfig;
use crate::console;
use crate::display::{Compositor, FramebufferDevice};
use crate::input::{self, InputError};
use crate::storage::{attach_flash_volume, mount_with_retry, FlashError, MountError};
use crate::sys::System;

/// Why the boot menu could not hand over.
#[derive(Debug, Error)]
pub enum BootError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Mount(#[from] MountError),
    #[error(transparent)]
    Flash(#[from] FlashError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("exec {shell:?} sh {script:?}: {source}")]
    ShellExec {
        shell: PathBuf,
        script: PathBuf,
        source: io::Error,
    },
    #[error("restart was requested but the device is still running")]
    RestartIneffective,
}

/// One boot: owns the configuration and the capability handles.
pub struct BootMenu<S: System, F: FramebufferDevice> {
    config: InitConfig,
    system: S,
    compositor: Compositor<F>,
    bootdev: BootDevFile,
    boot_mounted: bool,
}

impl<S: System, F: FramebufferDevice> BootMenu<S, F> {
    pub fn new(config: InitConfig, system: S, framebuffer: F) -> Self {
        let bootdev = BootDevFile::new(config.bootdev_file.clone());
        Self {
            config,
            system,
            compositor: Compositor::new(framebuffer),
            bootdev,
            boot_mounted: false,
        }
    }

    pub fn config(&self) -> &InitConfig {
        &self.config
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    pub fn compositor(&self) -> &Compositor<F> {
        &self.compositor
    }

    pub fn bootdev(&self) -> &BootDevFile {
        &self.bootdev
    }

    /// Select a target and boot it. Only returns on failure.
    pub fn run(&mut self) -> Result<Infallible, BootError> {
        let choice = self.select()?;
        self.boot(choice)
    }

    /// Produce the one boot choice of this run.
    pub fn select(&mut self) -> Result<BootChoice, BootError> {
        self.compositor.draw_menu(&self.config.layout);

        let persisted = match mount_with_retry(
            &mut self.system,
            std::slice::from_ref(&self.config.boot_fstype),
            &self.config.boot_device,
            &self.config.boot_mount,
            &self.config.boot_retry,
        ) {
            Ok(_) => {
                self.boot_mounted = true;
                self.bootdev.consume()
            }
            Err(e) => {
                warn!("{e}; no persisted choice");
                None
            }
        };
        if let Some(choice) = persisted {
            return Ok(choice);
        }

        match input::await_choice(
            &self.config.touchscreen,
            &self.config.layout,
            &mut self.compositor,
        ) {
            Ok(quadrant) => {
                let choice = self.config.choice_for(quadrant);
                info!("selected {choice}");
                Ok(choice)
            }
            Err(e) => {
                let msg = match &e {
                    InputError::InputUnavailable { .. } => {
                        format!("failed to open touchscreen: {e}")
                    }
                    _ => format!("touchscreen: {e}"),
                };
                console::announce(&self.config.tty, &msg);
                Err(e.into())
            }
        }
    }

    /// Act on `choice`. Only returns on failure.
    pub fn boot(&mut self, choice: BootChoice) -> Result<Infallible, BootError> {
        match choice {
            BootChoice::ShellScript(script) => self.run_script(script),
            BootChoice::BlockDevice(device, subdir) => {
                match mount_with_retry(
                    &mut self.system,
                    &self.config.root_fstypes,
                    &device,
                    &self.config.root_mount,
                    &self.config.root_retry,
                ) {
                    Ok(fstype) => {
                        info!("{device} mounted as {fstype}");
                        self.enter_root(subdir)
                    }
                    Err(e) => {
                        warn!("{e}; falling back to flash");
                        let volume = self.config.flash_volume.clone();
                        self.boot_flash(&volume, None)
                    }
                }
            }
            BootChoice::FlashVolume(volume, subdir) => self.boot_flash(&volume, subdir),
        }
    }

    fn run_script(&mut self, script: PathBuf) -> Result<Infallible, BootError> {
        self.bootdev.discard();
        let shell = self.config.shell.clone();
        info!("running {} sh {}", shell.display(), script.display());
        let argv = vec!["sh".to_string(), script.to_string_lossy().into_owned()];
        self.system
            .exec(&shell, &argv)
            .map_err(|source| BootError::ShellExec {
                shell,
                script,
                source,
            })
    }

    fn boot_flash(
        &mut self,
        volume: &str,
        subdir: Option<PathBuf>,
    ) -> Result<Infallible, BootError> {
        attach_flash_volume(&mut self.system, &self.config.flash)?;
        mount_with_retry(
            &mut self.system,
            std::slice::from_ref(&self.config.flash_fstype),
            volume,
            &self.config.root_mount,
            &self.config.flash_retry,
        )?;
        self.enter_root(subdir)
    }

    fn enter_root(&mut self, subdir: Option<PathBuf>) -> Result<Infallible, BootError> {
        let handoff = Handoff {
            root: self.config.root_mount.clone(),
            subdir,
            console: self.config.console.clone(),
            init: self.config.init.clone(),
            argv: self.config.init_argv.clone(),
        };
        let os_root = handoff.os_root();

        if self.boot_mounted {
            self.sync_kernel(&os_root)?;
        } else {
            debug!("boot partition not mounted, kernel sync skipped");
        }

        self.bootdev.discard();
        let logo = os_root.join(&self.config.logo);
        let (left, top) = (self.config.layout.ack_left, self.config.layout.ack_top);
        if let Err(e) = self.compositor.draw(&logo, left, top, true) {
            debug!("no boot logo: {e}");
        }

        match transition_to_root(&mut self.system, &handoff) {
            Ok(never) => match never {},
            Err(e) => {
                error!("run_init error: {e}");
                console::announce(&self.config.tty, &format!("run_init error: {e}"));
                Err(e.into())
            }
        }
    }

    fn sync_kernel(&mut self, os_root: &Path) -> Result<(), BootError> {
        let target = os_root.join(&self.config.kernel_image);
        let unmount = [self.config.boot_mount.clone(), self.config.root_mount.clone()];
        match sync_kernel_and_maybe_reboot(
            &mut self.system,
            &self.config.cached_kernel,
            &target,
            &unmount,
        ) {
            Ok(SyncOutcome::Unchanged) => Ok(()),
            Ok(SyncOutcome::UpdatedAndRebooting) => Err(BootError::RestartIneffective),
            Err(e) => {
                warn!("kernel sync skipped: {e}");
                Ok(())
            }
        }
    }
}
