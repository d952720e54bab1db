// CLASSIFICATION: COMMUNITY
// Filename: main.rs v0.1
// Date Modified: 2026-10-18
// Author: Lukas Bower

//! PID 1 of the initramfs: boot menu, then the real init.

use std::convert::Infallible;

use anyhow::Context;
use bootmenu::display::LinuxFramebuffer;
use bootmenu::sys::LinuxSystem;
use bootmenu::{cli, console, BootMenu, InitConfig};
use env_logger::Env;
use log::{error, info};

fn run(cfg: InitConfig) -> anyhow::Result<Infallible> {
    let system = LinuxSystem::new(cfg.restart_grace);
    let framebuffer = LinuxFramebuffer::new(cfg.framebuffer.clone());
    let mut menu = BootMenu::new(cfg, system, framebuffer);
    menu.run().context("boot menu gave up")
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("bootmenu {}", env!("CARGO_PKG_VERSION"));

    let cfg = cli::load_config(std::env::args_os());
    let tty = cfg.tty.clone();
    match run(cfg) {
        Ok(never) => match never {},
        Err(err) => {
            error!("{err:#}");
            console::announce(&tty, &format!("bootmenu: {err:#}"));
            std::process::exit(1);
        }
    }
}
