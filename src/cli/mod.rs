// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Command line handling. Flags override `BOOTMENU_*` variables, which
//! override the built-in defaults.

pub mod args;

use std::ffi::OsString;

use log::warn;

use crate::cli::args::build_cli;
use crate::config::InitConfig;

/// Apply command line flags in `argv` on top of `cfg`. Arguments that do not
/// parse are ignored: init must come up whatever the kernel passes it.
pub fn apply_args<I, T>(cfg: &mut InitConfig, argv: I)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match build_cli().try_get_matches_from(argv) {
        Ok(m) => m,
        Err(e) => {
            warn!("ignoring command line: {e}");
            return;
        }
    };
    if let Some(v) = matches.get_one::<String>("framebuffer") {
        cfg.framebuffer = v.into();
    }
    if let Some(v) = matches.get_one::<String>("touchscreen") {
        cfg.touchscreen = v.into();
    }
    if let Some(v) = matches.get_one::<String>("console") {
        cfg.console = v.into();
    }
    if let Some(v) = matches.get_one::<String>("root") {
        cfg.root_device = v.clone();
    }
    if let Some(v) = matches.get_one::<String>("init") {
        cfg.init = v.into();
        cfg.init_argv = vec![v.clone()];
    }
}

/// Full configuration for this boot: defaults, environment, then `argv`.
pub fn load_config<I, T>(argv: I) -> InitConfig
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut cfg = InitConfig::from_env();
    apply_args(&mut cfg, argv);
    cfg
}
