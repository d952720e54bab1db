// CLASSIFICATION: COMMUNITY
// Filename: args.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

use clap::{Arg, Command};

/// Builds the argument parser for the boot menu binary.
pub fn build_cli() -> Command {
    Command::new("bootmenu")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Initramfs boot menu")
        .ignore_errors(true)
        .arg(
            Arg::new("framebuffer")
                .long("framebuffer")
                .value_name("DEV")
                .help("Framebuffer device to draw the menu on"),
        )
        .arg(
            Arg::new("touchscreen")
                .long("touchscreen")
                .value_name("DEV")
                .help("Input event device of the touch digitizer"),
        )
        .arg(
            Arg::new("console")
                .long("console")
                .value_name("DEV")
                .help("Console handed to the target init"),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .value_name("DEV")
                .help("Block device behind the top-left tile"),
        )
        .arg(
            Arg::new("init")
                .long("init")
                .value_name("PATH")
                .help("Init to exec inside the new root"),
        )
        .arg(
            Arg::new("kernel_args")
                .num_args(0..)
                .trailing_var_arg(true)
                .hide(true),
        )
}
