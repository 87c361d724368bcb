// Copyright (c) The camino Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use upath::{UniformPath, UniformPathBuf};

/// This example shows how a `UniformPathBuf` can be used with `clap`'s derive-based argument parsing.
///
/// Paths are normalized while the arguments are parsed, so invalid paths such as `/..` or `a/.../b`
/// are rejected at the boundaries of your program.
///
/// To run this example, run `cargo run --package upath-examples --bin clap-derive -- 'a//b/../c.txt'`.
#[derive(Parser)]
#[clap(rename_all = "kebab-case")]
struct Opt {
    /// Path to inspect
    path: UniformPathBuf,

    /// Directory the path is resolved against
    #[clap(long)]
    base: Option<UniformPathBuf>,

    /// Only accept direct children of the base directory
    #[clap(long)]
    direct: bool,
}

pub fn main() {
    // Parse the arguments.
    let opt = Opt::parse();

    let path = match &opt.base {
        Some(base) => match UniformPath::combine(base, &opt.path) {
            Ok(path) => path,
            Err(err) => {
                eprintln!("cannot resolve {} against {}: {}", opt.path, base, err);
                std::process::exit(1);
            }
        },
        None => opt.path.clone(),
    };

    // Print the decomposition of the path.
    println!("path: {}", path);
    println!("absolute: {}", path.is_absolute());
    println!("directory: {}", path.directory());
    println!("name: {}", path.name());
    match path.extension() {
        Some(extension) => println!("extension: {}", extension),
        None => println!("no extension"),
    }
    println!("segments: {:?}", path.split());

    if let Some(base) = &opt.base {
        match path.in_directory(base, !opt.direct) {
            Ok(inside) => println!("inside {}: {}", base, inside),
            Err(err) => println!("not comparable with {}: {}", base, err),
        }
    }
}
