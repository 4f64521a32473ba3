//! Build script for detecting system dependencies and providing installation guidance.
//!
//! This script checks for the required system libraries (X11, pkg-config) and
//! prints helpful warnings if they are missing.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Check for X11 (required for input injection on Linux)
    check_x11();

    // Check for pkg-config
    check_pkg_config();

    // Print detected environment
    println!(
        "cargo:rustc-env=BUILD_TARGET={}",
        env::var("TARGET").unwrap_or_default()
    );
    println!("cargo:rustc-env=BUILD_HOST={}", env::var("HOST").unwrap_or_default());
}

fn check_x11() {
    // Only check on Linux
    if env::var("TARGET").unwrap_or_default().contains("linux") {
        let output = Command::new("pkg-config").args(["--exists", "x11"]).output();

        match output {
            Ok(output) if output.status.success() => {
                println!("cargo:warning=Found X11 libraries");
            }
            _ => {
                println!("cargo:warning=X11 libraries not found. Input injection will not work.");
                println!("cargo:warning=On Ubuntu: sudo apt-get install libx11-dev libxtst-dev");
            }
        }
    }
}

fn check_pkg_config() {
    let output = Command::new("pkg-config").arg("--version").output();

    match output {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            println!("cargo:warning=Found pkg-config version: {}", version.trim());
        }
        _ => {
            println!("cargo:warning=pkg-config not found. This is required to find system libraries.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install pkg-config");
            println!("cargo:warning=On macOS: brew install pkg-config");
        }
    }
}
