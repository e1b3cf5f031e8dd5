//! Toolkit layouts for tests.
//!
//! These lay out just enough of an NDK or osxcross install inside a
//! [`MockProbe`] for discovery to succeed.

use std::path::Path;

use super::MockProbe;

/// Lay out an NDK with one prebuilt LLVM toolchain for `host_tag`.
///
/// ```text
/// <root>/toolchains/llvm/prebuilt/<host_tag>/bin
/// <root>/toolchains/llvm/prebuilt/<host_tag>/sysroot/usr/include/c++/v1
/// <root>/sysroot/usr/include
/// ```
pub fn ndk_install(probe: &mut MockProbe, root: impl AsRef<Path>, host_tag: &str) {
    let root = root.as_ref();
    let prebuilt = root
        .join("toolchains")
        .join("llvm")
        .join("prebuilt")
        .join(host_tag);

    probe.add_file(prebuilt.join("bin").join("clang"));
    probe.add_file(prebuilt.join("bin").join("clang++"));
    probe.add_dir(
        prebuilt
            .join("sysroot")
            .join("usr")
            .join("include")
            .join("c++")
            .join("v1"),
    );
    probe.add_dir(root.join("sysroot").join("usr").join("include"));
}

/// Lay out an osxcross checkout with the given SDK directory names.
///
/// ```text
/// <checkout>/target/bin/o64-clang
/// <checkout>/target/binutils/bin
/// <checkout>/target/SDK/<sdk>...
/// ```
pub fn osxcross_install(probe: &mut MockProbe, checkout: impl AsRef<Path>, sdks: &[&str]) {
    let target = checkout.as_ref().join("target");

    probe.add_file(target.join("bin").join("o64-clang"));
    probe.add_file(target.join("bin").join("o64-clang++"));
    probe.add_dir(target.join("binutils").join("bin"));
    for sdk in sdks {
        probe.add_dir(target.join("SDK").join(sdk));
    }
}
