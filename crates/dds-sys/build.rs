// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=DDS_NATIVE_LIB");
    println!("cargo:rerun-if-env-changed=DDS_NATIVE_LIB_DIR");

    // Declarations are always compiled; linking is opt-in so the crate builds
    // on machines without the native middleware installed.
    if env::var_os("CARGO_FEATURE_LINK").is_none() {
        return;
    }

    let lib = env::var("DDS_NATIVE_LIB").unwrap_or_else(|_| "dds_native".to_string());
    if let Ok(dir) = env::var("DDS_NATIVE_LIB_DIR") {
        println!("cargo:rustc-link-search=native={dir}");
    }
    println!("cargo:rustc-link-lib=dylib={lib}");
}
