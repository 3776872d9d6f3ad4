use std::env;

const DEFAULT_FRAMEWORK_DIR: &str = "/Library/Frameworks";

fn main() {
    println!("cargo:rerun-if-env-changed=GSTREAMER_FRAMEWORK_DIR");

    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("macos") {
        return;
    }

    let frameworks =
        env::var("GSTREAMER_FRAMEWORK_DIR").unwrap_or_else(|_| DEFAULT_FRAMEWORK_DIR.to_string());

    // GStreamer ships as a framework on macOS; both the linker and the loader need to find it.
    println!("cargo:rustc-link-search=framework={frameworks}");
    println!(
        "cargo:rustc-link-arg=-Wl,-rpath,{frameworks}/GStreamer.framework/Versions/1.0/lib"
    );
}
