use std::env;

pub fn print_version_info() {
    let git_hash = option_env!("GIT_HASH").unwrap_or("unknown");
    let build_timestamp = option_env!("BUILD_TIMESTAMP").unwrap_or("unknown");
    let rustc_version = option_env!("RUSTC_VERSION").unwrap_or("unknown");

    println!("📦 {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("📝 {}", env!("CARGO_PKG_DESCRIPTION"));

    println!();
    println!("🔨 Build Information:");
    println!("  🔗 Git Hash: {git_hash}");
    println!("  ⏰ Build Time: {build_timestamp}");
    println!("  🦀 Rust Version: {rustc_version}");
    println!();

    println!("💻 Runtime Information:");
    println!("  🖥️  OS: {}", env::consts::OS);
    println!("  🏗️  Architecture: {}", env::consts::ARCH);
}
