use base64::{engine::general_purpose, Engine as _};
use rand::RngCore;

/// Generates a cryptographically secure random secret suitable for JWT
/// signing, base64-encoded for easy storage in configuration files.
pub fn handle_generate_secret_command() {
    let mut secret = [0u8; 64];
    rand::thread_rng().fill_bytes(&mut secret);
    let encoded = general_purpose::STANDARD.encode(secret);

    println!("🔐 Generated JWT Secret:");
    println!();
    println!("[jwt]");
    println!("secret = \"{encoded}\"");
    println!("expiration_days = 7");
    println!();
    println!("Add this to your config/{{environment}}.toml file.");
}
