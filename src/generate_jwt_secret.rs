// generate_jwt_secret.rs
// Utility to generate a new session signing secret

use rand::distributions::Alphanumeric;
use rand::Rng;

/// 64 alphanumeric characters carry roughly 380 bits of randomness
const SECRET_LENGTH: usize = 64;

fn generate_secret(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

fn main() {
    println!("Generating new session signing secret...\n");

    let secret = generate_secret(SECRET_LENGTH);

    println!("✅ Secret generated successfully!\n");
    println!("Add this to your .env file:");
    println!("─────────────────────────────────────────────────");
    println!("JWT_SECRET={}", secret);
    println!("─────────────────────────────────────────────────");
    println!("\n⚠️  IMPORTANT:");
    println!("  • Keep this secret out of version control");
    println!("  • Rotating it signs every user out");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_secret_length_and_charset() {
        let secret = generate_secret(SECRET_LENGTH);
        assert_eq!(secret.len(), SECRET_LENGTH);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(secret, generate_secret(SECRET_LENGTH));
    }
}
