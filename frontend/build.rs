use dotenvy::dotenv;

fn main() {
  // Tell Cargo that if the env file changes, to rerun this build script.
  println!("cargo::rerun-if-changed=.env");

  if dotenv().is_err() {
    println!("cargo::warning=no .env file found, falling back to local replica defaults");
  }

  export("BACKEND_URL", "http://127.0.0.1:4943/api/squad");
  export("HMAC_KEY", "local-dev-key");
  export("IDENTITY_PROVIDER_URL", "https://identity.ic0.app");
  export("STRIPE_PUBLISHABLE_KEY", "pk_test_placeholder");
}

fn export(name: &str, fallback: &str) {
  println!("cargo::rerun-if-env-changed={}", name);
  match std::env::var(name) {
    Ok(value) if !value.trim().is_empty() => println!("cargo::rustc-env={}={}", name, value),
    _ => {
      println!("cargo::warning={} not set, using {}", name, fallback);
      println!("cargo::rustc-env={}={}", name, fallback);
    }
  }
}
