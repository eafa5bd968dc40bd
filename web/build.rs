use std::env;

const ENV_FILE: &str = "../.env";

/// Build-time settings with the value used when neither the environment nor `.env` sets them
const SETTINGS: &[(&str, &str)] = &[
    ("API_URL", "http://localhost:8000"),
    ("RECAPTCHA_SITE_KEY", ""),
];

fn main() {
    // Values already present in the environment win over the file
    dotenvy::from_filename(ENV_FILE).ok();

    for (name, default) in SETTINGS {
        let value = match env::var(name) {
            Ok(value) => value,
            Err(_) => {
                println!(
                    "cargo:warning={} is not set, using {:?}",
                    name, default
                );
                default.to_string()
            }
        };
        println!("cargo:rustc-env={}={}", name, value);
        println!("cargo:rerun-if-env-changed={}", name);
    }

    println!("cargo:rerun-if-changed={}", ENV_FILE);
}
