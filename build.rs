use std::fs;

fn emit(cargo: &toml::Value, key: &str, var: &str) {
    if let Some(value) = cargo
        .get("package")
        .and_then(|pkg| pkg.get(key))
        .and_then(|v| v.as_str())
    {
        println!("cargo:rustc-env={}={}", var, value);
    }
}

fn main() {
    let cargo_toml = fs::read_to_string("Cargo.toml").expect("Failed to read Cargo.toml");
    let cargo: toml::Value = cargo_toml.parse().expect("Failed to parse Cargo.toml");
    emit(&cargo, "name", "CARGO_PKG_NAME");
    emit(&cargo, "version", "CARGO_PKG_VERSION");
    emit(&cargo, "description", "CARGO_PKG_DESCRIPTION");
}
