use canonical::{CanonicalizeConfig, LicenseEntry, Normalizer, StaticRegistry};
use std::{env, fs, process, sync::Arc};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Some(file_path) = env::args().nth(1) else {
        eprintln!("usage: demo <license-file>");
        process::exit(2);
    };
    let content = match fs::read_to_string(&file_path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("cannot read {file_path}: {err}");
            process::exit(1);
        }
    };

    let registry = StaticRegistry::new(vec![
        LicenseEntry::new("mit", "MIT License", "MIT License"),
        LicenseEntry::new("apache-2.0", "Apache License 2.0", "Apache License"),
    ]);
    let normalizer = Normalizer::new(&registry, CanonicalizeConfig::default())
        .expect("built-in registry compiles");
    let doc = Arc::new(normalizer).document_with_filename(content, file_path);

    println!("normalized: {}", doc.normalized_content());
    println!();
    println!("wrapped:\n{}", doc.wrapped_content(None));
    println!();
    println!("words: {}", doc.word_set().len());
    println!("fields: {:?}", doc.field_set());
    println!("sha256: {}", doc.fingerprint());
}
