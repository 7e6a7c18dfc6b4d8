//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `pets_core` linkage outside of any embedding application.
//! - Run one insert/query/delete cycle and print deterministic results.
//!
//! Usage: `pets_cli [config.json]`. Without a config the cycle runs against
//! an in-memory database and logs under the system temp directory.

use pets_core::{
    core_version, init_logging, new_pet_values, Gender, ObserverRegistry, PetProvider,
    ProviderConfig, Selection,
};
use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn main() -> ExitCode {
    println!("pets_core version={}", core_version());
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => ProviderConfig::load(path)?,
        None => ProviderConfig::default(),
    };
    let log_dir = config.effective_log_dir();
    init_logging(config.effective_log_level(), &log_dir)?;
    println!("log_dir={}", log_dir.display());

    let registry = Arc::new(ObserverRegistry::new());
    let changes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&changes);
    let collection = config.matcher().collection_path();
    registry.register(&collection, true, move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
    });

    let provider = PetProvider::open(&config, Arc::clone(&registry));
    let values = new_pet_values("Toto", Some("Terrier"), Gender::Male, Some(7));
    let Some(item) = provider.insert(&collection, &values)? else {
        return Err("insert was declined by storage".into());
    };
    println!("inserted id={} path={}", item.id, item.path);

    let cursor = provider.query(&item.path, &[], &Selection::all(), None)?;
    for pet in cursor.pets() {
        println!(
            "pet id={} name={} gender={:?} weight={}",
            pet.id, pet.name, pet.gender, pet.weight
        );
    }
    println!("type={}", provider.mime_type(&item.path)?);

    let deleted = provider.delete(&item.path, &Selection::all())?;
    println!("deleted={deleted}");
    println!("changes_observed={}", changes.load(Ordering::Relaxed));
    Ok(())
}
