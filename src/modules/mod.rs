pub mod auth;
pub mod books;

use std::sync::Arc;

use bookhub_db::Repositories;
use bookhub_kernel::{settings::Settings, ModuleRegistry};

/// Register all feature modules with the registry, wired to `repos`
pub fn register_all(registry: &mut ModuleRegistry, repos: &Repositories, settings: &Settings) {
    registry.register(auth::create_module(Arc::clone(&repos.users), &settings.auth));
    registry.register(books::create_module(Arc::clone(&repos.books)));
}
