use todo_store::config::{AppConfig, StoreLocation};
use todo_store::infrastructure::{json_file_repo::JsonFileRepository, memory_repo::InMemoryRepository};
use todo_store::logging;
use todo_store::{TodoRepository, TodoStore};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    // The terminal belongs to the UI, so logs go to a file.
    let notice = config.log_file.as_deref().and_then(|path| logging::init_tracing(path, &config.log_filter).err());

    let repo: Box<dyn TodoRepository> = match &config.store {
        StoreLocation::File(path) => Box::new(JsonFileRepository::new(path)),
        StoreLocation::Memory => Box::new(InMemoryRepository::default()),
    };
    tracing::info!(location = %repo.location(), "opening todo store");
    let store = TodoStore::open(repo);

    todo_store::tui::run(store, notice)
}
