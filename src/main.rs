use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;

use clap::Parser;
use folio_store::JsonFileStore;

use term_folio::assets;
use term_folio::cli::{FolioCli, FolioConfig};
use term_folio::constants::POLL_INTERVAL;
use term_folio::desktop::{Desktop, SystemPlatform};
use term_folio::drivers::{ConsoleInputDriver, ConsoleOutputDriver};
use term_folio::error::FolioError;
use term_folio::runner::run_desktop;
use term_folio::storage::FileKeyValueStore;
use term_folio::tracing_sub;

fn main() -> io::Result<()> {
    let cli = FolioCli::parse();
    let config = FolioConfig::try_from(&cli)?;
    tracing_sub::init(&config.log_file, config.log_level);
    tracing::info!(
        state_dir = %config.state_dir.display(),
        data_dir = %config.data_dir.display(),
        "starting term-folio"
    );
    run(&config).map_err(|err| {
        tracing::error!(error = %err, "term-folio exited with an error");
        err.into()
    })
}

fn run(config: &FolioConfig) -> Result<(), FolioError> {
    let service = Arc::new(JsonFileStore::open(&config.data_dir, &assets::seed_projects())?);
    let store = Rc::new(RefCell::new(FileKeyValueStore::open(config.storage_path())));

    let mut desktop = Desktop::new(store, service, config.metrics, Box::new(SystemPlatform));
    if config.reset_layout {
        desktop.layout_mut().reset();
    }
    desktop.state_mut().set_mouse_capture_enabled(config.mouse);

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let result = run_desktop(
        output.terminal_mut(),
        ConsoleInputDriver::new(),
        &mut desktop,
        POLL_INTERVAL,
    );
    output.exit()?;
    Ok(result?)
}
