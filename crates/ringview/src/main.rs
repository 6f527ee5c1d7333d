use clap::Parser;
use relm4::prelude::*;
use ringview::cli::Cli;
use ringview::config;
use ringview::gui::app::AppModel;
use ringview::sys::runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.init_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = cli.apply_to(config::load_or_default());
    log::debug!("Starting with {} rings", config.ring_count);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    // GTK must not see our own flags
    let app = RelmApp::new("org.ringprogress.ringview").with_args(Vec::new());

    app.run::<AppModel>((config, cli, rx));
    Ok(())
}
