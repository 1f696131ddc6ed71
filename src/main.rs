use anyhow::Result;
use clap::Parser;
use gyre::config::{self, Lang};
use gyre::gui::app::AppModel;
use gyre::sys::runtime;
use relm4::prelude::*;

#[derive(Parser, Debug)]
#[command(about = "Circular service-category showcase")]
struct Args {
    /// Override the configured display language (en or ar)
    #[arg(long)]
    lang: Option<Lang>,

    /// Write the default config file and print its path, then exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    if args.init_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut cfg = config::load_or_default();
    if let Some(lang) = args.lang {
        cfg.language = lang;
    }

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.moukhtalif.gyre").with_args(Vec::new());
    app.run::<AppModel>((cfg, rx));

    Ok(())
}
