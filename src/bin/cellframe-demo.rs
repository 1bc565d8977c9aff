//! Walks through every dialog in a real terminal, then prints what was typed.
//!
//! Logs go to `cellframe-demo.log` in the temp directory, filtered by `RUST_LOG` (default `cellframe=info`), since the
//! terminal itself is busy.

use std::{fs::File, sync::Mutex, thread, time::Duration};

use cellframe::{
    backend::crossterm::CrosstermHost,
    dialogs::{
        DialogField, Interactive, LineInputDialog, MessageDialog, MultiLineInputDialog, ProgressDialog,
    },
    Filter, Host, Result, Style, Widget,
};
use tracing_subscriber::EnvFilter;

struct Answers {
    name: String,
    fields: Vec<DialogField>,
    acknowledged: bool,
}

fn init_logging() -> Result<()> {
    let path = std::env::temp_dir().join("cellframe-demo.log");
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cellframe=info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run() -> Result<Answers> {
    let mut host = CrosstermHost::new()?;
    let cfg = host.config(Style {
        borderless_dialog: false,
        ..Style::default()
    });

    let mut progress = ProgressDialog::builder(cfg.clone())
        .label("Warming up the frames")
        .build()?;
    host.center(progress.size());
    for value in 0..=progress.maximum() {
        progress.set_value(value)?;
        host.update(&mut progress)?;
        thread::sleep(Duration::from_millis(15));
    }
    // the update after the last value already sent the delete, so this is `Removed`
    tracing::info!(lifecycle = ?progress.lifecycle(), "progress done");

    host.set_anchor(1, 2);
    let mut name = LineInputDialog::new("What should we call you?", "", Filter::Printable, cfg.clone())?;
    let name = name.show(&mut host)?;
    tracing::info!(%name, "got a name");

    let mut form = MultiLineInputDialog::new(
        vec![
            DialogField::new("Favorite color (Tab for next)", "teal", Filter::Printable),
            DialogField::new("Lucky number", "7", Filter::Digit),
            DialogField::new("Hometown", "", Filter::Printable),
        ],
        cfg.clone(),
    )?;
    let fields = form.show(&mut host)?;

    let who = if name.is_empty() { "stranger" } else { name.as_str() };
    let mut bye = MessageDialog::new(format!("Thanks, {}! Enter to finish.", who), cfg)?;
    host.center(bye.size());
    let acknowledged = bye.show(&mut host)?;

    Ok(Answers {
        name,
        fields,
        acknowledged,
    })
}

fn main() -> Result<()> {
    init_logging()?;
    // the host has restored the terminal by the time `run` returns
    let answers = run()?;
    println!("name: {:?}", answers.name);
    for field in &answers.fields {
        println!("{}: {:?}", field.label.as_str(), field.user_input);
    }
    println!("acknowledged: {}", answers.acknowledged);
    Ok(())
}
