mod clock;
mod console;
mod events;

use console::{model::Viewport, App, CliOpts};
use events::EventSender;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{error::Error, io};

fn process_input_events(app_event_tx: EventSender<console::Event>) {
    loop {
        // blocking read
        let event = match crossterm::event::read() {
            Ok(event) => event,
            Err(err) => {
                log::error!("reading terminal input failed: {:?}", err);
                break;
            }
        };

        if !app_event_tx.send(console::Event::Input(event)) {
            break;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    let opt: CliOpts = argh::from_env();
    let viewport = Viewport::from(crossterm::terminal::size()?);

    let mut app = App::new(opt, viewport)?;
    let mut stdout = io::stdout();

    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    // handle term events
    let input_tx = app.sender().clone();
    std::thread::spawn(move || process_input_events(input_tx));

    let result = app.run().await;

    execute!(stdout, LeaveAlternateScreen)?;
    disable_raw_mode()?;

    result?;

    Ok(())
}
