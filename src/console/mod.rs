mod app;
mod bot;
pub mod error;
pub mod input;
pub mod model;
pub mod render;
pub mod ui;

pub use app::App;
pub use crossterm::event::Event as InputEvent;

use argh::FromArgs;

use self::input::UserInput;

/// chat with a (not very talkative) bot in the terminal
#[derive(FromArgs, Debug, Clone)]
pub struct CliOpts {
    #[argh(option, default = "333")]
    /// milliseconds between cursor blinks and bot reply polls.
    pub tick_ms: u64,

    #[argh(option, default = "0.02")]
    /// probability of a bot reply on each tick, within 0 and 1.
    pub reply_chance: f64,

    #[argh(option, default = "String::from(\"HAL9000\")")]
    /// name the bot joins the chat with.
    pub bot_name: String,

    #[argh(option, default = "String::from(\"Operator\")")]
    /// name of the person starting the chat.
    pub operator: String,
}

impl Default for CliOpts {
    fn default() -> Self {
        Self {
            tick_ms: 333,
            reply_chance: 0.02,
            bot_name: "HAL9000".to_owned(),
            operator: "Operator".to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    Tick,
    Input(InputEvent),
    User(UserInput),
}
