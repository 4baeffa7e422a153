use std::time::Duration;

use crossterm::event::{Event as InputEvent, KeyCode, KeyEvent, KeyModifiers};
use tui::{style::Color, Terminal};

use crate::{
    clock::Clock,
    events::{EventQueue, EventSender},
};

use super::{
    bot::{Bot, BOT_COLOR},
    error::Result,
    input::{KeyPress, UserInput},
    model::{ConsoleModel, Metrics, Viewport},
    render::Side,
    ui::{self, TermRenderer},
    CliOpts, Event,
};

const NOTICE: &str = "#808080";
const NOTICE_COLOR: Color = Color::Rgb(0x80, 0x80, 0x80);
const ERROR_COLOR: Color = Color::Rgb(0xa3, 0x14, 0x14);
const BACKGROUND_COLOR: Color = Color::Rgb(0xf0, 0xf0, 0xf0);

pub struct App {
    event_queue: EventQueue<Event>,
    console: ConsoleModel<TermRenderer>,
    bot: Bot,
    operator: String,
    tick_interval: Duration,
    should_exit: bool,
}

impl App {
    pub fn new(args: CliOpts, viewport: Viewport) -> Result<App> {
        let bot = Bot::new(args.bot_name, args.reply_chance)?;
        let renderer = TermRenderer::new(Some(BACKGROUND_COLOR));

        let mut app = App {
            event_queue: EventQueue::default(),
            console: ConsoleModel::new(renderer, viewport, Metrics::TERMINAL),
            bot,
            operator: args.operator,
            tick_interval: Duration::from_millis(args.tick_ms.max(1)),
            should_exit: false,
        };

        let started = format!("{} started the chat.", app.operator);
        let joined = app.bot.joined_message();
        app.console.log(&started, "left", NOTICE)?;
        app.console.log(&joined, "right", NOTICE)?;

        Ok(app)
    }

    pub fn exit(&mut self) { self.should_exit = true; }

    pub fn sender(&self) -> &EventSender<Event> { self.event_queue.sender() }

    #[cfg(test)]
    pub fn console(&self) -> &ConsoleModel<TermRenderer> { &self.console }

    fn on_tick(&mut self) {
        if let Some(reply) = self.bot.poll_reply() {
            log::debug!("{} replies", self.bot.name());
            self.console.append_entry(reply, Side::Right, BOT_COLOR);
        }

        self.console.on_tick();
    }

    fn handle_command(&mut self, command: &str) {
        log::debug!("command: /{}", command);

        match command {
            "quit" => self.exit(),
            "help" => {
                self.console
                    .append_entry("commands: /help, /quit", Side::Center, NOTICE_COLOR);
            }
            unknown => {
                let rejection = format!("Unknown command: /{}", unknown);
                self.console
                    .append_entry(&rejection, Side::Center, ERROR_COLOR);
            }
        }
    }

    fn handle_user_input(&mut self, input: UserInput) {
        match input {
            UserInput::Message(text) => log::info!("{}: {}", self.operator, text),
            UserInput::Command(command) => self.handle_command(&command),
        }
    }

    fn handle_input_event(&mut self, event: InputEvent) {
        match event {
            // close on ctrl-c
            InputEvent::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
            }) => self.exit(),

            InputEvent::Key(key_event) => {
                let press = KeyPress::from(key_event);
                if let Some(input) = self.console.on_key_event(press.produced, press.key) {
                    // handled ahead of pending ticks
                    self.sender().send_immediate(Event::User(input));
                }
            }

            InputEvent::Resize(width, height) => {
                let old = self.console.viewport();
                self.console.on_resize(old, Viewport::from((width, height)));
            }

            InputEvent::Mouse(_) => (),
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Tick => self.on_tick(),
            Event::Input(event) => self.handle_input_event(event),
            Event::User(input) => self.handle_user_input(input),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = Terminal::new(ui::backend())?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let clock = Clock::start(self.sender().clone(), Event::Tick, self.tick_interval);

        while !self.should_exit {
            if self.console.renderer_mut().take_dirty() {
                let widget = self.console.renderer().as_widget();
                terminal.draw(|frame| {
                    let area = frame.size();
                    frame.render_widget(widget, area);
                })?;
            }

            match self.event_queue.recv() {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }

        clock.stop();
        terminal.show_cursor()?;

        Ok(())
    }
}
