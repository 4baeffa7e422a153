use rand::{rngs::ThreadRng, Rng};
use tui::style::Color;

use super::error::{Error, Result};

pub const BOT_REPLY: &str = "This is a reply from a bot.";
pub const BOT_COLOR: Color = Color::Rgb(0x14, 0x63, 0xa3);

/// Simulated chat partner that answers at random, polled once per tick.
#[derive(Debug)]
pub struct Bot<R = ThreadRng> {
    name: String,
    reply_chance: f64,
    rng: R,
}

impl Bot {
    pub fn new(name: impl Into<String>, reply_chance: f64) -> Result<Self> {
        Self::with_rng(name, reply_chance, rand::thread_rng())
    }
}

impl<R: Rng> Bot<R> {
    pub fn with_rng(name: impl Into<String>, reply_chance: f64, rng: R) -> Result<Self> {
        if !(0.0..=1.0).contains(&reply_chance) {
            return Err(Error::invalid_argument(format!(
                "reply chance must be within 0 and 1, got {}",
                reply_chance
            )));
        }

        Ok(Self {
            name: name.into(),
            reply_chance,
            rng,
        })
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn joined_message(&self) -> String { format!("{} joined.", self.name) }

    pub fn poll_reply(&mut self) -> Option<&'static str> {
        if self.rng.gen_bool(self.reply_chance) {
            Some(BOT_REPLY)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn bot(chance: f64) -> Bot<StdRng> { Bot::with_rng("HAL9000", chance, StdRng::seed_from_u64(7)).unwrap() }

    #[test]
    fn certain_bot_always_replies() {
        let mut bot = bot(1.0);

        assert!((0..20).all(|_| bot.poll_reply() == Some(BOT_REPLY)));
    }

    #[test]
    fn silent_bot_never_replies() {
        let mut bot = bot(0.0);

        assert!((0..20).all(|_| bot.poll_reply().is_none()));
    }

    #[test]
    fn occasional_bot_replies_sometimes() {
        let mut bot = bot(0.5);
        let replies = (0..200).filter(|_| bot.poll_reply().is_some()).count();

        assert!(replies > 0 && replies < 200);
    }

    #[test]
    fn chance_outside_unit_range_is_rejected() {
        assert!(matches!(Bot::new("x", 1.5), Err(Error::InvalidArgument(_))));
        assert!(matches!(Bot::new("x", -0.1), Err(Error::InvalidArgument(_))));
        assert!(matches!(Bot::new("x", f64::NAN), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn announces_itself_by_name() {
        assert_eq!(bot(0.0).joined_message(), "HAL9000 joined.");
        assert_eq!(bot(0.0).name(), "HAL9000");
    }
}
